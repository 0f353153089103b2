//! Framegold Core Library
//!
//! This crate provides the fundamental traits, types, and error handling
//! for the framegold golden-model frame codec.

pub mod error;
pub mod frame;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frame::Frame;
pub use types::{ethertypes, MacAddr};
