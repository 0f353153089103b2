//! Frame codec library for offload-engine verification
//!
//! This crate is the golden model used to generate stimulus and check
//! responses for a simulated hardware network-offload engine. It provides
//! binary encoders/decoders for the frame types the engine handles:
//!
//! - **Ethernet II frames** (14-byte header)
//! - **ARP** (fixed 28-byte Ethernet/IPv4 packets)
//! - **IPv4** (20-byte header with derived checksum and fragmentation
//!   bit-packing)
//! - **UDP** (8-byte header, optional checksum emitted as zero)
//! - **DHCP** (240-byte fixed header, magic cookie, opaque options)
//!
//! # Architecture
//!
//! - [`checksum`] - the shared Internet checksum (RFC 1071)
//! - [`registry`] - per-layer payload decoder registries
//! - [`ethernet`], [`arp`], [`ipv4`], [`udp`], [`dhcp`] - one module per
//!   frame type
//!
//! Every frame type implements the [`Frame`] capability: serialize with
//! `to_bytes`, parse with `from_bytes`. A frame tree is built top-down and
//! serialized depth-first; decoding peels the outer header, reads its
//! protocol-identifier field and recursively decodes the remainder when a
//! decoder is registered for it, otherwise the payload stays raw bytes.
//!
//! # Quick Start
//!
//! ```rust
//! use framegold_packet::arp::ArpFrame;
//! use framegold_packet::ethernet::EthernetFrame;
//! use framegold_packet::{ethertypes, Frame, MacAddr};
//! use std::net::Ipv4Addr;
//!
//! let sender = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
//! let arp = ArpFrame::request(
//!     sender,
//!     Ipv4Addr::new(192, 168, 1, 10),
//!     Ipv4Addr::new(192, 168, 1, 1),
//! );
//! let frame = EthernetFrame::new(MacAddr::BROADCAST, sender, ethertypes::ARP, arp);
//!
//! let bytes = frame.to_bytes();
//! assert_eq!(bytes.len(), 42);
//!
//! let parsed = EthernetFrame::from_bytes(&bytes).unwrap();
//! assert_eq!(parsed, frame);
//! ```

pub mod arp;
pub mod checksum;
pub mod dhcp;
pub mod ethernet;
pub mod ipv4;
pub mod registry;
pub mod udp;

#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use arp::{ArpFrame, ArpOpcode};
pub use checksum::{internet_checksum, verify_checksum};
pub use dhcp::DhcpFrame;
pub use ethernet::{EtherPayload, EthernetFrame};
pub use framegold_core::{ethertypes, Error, Frame, MacAddr, Result};
pub use ipv4::{IpPayload, IpProtocol, Ipv4Frame};
pub use udp::UdpFrame;
