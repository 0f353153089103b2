//! Payload decoder registry
//!
//! One registry exists per layering boundary (Ethernet to L3 by ethertype,
//! IPv4 to L4 by protocol number). Each registry is populated exactly once,
//! inside the `OnceLock` initializer of the layer that owns it, and is
//! read-only afterwards, so concurrent `from_bytes` calls can share it
//! without locking.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use framegold_core::Result;
use tracing::{debug, trace, warn};

/// A payload decoder: parses the bytes that follow a layer's header into
/// that layer's payload representation.
pub type Decoder<P> = fn(&[u8]) -> Result<P>;

/// Append-only mapping from a protocol identifier to the decoder for
/// payloads carrying that identifier.
pub struct FrameRegistry<K, P> {
    decoders: HashMap<K, Decoder<P>>,
}

impl<K, P> FrameRegistry<K, P>
where
    K: Eq + Hash + Copy + Debug,
{
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register a decoder for a protocol identifier.
    ///
    /// The first registration for an identifier wins; a duplicate is
    /// logged and ignored.
    pub fn register(&mut self, id: K, decoder: Decoder<P>) {
        match self.decoders.entry(id) {
            std::collections::hash_map::Entry::Occupied(_) => {
                warn!(id = ?id, "payload decoder already registered, keeping first");
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(decoder);
                debug!(id = ?id, "registered payload decoder");
            }
        }
    }

    /// Run the decoder registered for `id` over `data`.
    ///
    /// Returns `None` when no decoder is registered: an unrecognized
    /// protocol identifier is not an error, the caller keeps the payload
    /// as raw bytes.
    pub fn decode(&self, id: K, data: &[u8]) -> Option<Result<P>> {
        match self.decoders.get(&id) {
            Some(decoder) => Some(decoder(data)),
            None => {
                trace!(id = ?id, "no payload decoder registered, leaving payload raw");
                None
            }
        }
    }

    /// Check whether a decoder is registered for `id`
    pub fn contains(&self, id: K) -> bool {
        self.decoders.contains_key(&id)
    }

    /// Number of registered decoders
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl<K, P> Default for FrameRegistry<K, P>
where
    K: Eq + Hash + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
