//! The frame capability shared by every codec layer

use crate::error::Result;

/// A type that can be serialized to and parsed from a flat byte buffer.
///
/// Every concrete frame (Ethernet, ARP, IPv4, UDP, DHCP) implements this.
/// `to_bytes` always succeeds for a structurally valid instance: field
/// values are checked against their declared widths when the frame is
/// constructed, never at serialize time. `from_bytes` is the inverse and
/// surfaces the typed failures in [`crate::Error`].
pub trait Frame: Sized {
    /// Serialize the frame, depth-first, into a flat byte buffer
    fn to_bytes(&self) -> Vec<u8>;

    /// Parse a frame from a byte buffer, recursively decoding the payload
    /// when a decoder is registered for its protocol identifier
    fn from_bytes(data: &[u8]) -> Result<Self>;

    /// Serialized length in bytes
    fn wire_len(&self) -> usize {
        self.to_bytes().len()
    }
}
