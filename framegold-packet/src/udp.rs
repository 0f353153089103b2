//! UDP frame construction and parsing
//!
//! Header UDP Description (8 bytes)
//!  |-------------|-------------|-------------|-------------|
//!  |          Port SRC         |        Port DEST          |
//!  |-------------|-------------|-------------|-------------|
//!  |       Size of frame       |    Checksum (optional)    |
//!  |-------------|-------------|-------------|-------------|
//!
//! The checksum is always emitted as zero (the optional-checksum
//! convention); the offload core under verification never computes it.

use bytes::{BufMut, BytesMut};
use framegold_core::{Error, Frame, Result};

/// UDP frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpFrame {
    /// Source port
    pub src_port: u16,
    /// Destination port
    pub dst_port: u16,
    /// Payload data
    pub payload: Vec<u8>,
}

impl UdpFrame {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = 8;

    /// Largest payload the 16-bit length field can express
    pub const MAX_PAYLOAD: usize = u16::MAX as usize - Self::HEADER_SIZE;

    /// Create a new UDP frame.
    ///
    /// Fails with a value constraint when the payload cannot be expressed
    /// by the 16-bit length field.
    pub fn new(src_port: u16, dst_port: u16, payload: Vec<u8>) -> Result<Self> {
        if payload.len() > Self::MAX_PAYLOAD {
            return Err(Error::value_constraint(
                "udp length",
                (Self::HEADER_SIZE + payload.len()) as u64,
                u16::MAX as u64,
            ));
        }

        Ok(Self {
            src_port,
            dst_port,
            payload,
        })
    }
}

impl Frame for UdpFrame {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());

        buf.put_u16(self.src_port);
        buf.put_u16(self.dst_port);
        buf.put_u16((Self::HEADER_SIZE + self.payload.len()) as u16);
        buf.put_u16(0); // checksum disabled
        buf.put_slice(&self.payload);

        buf.to_vec()
    }

    /// Parse a UDP frame.
    ///
    /// The payload is everything past the 8-byte header; the length field
    /// is not used to bound it, so trailing bytes are kept.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated("UDP", Self::HEADER_SIZE, data.len()));
        }

        let src_port = u16::from_be_bytes([data[0], data[1]]);
        let dst_port = u16::from_be_bytes([data[2], data[3]]);
        let payload = data[Self::HEADER_SIZE..].to_vec();

        Ok(Self {
            src_port,
            dst_port,
            payload,
        })
    }

    fn wire_len(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }
}
