//! IPv4 frame construction and parsing
//!
//! Header IPV4 Description (20 bytes)
//! |-------------|-------------|-------------|-------------|
//! | Vers.  IHL  |     ToS     |        Total Length       |
//! |-------------|-------------|-------------|-------------|
//! |         Frame Id          |Flg|      Frag offset      |
//! |-------------|-------------|-------------|-------------|
//! |     TTL     |   Protocol  |      Header Checksum      |
//! |-------------|-------------|-------------|-------------|
//! |                       IP Source                       |
//! |-------------|-------------|-------------|-------------|
//! |                     IP Destination                    |
//! |-------------|-------------|-------------|-------------|
//!
//! Version, IHL and ToS are fixed constants: options are never emitted, so
//! the header is always exactly 20 bytes. The header checksum is derived
//! state, recomputed on every serialize and re-verified on every parse.

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use bytes::{BufMut, BytesMut};
use framegold_core::{Error, Frame, Result};
use tracing::warn;

use crate::checksum::internet_checksum;
use crate::registry::FrameRegistry;
use crate::udp::UdpFrame;

/// Header version, fixed
pub const IPV4_HEADER_VERSION: u8 = 4;

/// Header length in 32-bit words, fixed (no options)
pub const IPV4_HEADER_WORDS: u8 = 5;

/// Default time-to-live
pub const IPV4_TTL_DEFAULT: u8 = 100;

/// IP protocol numbers carried in the sub-protocol field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    /// ICMPv4 (1)
    ICMPv4,
    /// IGMP (2)
    IGMP,
    /// TCP (6)
    TCP,
    /// UDP (17)
    UDP,
    /// Any other protocol number
    Custom(u8),
}

impl IpProtocol {
    pub fn to_u8(self) -> u8 {
        match self {
            IpProtocol::ICMPv4 => 1,
            IpProtocol::IGMP => 2,
            IpProtocol::TCP => 6,
            IpProtocol::UDP => 17,
            IpProtocol::Custom(value) => value,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => IpProtocol::ICMPv4,
            2 => IpProtocol::IGMP,
            6 => IpProtocol::TCP,
            17 => IpProtocol::UDP,
            value => IpProtocol::Custom(value),
        }
    }
}

/// Payload of an IPv4 frame: a decoded upper-layer frame, or raw bytes when
/// no decoder is registered for the protocol number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpPayload {
    Udp(UdpFrame),
    Raw(Vec<u8>),
}

impl IpPayload {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            IpPayload::Udp(frame) => frame.to_bytes(),
            IpPayload::Raw(bytes) => bytes.clone(),
        }
    }

    pub fn wire_len(&self) -> usize {
        match self {
            IpPayload::Udp(frame) => frame.wire_len(),
            IpPayload::Raw(bytes) => bytes.len(),
        }
    }
}

impl From<UdpFrame> for IpPayload {
    fn from(frame: UdpFrame) -> Self {
        IpPayload::Udp(frame)
    }
}

impl From<Vec<u8>> for IpPayload {
    fn from(bytes: Vec<u8>) -> Self {
        IpPayload::Raw(bytes)
    }
}

/// The IPv4-to-L4 decoder registry, populated once on first use
fn l4_registry() -> &'static FrameRegistry<u8, IpPayload> {
    static REGISTRY: OnceLock<FrameRegistry<u8, IpPayload>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = FrameRegistry::new();
        registry.register(IpProtocol::UDP.to_u8(), |data| {
            Ok(IpPayload::Udp(UdpFrame::from_bytes(data)?))
        });
        registry
    })
}

/// IPv4 frame
///
/// The fragmentation fields are kept private so their bit widths (3-bit
/// flags, 13-bit offset in 8-byte units) hold for every constructed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Frame {
    /// Identification field
    pub frame_id: u16,
    /// Upper-layer protocol number
    pub sub_protocol: IpProtocol,
    /// Source address
    pub ip_src: Ipv4Addr,
    /// Destination address
    pub ip_dest: Ipv4Addr,
    /// Payload
    pub payload: IpPayload,
    /// Time to live
    pub ttl: u8,
    frag_flags: u8,
    frag_offset: u16,
}

impl Ipv4Frame {
    /// Header size in bytes, fixed
    pub const HEADER_SIZE: usize = 20;

    /// Largest payload the 16-bit total-length field can express
    pub const MAX_PAYLOAD: usize = u16::MAX as usize - Self::HEADER_SIZE;

    /// Maximum value of the fragmentation flags field (3 bits)
    pub const FRAG_FLAGS_MAX: u8 = 0b111;

    /// Maximum value of the fragment offset field (13 bits)
    pub const FRAG_OFFSET_MAX: u16 = 0x1FFF;

    /// Create a new IPv4 frame with default TTL and no fragmentation.
    ///
    /// Fails with a value constraint when the payload cannot be expressed
    /// by the 16-bit total-length field.
    pub fn new(
        frame_id: u16,
        sub_protocol: IpProtocol,
        ip_src: Ipv4Addr,
        ip_dest: Ipv4Addr,
        payload: impl Into<IpPayload>,
    ) -> Result<Self> {
        let payload = payload.into();
        if payload.wire_len() > Self::MAX_PAYLOAD {
            return Err(Error::value_constraint(
                "total length",
                (Self::HEADER_SIZE + payload.wire_len()) as u64,
                u16::MAX as u64,
            ));
        }

        Ok(Self {
            frame_id,
            sub_protocol,
            ip_src,
            ip_dest,
            payload,
            ttl: IPV4_TTL_DEFAULT,
            frag_flags: 0,
            frag_offset: 0,
        })
    }

    /// Set the time-to-live
    pub fn with_ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the fragmentation fields.
    ///
    /// Fails with a value constraint when the flags exceed 3 bits or the
    /// offset exceeds 13 bits.
    pub fn with_fragmentation(mut self, frag_flags: u8, frag_offset: u16) -> Result<Self> {
        if frag_flags > Self::FRAG_FLAGS_MAX {
            return Err(Error::value_constraint(
                "frag_flags",
                frag_flags as u64,
                Self::FRAG_FLAGS_MAX as u64,
            ));
        }
        if frag_offset > Self::FRAG_OFFSET_MAX {
            return Err(Error::value_constraint(
                "frag_offset",
                frag_offset as u64,
                Self::FRAG_OFFSET_MAX as u64,
            ));
        }

        self.frag_flags = frag_flags;
        self.frag_offset = frag_offset;
        Ok(self)
    }

    /// Fragmentation flags (3 bits)
    pub fn frag_flags(&self) -> u8 {
        self.frag_flags
    }

    /// Fragment offset in 8-byte units (13 bits)
    pub fn frag_offset(&self) -> u16 {
        self.frag_offset
    }

    /// Build the 20-byte header with the checksum field zeroed
    fn header_with_zero_checksum(&self, payload_len: usize) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::HEADER_SIZE);

        buf.put_u8((IPV4_HEADER_VERSION << 4) | IPV4_HEADER_WORDS);
        buf.put_u8(0); // type of service, fixed
        buf.put_u16((Self::HEADER_SIZE + payload_len) as u16);
        buf.put_u16(self.frame_id);
        buf.put_u16(((self.frag_flags as u16) << 13) | (self.frag_offset & 0x1FFF));
        buf.put_u8(self.ttl);
        buf.put_u8(self.sub_protocol.to_u8());
        buf.put_u16(0); // checksum, spliced in after computation
        buf.put_slice(&self.ip_src.octets());
        buf.put_slice(&self.ip_dest.octets());

        buf.to_vec()
    }
}

impl Frame for Ipv4Frame {
    fn to_bytes(&self) -> Vec<u8> {
        let payload = self.payload.to_bytes();

        let mut bytes = self.header_with_zero_checksum(payload.len());
        let checksum = internet_checksum(&bytes);
        bytes[10..12].copy_from_slice(&checksum.to_be_bytes());

        bytes.extend_from_slice(&payload);
        bytes
    }

    fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated("IPv4", Self::HEADER_SIZE, data.len()));
        }

        let frame_id = u16::from_be_bytes([data[4], data[5]]);
        let flags_and_offset = u16::from_be_bytes([data[6], data[7]]);
        let frag_flags = (flags_and_offset >> 13) as u8;
        let frag_offset = flags_and_offset & 0x1FFF;
        let ttl = data[8];
        let sub_protocol = IpProtocol::from_u8(data[9]);
        let wire_checksum = u16::from_be_bytes([data[10], data[11]]);

        let mut header = data[..Self::HEADER_SIZE].to_vec();
        header[10] = 0;
        header[11] = 0;
        let computed = internet_checksum(&header);
        if computed != wire_checksum {
            warn!(
                wire = wire_checksum,
                computed, "IPv4 header checksum mismatch"
            );
            return Err(Error::ChecksumMismatch {
                wire: wire_checksum,
                computed,
            });
        }

        let ip_src = Ipv4Addr::new(data[12], data[13], data[14], data[15]);
        let ip_dest = Ipv4Addr::new(data[16], data[17], data[18], data[19]);

        let rest = &data[Self::HEADER_SIZE..];
        let payload = match l4_registry().decode(sub_protocol.to_u8(), rest) {
            Some(decoded) => decoded?,
            None => IpPayload::Raw(rest.to_vec()),
        };

        Ok(Self {
            frame_id,
            sub_protocol,
            ip_src,
            ip_dest,
            payload,
            ttl,
            frag_flags,
            frag_offset,
        })
    }

    fn wire_len(&self) -> usize {
        Self::HEADER_SIZE + self.payload.wire_len()
    }
}
