//! Ethernet frame construction and parsing
//!
//! Header MAC Description (14 bytes)
//! |------------------|------------------|-----------|
//! | Dest MAC Address | Src MAC Address  | EtherType |
//! |------------------|------------------|-----------|
//!
//! Decoding looks the ethertype up in the L3 registry and recursively
//! decodes the payload when a decoder is registered; otherwise the payload
//! is kept as raw bytes.

use std::sync::OnceLock;

use bytes::{BufMut, BytesMut};
use framegold_core::{ethertypes, Error, Frame, MacAddr, Result};

use crate::arp::ArpFrame;
use crate::ipv4::Ipv4Frame;
use crate::registry::FrameRegistry;

/// Payload of an Ethernet frame: a decoded L3 frame, or raw bytes when no
/// decoder is registered for the ethertype
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EtherPayload {
    Arp(ArpFrame),
    Ipv4(Ipv4Frame),
    Raw(Vec<u8>),
}

impl EtherPayload {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            EtherPayload::Arp(frame) => frame.to_bytes(),
            EtherPayload::Ipv4(frame) => frame.to_bytes(),
            EtherPayload::Raw(bytes) => bytes.clone(),
        }
    }

    pub fn wire_len(&self) -> usize {
        match self {
            EtherPayload::Arp(frame) => frame.wire_len(),
            EtherPayload::Ipv4(frame) => frame.wire_len(),
            EtherPayload::Raw(bytes) => bytes.len(),
        }
    }
}

impl From<ArpFrame> for EtherPayload {
    fn from(frame: ArpFrame) -> Self {
        EtherPayload::Arp(frame)
    }
}

impl From<Ipv4Frame> for EtherPayload {
    fn from(frame: Ipv4Frame) -> Self {
        EtherPayload::Ipv4(frame)
    }
}

impl From<Vec<u8>> for EtherPayload {
    fn from(bytes: Vec<u8>) -> Self {
        EtherPayload::Raw(bytes)
    }
}

/// The Ethernet-to-L3 decoder registry, populated once on first use
fn l3_registry() -> &'static FrameRegistry<u16, EtherPayload> {
    static REGISTRY: OnceLock<FrameRegistry<u16, EtherPayload>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = FrameRegistry::new();
        registry.register(ethertypes::ARP, |data| {
            Ok(EtherPayload::Arp(ArpFrame::from_bytes(data)?))
        });
        registry.register(ethertypes::IPV4, |data| {
            Ok(EtherPayload::Ipv4(Ipv4Frame::from_bytes(data)?))
        });
        registry
    })
}

/// Ethernet II frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub dst_mac: MacAddr,
    /// Source MAC address
    pub src_mac: MacAddr,
    /// EtherType
    pub ethertype: u16,
    /// Payload
    pub payload: EtherPayload,
}

impl EthernetFrame {
    /// Ethernet header size (dst + src + ethertype)
    pub const HEADER_SIZE: usize = 14;

    /// Create a new Ethernet frame
    pub fn new(
        dst_mac: MacAddr,
        src_mac: MacAddr,
        ethertype: u16,
        payload: impl Into<EtherPayload>,
    ) -> Self {
        Self {
            dst_mac,
            src_mac,
            ethertype,
            payload: payload.into(),
        }
    }
}

impl Frame for EthernetFrame {
    fn to_bytes(&self) -> Vec<u8> {
        let payload = self.payload.to_bytes();
        let mut buf = BytesMut::with_capacity(Self::HEADER_SIZE + payload.len());

        buf.put_slice(self.dst_mac.as_bytes());
        buf.put_slice(self.src_mac.as_bytes());
        buf.put_u16(self.ethertype);
        buf.put_slice(&payload);

        buf.to_vec()
    }

    fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated("Ethernet", Self::HEADER_SIZE, data.len()));
        }

        let mut dst = [0u8; 6];
        dst.copy_from_slice(&data[0..6]);
        let mut src = [0u8; 6];
        src.copy_from_slice(&data[6..12]);
        let ethertype = u16::from_be_bytes([data[12], data[13]]);

        let rest = &data[Self::HEADER_SIZE..];
        let payload = match l3_registry().decode(ethertype, rest) {
            Some(decoded) => decoded?,
            None => EtherPayload::Raw(rest.to_vec()),
        };

        Ok(Self {
            dst_mac: MacAddr(dst),
            src_mac: MacAddr(src),
            ethertype,
            payload,
        })
    }

    fn wire_len(&self) -> usize {
        Self::HEADER_SIZE + self.payload.wire_len()
    }
}
