//! ARP frame construction and parsing
//!
//! The codec models the Ethernet/IPv4 combination only, so the hardware
//! type, protocol type and address length fields are emitted constants
//! rather than stored fields. A serialized ARP frame is always 28 bytes.

use std::net::Ipv4Addr;

use bytes::{BufMut, BytesMut};
use framegold_core::{ethertypes, Error, Frame, MacAddr, Result};

/// Hardware type emitted in every frame (Ethernet)
pub const ARP_HW_TYPE: u16 = 1;

/// Hardware address length emitted in every frame (MAC)
pub const ARP_HW_ADDR_LEN: u8 = 6;

/// Protocol address length emitted in every frame (IPv4)
pub const ARP_PROTO_ADDR_LEN: u8 = 4;

/// ARP operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOpcode {
    /// ARP Request
    Request = 1,
    /// ARP Reply
    Reply = 2,
}

impl ArpOpcode {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Request),
            2 => Some(Self::Reply),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

/// ARP frame (Ethernet/IPv4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpFrame {
    /// Operation
    pub opcode: ArpOpcode,
    /// Sender hardware address
    pub sender_hw_addr: MacAddr,
    /// Sender protocol address
    pub sender_protocol_addr: Ipv4Addr,
    /// Target hardware address
    pub target_hw_addr: MacAddr,
    /// Target protocol address
    pub target_protocol_addr: Ipv4Addr,
}

impl ArpFrame {
    /// Serialized size, always fixed
    pub const WIRE_SIZE: usize = 28;

    /// Create an ARP request (target hardware address unknown, zeroed)
    pub fn request(sender_hw_addr: MacAddr, sender_ip: Ipv4Addr, target_ip: Ipv4Addr) -> Self {
        Self {
            opcode: ArpOpcode::Request,
            sender_hw_addr,
            sender_protocol_addr: sender_ip,
            target_hw_addr: MacAddr::ZERO,
            target_protocol_addr: target_ip,
        }
    }

    /// Create an ARP reply
    pub fn reply(
        sender_hw_addr: MacAddr,
        sender_ip: Ipv4Addr,
        target_hw_addr: MacAddr,
        target_ip: Ipv4Addr,
    ) -> Self {
        Self {
            opcode: ArpOpcode::Reply,
            sender_hw_addr,
            sender_protocol_addr: sender_ip,
            target_hw_addr,
            target_protocol_addr: target_ip,
        }
    }

    /// Check if this is a request
    pub fn is_request(&self) -> bool {
        self.opcode == ArpOpcode::Request
    }

    /// Check if this is a reply
    pub fn is_reply(&self) -> bool {
        self.opcode == ArpOpcode::Reply
    }
}

impl Frame for ArpFrame {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::WIRE_SIZE);

        buf.put_u16(ARP_HW_TYPE);
        buf.put_u16(ethertypes::IPV4);
        buf.put_u8(ARP_HW_ADDR_LEN);
        buf.put_u8(ARP_PROTO_ADDR_LEN);
        buf.put_u16(self.opcode.to_u16());
        buf.put_slice(self.sender_hw_addr.as_bytes());
        buf.put_slice(&self.sender_protocol_addr.octets());
        buf.put_slice(self.target_hw_addr.as_bytes());
        buf.put_slice(&self.target_protocol_addr.octets());

        buf.to_vec()
    }

    /// Parse an ARP frame from a buffer of at least 28 bytes.
    ///
    /// The fixed hardware-type/protocol-type/length constants are not
    /// re-validated; bytes beyond the 28-byte frame are ignored.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::WIRE_SIZE {
            return Err(Error::truncated("ARP", Self::WIRE_SIZE, data.len()));
        }

        let opcode_raw = u16::from_be_bytes([data[6], data[7]]);
        let opcode = ArpOpcode::from_u16(opcode_raw)
            .ok_or_else(|| Error::value_constraint("opcode", opcode_raw as u64, 2))?;

        let mut sender_hw = [0u8; 6];
        sender_hw.copy_from_slice(&data[8..14]);
        let sender_protocol_addr = Ipv4Addr::new(data[14], data[15], data[16], data[17]);

        let mut target_hw = [0u8; 6];
        target_hw.copy_from_slice(&data[18..24]);
        let target_protocol_addr = Ipv4Addr::new(data[24], data[25], data[26], data[27]);

        Ok(Self {
            opcode,
            sender_hw_addr: MacAddr(sender_hw),
            sender_protocol_addr,
            target_hw_addr: MacAddr(target_hw),
            target_protocol_addr,
        })
    }

    fn wire_len(&self) -> usize {
        Self::WIRE_SIZE
    }
}
