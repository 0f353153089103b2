//! DHCP frame construction and parsing
//!
//! Header DHCP Description (240 bytes + 4-byte magic cookie)
//!  0               1               2               3
//!  +===============+===============+===============+===============+
//!  |     op (1)    |   htype (1)   |   hlen (1)    |   hops (1)    |
//!  +---------------+---------------+---------------+---------------+
//!  |                            xid (4)                            |
//!  +-------------------------------+-------------------------------+
//!  |           secs (2)            |           flags (2)           |
//!  +-------------------------------+-------------------------------+
//!  |                          ciaddr  (4)                          |
//!  |                          yiaddr  (4)                          |
//!  |                          siaddr  (4)                          |
//!  |                          giaddr  (4)                          |
//!  |                          chaddr  (16)                         |
//!  |                          sname   (64)                         |
//!  |                          file    (128)                        |
//!  |                          MAGIC_COOKIE                         |
//!  |                   (more) options (variable)                   |
//!  +---------------------------------------------------------------+
//!
//! Only the first 6 bytes of the 16-byte chaddr field carry data; sname
//! and file are always emitted as zeros. Option TLV semantics are outside
//! the codec: options travel as an opaque byte range after the cookie.

use std::net::Ipv4Addr;

use bytes::{BufMut, BytesMut};
use framegold_core::{Error, Frame, MacAddr, Result};

/// Fixed header size in bytes (before the magic cookie)
pub const DHCP_HEADER_LEN: usize = 240;

/// DHCP magic cookie value
pub const DHCP_MAGIC_COOKIE: u32 = 0x63825363;

/// DHCP server port
pub const DHCP_SERVER_PORT: u16 = 67;

/// DHCP client port
pub const DHCP_CLIENT_PORT: u16 = 68;

/// Broadcast flag value
pub const DHCP_BROADCAST_FLAG: u16 = 0x8000;

/// BOOTREQUEST opcode
pub const BOOTREQUEST: u8 = 1;

/// BOOTREPLY opcode
pub const BOOTREPLY: u8 = 2;

/// Ethernet hardware type
pub const HTYPE_ETHERNET: u8 = 1;

/// Ethernet hardware address length
pub const HLEN_ETHERNET: u8 = 6;

/// DHCP frame (RFC 2131 fixed header, opaque options)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpFrame {
    /// Message op code (1 = BOOTREQUEST, 2 = BOOTREPLY)
    pub op: u8,
    /// Hardware address type
    pub htype: u8,
    /// Hardware address length
    pub hlen: u8,
    /// Hops
    pub hops: u8,
    /// Transaction ID
    pub xid: u32,
    /// Seconds elapsed since the client began acquisition
    pub secs: u16,
    /// Flags (broadcast bit)
    pub flags: u16,
    /// Client IP address
    pub ciaddr: Ipv4Addr,
    /// Your (client) IP address
    pub yiaddr: Ipv4Addr,
    /// Server IP address
    pub siaddr: Ipv4Addr,
    /// Gateway IP address
    pub giaddr: Ipv4Addr,
    /// Client hardware address, emitted in a 16-byte field with 10 bytes
    /// of zero padding
    pub chaddr: MacAddr,
    /// Options, appended verbatim after the magic cookie
    pub options: Vec<u8>,
}

impl DhcpFrame {
    /// Serialized size of the header-plus-cookie prefix
    pub const PREFIX_SIZE: usize = DHCP_HEADER_LEN + 4;

    /// Create a DHCP frame with zeroed fields and Ethernet defaults
    pub fn new() -> Self {
        Self {
            op: BOOTREQUEST,
            htype: HTYPE_ETHERNET,
            hlen: HLEN_ETHERNET,
            hops: 0,
            xid: 0,
            secs: 0,
            flags: 0,
            ciaddr: Ipv4Addr::UNSPECIFIED,
            yiaddr: Ipv4Addr::UNSPECIFIED,
            siaddr: Ipv4Addr::UNSPECIFIED,
            giaddr: Ipv4Addr::UNSPECIFIED,
            chaddr: MacAddr::ZERO,
            options: Vec::new(),
        }
    }

    /// Set the transaction ID
    pub fn with_xid(mut self, xid: u32) -> Self {
        self.xid = xid;
        self
    }

    /// Set the client hardware address
    pub fn with_chaddr(mut self, chaddr: MacAddr) -> Self {
        self.chaddr = chaddr;
        self
    }

    /// Set the flags field
    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Set the opaque options bytes
    pub fn with_options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }
}

impl Default for DhcpFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame for DhcpFrame {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::PREFIX_SIZE + self.options.len());

        buf.put_u8(self.op);
        buf.put_u8(self.htype);
        buf.put_u8(self.hlen);
        buf.put_u8(self.hops);
        buf.put_u32(self.xid);
        buf.put_u16(self.secs);
        buf.put_u16(self.flags);
        buf.put_slice(&self.ciaddr.octets());
        buf.put_slice(&self.yiaddr.octets());
        buf.put_slice(&self.siaddr.octets());
        buf.put_slice(&self.giaddr.octets());
        buf.put_slice(self.chaddr.as_bytes());
        buf.put_bytes(0, 10); // chaddr padding
        buf.put_bytes(0, 64); // sname, never populated
        buf.put_bytes(0, 128); // file, never populated
        buf.put_u32(DHCP_MAGIC_COOKIE);
        buf.put_slice(&self.options);

        buf.to_vec()
    }

    /// Parse a DHCP frame.
    ///
    /// Scalar fields are read at their fixed offsets; options are the
    /// bytes past the cookie. The cookie bytes themselves are skipped but
    /// not validated.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < DHCP_HEADER_LEN {
            return Err(Error::truncated("DHCP", DHCP_HEADER_LEN, data.len()));
        }

        let op = data[0];
        let htype = data[1];
        let hlen = data[2];
        let hops = data[3];
        let xid = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        let secs = u16::from_be_bytes([data[8], data[9]]);
        let flags = u16::from_be_bytes([data[10], data[11]]);

        let ciaddr = Ipv4Addr::new(data[12], data[13], data[14], data[15]);
        let yiaddr = Ipv4Addr::new(data[16], data[17], data[18], data[19]);
        let siaddr = Ipv4Addr::new(data[20], data[21], data[22], data[23]);
        let giaddr = Ipv4Addr::new(data[24], data[25], data[26], data[27]);

        let mut chaddr = [0u8; 6];
        chaddr.copy_from_slice(&data[28..34]);

        let options = data.get(Self::PREFIX_SIZE..).unwrap_or_default().to_vec();

        Ok(Self {
            op,
            htype,
            hlen,
            hops,
            xid,
            secs,
            flags,
            ciaddr,
            yiaddr,
            siaddr,
            giaddr,
            chaddr: MacAddr(chaddr),
            options,
        })
    }

    fn wire_len(&self) -> usize {
        Self::PREFIX_SIZE + self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DhcpFrame {
        DhcpFrame::new()
            .with_xid(0xDEADBEEF)
            .with_chaddr(MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]))
            .with_flags(DHCP_BROADCAST_FLAG)
            .with_options(vec![0x35, 0x01, 0x01, 0xFF])
    }

    #[test]
    fn test_dhcp_prefix_is_always_244_bytes() {
        let frame = sample_frame();
        let bytes = frame.to_bytes();

        assert_eq!(bytes.len(), DhcpFrame::PREFIX_SIZE + frame.options.len());
        assert_eq!(frame.wire_len(), bytes.len());

        let empty = DhcpFrame::new();
        assert_eq!(empty.to_bytes().len(), 244);
    }

    #[test]
    fn test_dhcp_field_offsets() {
        let bytes = sample_frame().to_bytes();

        assert_eq!(bytes[0], BOOTREQUEST);
        assert_eq!(bytes[1], HTYPE_ETHERNET);
        assert_eq!(bytes[2], HLEN_ETHERNET);
        assert_eq!(&bytes[4..8], &[0xDE, 0xAD, 0xBE, 0xEF]); // xid
        assert_eq!(&bytes[10..12], &[0x80, 0x00]); // flags
        assert_eq!(&bytes[28..34], &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]); // chaddr
    }

    #[test]
    fn test_dhcp_chaddr_padding_and_zero_fields() {
        let bytes = sample_frame().to_bytes();

        assert!(bytes[34..44].iter().all(|&b| b == 0)); // chaddr padding
        assert!(bytes[44..108].iter().all(|&b| b == 0)); // sname
        assert!(bytes[108..236].iter().all(|&b| b == 0)); // file
    }

    #[test]
    fn test_dhcp_magic_cookie_emitted() {
        let bytes = sample_frame().to_bytes();
        assert_eq!(&bytes[240..244], &[0x63, 0x82, 0x53, 0x63]);
    }

    #[test]
    fn test_dhcp_options_appended_verbatim() {
        let frame = sample_frame();
        let bytes = frame.to_bytes();
        assert_eq!(&bytes[244..], &frame.options[..]);
    }

    #[test]
    fn test_dhcp_roundtrip() {
        let frame = sample_frame();
        let parsed = DhcpFrame::from_bytes(&frame.to_bytes()).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_dhcp_roundtrip_empty_options() {
        let frame = DhcpFrame::new().with_xid(42);
        let parsed = DhcpFrame::from_bytes(&frame.to_bytes()).unwrap();
        assert_eq!(parsed, frame);
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn test_dhcp_truncated() {
        let err = DhcpFrame::from_bytes(&[0u8; 239]).unwrap_err();
        assert_eq!(
            err,
            Error::TruncatedFrame {
                frame: "DHCP",
                needed: 240,
                got: 239
            }
        );
    }

    // The cookie is deliberately not checked on decode.
    #[test]
    fn test_dhcp_parse_does_not_validate_magic_cookie() {
        let frame = sample_frame();
        let mut bytes = frame.to_bytes();
        bytes[240..244].copy_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let parsed = DhcpFrame::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, frame);
    }
}
