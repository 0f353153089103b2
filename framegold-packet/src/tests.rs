//! Cross-layer scenario tests exercising the full frame stack

use std::net::Ipv4Addr;

use crate::arp::ArpFrame;
use crate::dhcp::{DhcpFrame, DHCP_CLIENT_PORT, DHCP_SERVER_PORT};
use crate::ethernet::{EtherPayload, EthernetFrame};
use crate::ipv4::{IpPayload, IpProtocol, Ipv4Frame};
use crate::udp::UdpFrame;
use framegold_core::{ethertypes, Error, Frame, MacAddr};

#[test]
fn arp_broadcast_serializes_byte_for_byte() {
    let sender = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
    let arp = ArpFrame::request(
        sender,
        Ipv4Addr::new(192, 168, 1, 10),
        Ipv4Addr::new(192, 168, 1, 1),
    );
    let frame = EthernetFrame::new(MacAddr::BROADCAST, sender, ethertypes::ARP, arp);

    let bytes = frame.to_bytes();
    assert_eq!(
        bytes,
        vec![
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // dst mac
            0x11, 0x22, 0x33, 0x44, 0x55, 0x66, // src mac
            0x08, 0x06, // ethertype
            0x00, 0x01, // hardware type
            0x08, 0x00, // protocol type
            0x06, // hardware length
            0x04, // protocol length
            0x00, 0x01, // opcode
            0x11, 0x22, 0x33, 0x44, 0x55, 0x66, // sender hw
            0xC0, 0xA8, 0x01, 0x0A, // sender ip
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // target hw
            0xC0, 0xA8, 0x01, 0x01, // target ip
        ]
    );
}

#[test]
fn ipv4_udp_scenario_checksum_and_fields() {
    let udp = UdpFrame::new(0x1234, 0x5678, b"AB".to_vec()).unwrap();
    let frame = Ipv4Frame::new(
        1,
        IpProtocol::UDP,
        Ipv4Addr::new(192, 168, 1, 1),
        Ipv4Addr::new(192, 168, 1, 10),
        udp,
    )
    .unwrap();

    let bytes = frame.to_bytes();
    assert_eq!(bytes.len(), 30);

    // Header words sum to 0x2C8D after folding; the complement lands in
    // bytes 10-11.
    assert_eq!(&bytes[10..12], &[0xD3, 0x72]);
    assert!(crate::checksum::verify_checksum(&bytes[..20]));

    let parsed = Ipv4Frame::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.sub_protocol, IpProtocol::UDP);
    match parsed.payload {
        IpPayload::Udp(inner) => {
            assert_eq!(inner.src_port, 0x1234);
            assert_eq!(inner.dst_port, 0x5678);
            assert_eq!(inner.payload, b"AB".to_vec());
        }
        IpPayload::Raw(_) => panic!("UDP payload was not dispatched"),
    }
}

#[test]
fn three_layer_nest_roundtrips() {
    let udp = UdpFrame::new(40000, 40001, vec![0xA0, 0xA1, 0xA2]).unwrap();
    let ipv4 = Ipv4Frame::new(
        0x0102,
        IpProtocol::UDP,
        Ipv4Addr::new(10, 1, 2, 3),
        Ipv4Addr::new(10, 1, 2, 4),
        udp,
    )
    .unwrap()
    .with_ttl(7)
    .with_fragmentation(0b001, 0x0044)
    .unwrap();
    let frame = EthernetFrame::new(
        MacAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
        MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
        ethertypes::IPV4,
        ipv4,
    );

    let bytes = frame.to_bytes();
    assert_eq!(bytes.len(), 14 + 20 + 8 + 3);

    let parsed = EthernetFrame::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, frame);
}

#[test]
fn any_single_header_bit_flip_fails_ipv4_parse() {
    let udp = UdpFrame::new(0x1234, 0x5678, b"AB".to_vec()).unwrap();
    let frame = Ipv4Frame::new(
        1,
        IpProtocol::UDP,
        Ipv4Addr::new(192, 168, 1, 1),
        Ipv4Addr::new(192, 168, 1, 10),
        udp,
    )
    .unwrap();
    let bytes = frame.to_bytes();

    for byte in 0..Ipv4Frame::HEADER_SIZE {
        for bit in 0..8 {
            let mut corrupted = bytes.clone();
            corrupted[byte] ^= 1 << bit;

            let err = Ipv4Frame::from_bytes(&corrupted).unwrap_err();
            assert!(
                matches!(err, Error::ChecksumMismatch { .. }),
                "flip of byte {byte} bit {bit} was not caught"
            );
        }
    }
}

#[test]
fn dhcp_travels_opaque_inside_udp() {
    // The harness carries DHCP as the UDP payload and decodes it
    // explicitly; the codec never registers DHCP in a registry.
    let dhcp = DhcpFrame::new()
        .with_xid(0x01020304)
        .with_chaddr(MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]))
        .with_options(vec![0x35, 0x01, 0x01, 0xFF]);
    let udp = UdpFrame::new(DHCP_CLIENT_PORT, DHCP_SERVER_PORT, dhcp.to_bytes()).unwrap();
    let ipv4 = Ipv4Frame::new(
        9,
        IpProtocol::UDP,
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::BROADCAST,
        udp,
    )
    .unwrap();

    let parsed = Ipv4Frame::from_bytes(&ipv4.to_bytes()).unwrap();
    let inner = match parsed.payload {
        IpPayload::Udp(inner) => inner,
        IpPayload::Raw(_) => panic!("UDP payload was not dispatched"),
    };

    let recovered = DhcpFrame::from_bytes(&inner.payload).unwrap();
    assert_eq!(recovered, dhcp);
}

#[test]
fn raw_ethertype_payload_survives_unchanged() {
    let body: Vec<u8> = (0u8..64).collect();
    let frame = EthernetFrame::new(MacAddr::BROADCAST, MacAddr::ZERO, 0x1234, body.clone());

    let parsed = EthernetFrame::from_bytes(&frame.to_bytes()).unwrap();
    match parsed.payload {
        EtherPayload::Raw(bytes) => assert_eq!(bytes, body),
        other => panic!("expected raw payload, got {other:?}"),
    }
}
