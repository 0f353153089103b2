//! Example: Building a UDP frame
//!
//! This example demonstrates building a complete Ethernet/IPv4/UDP frame
//! tree and serializing it depth-first into wire bytes.

use std::net::Ipv4Addr;

use framegold_packet::ethernet::EthernetFrame;
use framegold_packet::ipv4::{IpProtocol, Ipv4Frame};
use framegold_packet::udp::UdpFrame;
use framegold_packet::{ethertypes, Frame, MacAddr};

fn main() {
    let src_mac = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    let dst_mac = MacAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    let src_ip = Ipv4Addr::new(192, 168, 1, 100);
    let dst_ip = Ipv4Addr::new(192, 168, 1, 1);

    let udp = UdpFrame::new(54321, 53, vec![0x12, 0x34, 0x01, 0x00]).expect("payload fits");
    let ipv4 = Ipv4Frame::new(1, IpProtocol::UDP, src_ip, dst_ip, udp)
        .expect("payload fits")
        .with_ttl(64);
    let frame = EthernetFrame::new(dst_mac, src_mac, ethertypes::IPV4, ipv4);

    let bytes = frame.to_bytes();

    println!("UDP frame built successfully!");
    println!("Total size: {} bytes", bytes.len());
    println!("IP version and header length: 0x{:02X}", bytes[14]);
    println!("IP protocol: {} (UDP)", bytes[23]);
    println!(
        "IP header checksum: 0x{:04X}",
        u16::from_be_bytes([bytes[24], bytes[25]])
    );
    println!(
        "UDP source port: {}",
        u16::from_be_bytes([bytes[34], bytes[35]])
    );
    println!(
        "UDP dest port: {}",
        u16::from_be_bytes([bytes[36], bytes[37]])
    );
}
