//! Example: Building an ARP request
//!
//! This example demonstrates building a broadcast ARP request, serializing
//! it, and parsing it back from the wire bytes.

use std::net::Ipv4Addr;

use framegold_packet::arp::ArpFrame;
use framegold_packet::ethernet::EthernetFrame;
use framegold_packet::{ethertypes, Frame, MacAddr};

fn main() {
    let sender_mac = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
    let sender_ip = Ipv4Addr::new(192, 168, 1, 10);
    let target_ip = Ipv4Addr::new(192, 168, 1, 1);

    let arp = ArpFrame::request(sender_mac, sender_ip, target_ip);
    let frame = EthernetFrame::new(MacAddr::BROADCAST, sender_mac, ethertypes::ARP, arp);

    let bytes = frame.to_bytes();

    println!("ARP request built successfully!");
    println!("Total size: {} bytes", bytes.len());
    println!("Ethernet header: {:02X?}", &bytes[..14]);
    println!("ARP body: {:02X?}", &bytes[14..]);

    let parsed = EthernetFrame::from_bytes(&bytes).expect("Failed to parse ARP frame");
    println!("Parsed back: {:?}", parsed.payload);
}
