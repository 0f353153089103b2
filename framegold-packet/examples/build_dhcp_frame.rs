//! Example: Building a DHCP frame
//!
//! This example demonstrates building a DHCP frame with opaque option
//! bytes and carrying it as the payload of a UDP broadcast.

use std::net::Ipv4Addr;

use framegold_packet::dhcp::{DhcpFrame, DHCP_BROADCAST_FLAG, DHCP_CLIENT_PORT, DHCP_SERVER_PORT};
use framegold_packet::ipv4::{IpProtocol, Ipv4Frame};
use framegold_packet::udp::UdpFrame;
use framegold_packet::{Frame, MacAddr};

fn main() {
    let client_mac = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

    // Option bytes travel as an opaque range; the codec does not
    // interpret the TLV structure.
    let options = vec![0x35, 0x01, 0x01, 0xFF];

    let dhcp = DhcpFrame::new()
        .with_xid(0xDEADBEEF)
        .with_chaddr(client_mac)
        .with_flags(DHCP_BROADCAST_FLAG)
        .with_options(options);

    let udp = UdpFrame::new(DHCP_CLIENT_PORT, DHCP_SERVER_PORT, dhcp.to_bytes())
        .expect("payload fits");
    let ipv4 = Ipv4Frame::new(
        0,
        IpProtocol::UDP,
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::BROADCAST,
        udp,
    )
    .expect("payload fits");

    let bytes = ipv4.to_bytes();

    println!("DHCP frame built successfully!");
    println!("Total size: {} bytes", bytes.len());
    println!("DHCP prefix size: {} bytes", DhcpFrame::PREFIX_SIZE);
    println!("Transaction ID: 0x{:08X}", dhcp.xid);
    println!("Client hardware address: {}", dhcp.chaddr);
}
