// Packet classification module
// Pure decoding of captured frames into flow identities, no side effects

use crate::capture::LinkKind;
use etherparse::{
    IpNumber, Ipv4Slice, NetSlice, SlicedPacket, TcpHeaderSlice, TransportSlice, UdpHeaderSlice,
};
use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

/// One side of a flow: IPv4 address and transport port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub addr: Ipv4Addr,
    pub port: u16,
}

impl Endpoint {
    pub fn new(addr: impl Into<Ipv4Addr>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

/// Directional flow identity: `src -> dst` and `dst -> src` are distinct keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowKey {
    pub src: Endpoint,
    pub dst: Endpoint,
}

impl FlowKey {
    pub fn new(src: Endpoint, dst: Endpoint) -> Self {
        Self { src, dst }
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// Why a frame produced no flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyOutcome {
    /// Header chain could not be decoded (truncated or inconsistent lengths)
    #[error("malformed frame: {0}")]
    Malformed(String),

    /// Decoded fine but not IPv4 carrying TCP or UDP
    #[error("not an IPv4 TCP/UDP frame")]
    Unsupported,
}

/// Classifier bound to the link layer of the capture it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    link: LinkKind,
}

impl Classifier {
    pub fn new(link: LinkKind) -> Self {
        Self { link }
    }

    /// Extract the flow key and transport segment length from one frame
    ///
    /// The length covers the whole TCP/UDP segment, header included. For the
    /// first fragment of a fragmented datagram it covers that fragment's part.
    pub fn classify(&self, frame: &[u8]) -> Result<(FlowKey, usize), ClassifyOutcome> {
        let packet = match self.link {
            LinkKind::Ethernet => SlicedPacket::from_ethernet(frame),
            LinkKind::RawIp => SlicedPacket::from_ip(frame),
        }
        .map_err(|e| ClassifyOutcome::Malformed(e.to_string()))?;

        let ipv4 = match &packet.net {
            Some(NetSlice::Ipv4(ipv4)) => ipv4,
            _ => return Err(ClassifyOutcome::Unsupported),
        };
        let header = ipv4.header();
        let (src_addr, dst_addr) = (header.source_addr(), header.destination_addr());

        let (src_port, dst_port, len) = match &packet.transport {
            Some(TransportSlice::Tcp(tcp)) => {
                (tcp.source_port(), tcp.destination_port(), tcp.slice().len())
            }
            Some(TransportSlice::Udp(udp)) => {
                (udp.source_port(), udp.destination_port(), udp.slice().len())
            }
            // Fragmented payloads are left unparsed by the slicer
            None if ipv4.payload().fragmented => first_fragment_ports(ipv4)?,
            _ => return Err(ClassifyOutcome::Unsupported),
        };

        let key = FlowKey::new(
            Endpoint::new(src_addr, src_port),
            Endpoint::new(dst_addr, dst_port),
        );
        Ok((key, len))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(LinkKind::Ethernet)
    }
}

/// Ports and length of a fragment that starts the transport segment
///
/// Only the offset-0 fragment carries the TCP/UDP header; its length is
/// the fragment's share of the segment.
fn first_fragment_ports(ipv4: &Ipv4Slice) -> Result<(u16, u16, usize), ClassifyOutcome> {
    if ipv4.header().fragments_offset().value() != 0 {
        return Err(ClassifyOutcome::Unsupported);
    }

    let payload = ipv4.payload();
    let (src_port, dst_port) = if payload.ip_number == IpNumber::TCP {
        let tcp = TcpHeaderSlice::from_slice(payload.payload)
            .map_err(|e| ClassifyOutcome::Malformed(e.to_string()))?;
        (tcp.source_port(), tcp.destination_port())
    } else if payload.ip_number == IpNumber::UDP {
        let udp = UdpHeaderSlice::from_slice(payload.payload)
            .map_err(|e| ClassifyOutcome::Malformed(e.to_string()))?;
        (udp.source_port(), udp.destination_port())
    } else {
        return Err(ClassifyOutcome::Unsupported);
    };

    Ok((src_port, dst_port, payload.payload.len()))
}

/// Classify an Ethernet frame
#[cfg(test)]
pub fn classify(frame: &[u8]) -> Result<(FlowKey, usize), ClassifyOutcome> {
    Classifier::default().classify(frame)
}
