// Capture input module
//
// Reads previously captured frames one at a time. End of stream is reported
// as `Ok(None)`, distinct from a read failure.

use pcap_file::pcap::PcapReader;
use pcap_file::{DataLink, PcapError};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Link layer framing of the captured bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Ethernet II (optionally VLAN tagged)
    Ethernet,
    /// Bare IP packet without link header
    RawIp,
}

impl LinkKind {
    fn from_datalink(datalink: DataLink) -> Option<Self> {
        match datalink {
            DataLink::ETHERNET => Some(LinkKind::Ethernet),
            DataLink::RAW | DataLink::IPV4 => Some(LinkKind::RawIp),
            _ => None,
        }
    }
}

/// One captured link-layer record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Capture timestamp, relative to the Unix epoch
    pub timestamp: Duration,
    pub data: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("cannot open capture: {0}")]
    Open(#[from] io::Error),

    #[error("invalid capture header: {0}")]
    Header(#[source] PcapError),

    #[error("unsupported link type {0:?} (expected Ethernet or raw IP)")]
    UnsupportedLink(DataLink),

    #[error("failed to read frame: {0}")]
    Read(#[source] PcapError),
}

/// Pull-one-frame contract consumed by the render loop
pub trait FrameSource {
    /// Next frame, or `Ok(None)` once the stream is exhausted
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError>;

    /// Framing of every frame this source yields
    fn link(&self) -> LinkKind;
}

/// Frame source over the classic pcap container
pub struct PcapFileSource<R: Read> {
    reader: PcapReader<R>,
    link: LinkKind,
}

impl PcapFileSource<BufReader<File>> {
    /// Open a capture file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> PcapFileSource<R> {
    pub fn new(reader: R) -> Result<Self, CaptureError> {
        let reader = PcapReader::new(reader).map_err(CaptureError::Header)?;
        let datalink = reader.header().datalink;
        let link =
            LinkKind::from_datalink(datalink).ok_or(CaptureError::UnsupportedLink(datalink))?;

        Ok(Self { reader, link })
    }
}

impl<R: Read> FrameSource for PcapFileSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
        match self.reader.next_packet() {
            None => Ok(None),
            Some(Ok(packet)) => Ok(Some(Frame {
                timestamp: packet.timestamp,
                data: packet.data.into_owned(),
            })),
            Some(Err(e)) => Err(CaptureError::Read(e)),
        }
    }

    fn link(&self) -> LinkKind {
        self.link
    }
}

/// In-memory source used by the render loop tests
#[cfg(test)]
pub(crate) struct VecSource {
    frames: std::collections::VecDeque<Frame>,
    link: LinkKind,
}

#[cfg(test)]
impl VecSource {
    pub(crate) fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            link: LinkKind::Ethernet,
        }
    }
}

#[cfg(test)]
impl FrameSource for VecSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
        Ok(self.frames.pop_front())
    }

    fn link(&self) -> LinkKind {
        self.link
    }
}
