#![forbid(unsafe_code)]

//! Datagram transports. A transport moves bytes and nothing else: it never
//! interprets payloads and never surfaces errors beyond a send flag.

mod broadcast;
mod memory;
mod offline;
mod udp;

pub use broadcast::{local_broadcast, subnet_broadcast};
pub use memory::{MemoryPeer, MemoryTransport};
pub use offline::OfflineTransport;
pub use udp::UdpTransport;

use std::net::SocketAddr;

/// One received datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub payload: Vec<u8>,
    pub from: SocketAddr,
}

impl Datagram {
    /// Build a datagram as it would arrive through a receive frame of
    /// `frame_len` bytes: anything past `frame_len - 1` is cut, leaving room
    /// for the terminator.
    pub fn framed(mut payload: Vec<u8>, from: SocketAddr, frame_len: usize) -> Self {
        payload.truncate(frame_len.saturating_sub(1));
        Self { payload, from }
    }
}

pub trait Transport: Send {
    /// Best-effort, non-blocking send. `false` means the datagram was
    /// dropped.
    fn send(&mut self, payload: &[u8], to: SocketAddr) -> bool;

    /// Oldest pending datagram, if any. Never blocks.
    fn poll_receive(&mut self) -> Option<Datagram>;

    /// Destination for discovery probes, `None` when broadcasting is off.
    fn broadcast_addr(&self) -> Option<SocketAddr>;
}
