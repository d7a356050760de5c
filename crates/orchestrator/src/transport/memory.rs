#![forbid(unsafe_code)]

use super::{Datagram, Transport};
use flume::{Receiver, Sender};
use std::net::SocketAddr;

/// In-process transport. The paired [`MemoryPeer`] plays the remote side.
#[derive(Debug)]
pub struct MemoryTransport {
    inbound: Receiver<Datagram>,
    outbound: Sender<(Vec<u8>, SocketAddr)>,
    frame_len: usize,
    broadcast: Option<SocketAddr>,
}

#[derive(Debug, Clone)]
pub struct MemoryPeer {
    inbound: Sender<Datagram>,
    outbound: Receiver<(Vec<u8>, SocketAddr)>,
    frame_len: usize,
}

impl MemoryTransport {
    pub fn new(frame_len: usize, broadcast: Option<SocketAddr>) -> (Self, MemoryPeer) {
        let (in_tx, in_rx) = flume::unbounded();
        let (out_tx, out_rx) = flume::unbounded();
        (
            Self {
                inbound: in_rx,
                outbound: out_tx,
                frame_len,
                broadcast,
            },
            MemoryPeer {
                inbound: in_tx,
                outbound: out_rx,
                frame_len,
            },
        )
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, payload: &[u8], to: SocketAddr) -> bool {
        self.outbound.send((payload.to_vec(), to)).is_ok()
    }

    fn poll_receive(&mut self) -> Option<Datagram> {
        self.inbound.try_recv().ok()
    }

    fn broadcast_addr(&self) -> Option<SocketAddr> {
        self.broadcast
    }
}

impl MemoryPeer {
    /// Queue a datagram for the transport, framed like a real receive.
    pub fn deliver(&self, payload: impl Into<Vec<u8>>, from: SocketAddr) {
        let _ = self
            .inbound
            .send(Datagram::framed(payload.into(), from, self.frame_len));
    }

    /// Everything the transport sent since the last call.
    pub fn take_sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.outbound.try_iter().collect()
    }
}
