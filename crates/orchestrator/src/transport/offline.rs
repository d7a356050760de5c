#![forbid(unsafe_code)]

use super::{Datagram, Transport};
use std::net::SocketAddr;

/// Stand-in used when the socket could not be set up. Drops every send and
/// never receives, so the client keeps running on default telemetry.
#[derive(Debug, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn send(&mut self, _payload: &[u8], _to: SocketAddr) -> bool {
        false
    }

    fn poll_receive(&mut self) -> Option<Datagram> {
        None
    }

    fn broadcast_addr(&self) -> Option<SocketAddr> {
        None
    }
}
