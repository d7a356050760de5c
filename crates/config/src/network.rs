#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Well-known UDP port shared by the host and the handheld.
pub const DEFAULT_PORT: u16 = 9001;

/// Fixed receive frame; longer datagrams are truncated.
pub const DEFAULT_RECV_FRAME_LEN: usize = 4096;

/// Smallest usable frame: a `SERVER` announcement plus its terminator.
pub const MIN_RECV_FRAME_LEN: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Network {
    /// UDP port used for discovery, heartbeats and status reports.
    pub port: u16,

    /// Local address to bind the socket to.
    pub bind_addr: IpAddr,

    /// Size of the receive frame in bytes.
    pub recv_frame_len: usize,

    /// Broadcast destination to use instead of the one derived from the
    /// local interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast_override: Option<Ipv4Addr>,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            recv_frame_len: DEFAULT_RECV_FRAME_LEN,
            broadcast_override: None,
        }
    }
}
