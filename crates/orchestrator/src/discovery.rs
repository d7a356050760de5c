#![forbid(unsafe_code)]

use crate::transport::{Datagram, Transport};
use std::net::SocketAddr;
use tracing::{debug, info, trace, warn};

/// Broadcast probe sent while searching.
pub const DISCOVER: &[u8] = b"DISCOVER";
/// Unicast keep-alive sent once connected.
pub const PING: &[u8] = b"PING";

const ANNOUNCEMENT: &[u8] = b"SERVER";
const ACK_OK: &[u8] = b"FAN_OK:";
const ACK_ERR: &[u8] = b"FAN_ERR:";

/// Protocol phase. Only ever moves forward; `Connected` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryState {
    #[default]
    Idle,
    Searching,
    Connected,
}

/// What an inbound payload turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound<'a> {
    /// Host announcement (`SERVER...`).
    Announcement,
    /// Status report, handed on to the telemetry parser.
    Status(&'a [u8]),
    /// Host reply to a fan command.
    CommandAck { accepted: bool, detail: String },
    Unrecognized,
}

impl<'a> Inbound<'a> {
    pub fn classify(payload: &'a [u8]) -> Self {
        if payload.starts_with(ANNOUNCEMENT) {
            Inbound::Announcement
        } else if telemetry::is_status(payload) {
            Inbound::Status(payload)
        } else if let Some(detail) = payload.strip_prefix(ACK_OK) {
            Inbound::CommandAck {
                accepted: true,
                detail: String::from_utf8_lossy(detail).into_owned(),
            }
        } else if let Some(detail) = payload.strip_prefix(ACK_ERR) {
            Inbound::CommandAck {
                accepted: false,
                detail: String::from_utf8_lossy(detail).into_owned(),
            }
        } else {
            Inbound::Unrecognized
        }
    }
}

/// A heartbeat that came due this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    pub payload: &'static [u8],
    pub to: SocketAddr,
    pub delivered: bool,
}

/// Discovery and heartbeat state machine.
#[derive(Debug)]
pub struct DiscoveryEngine {
    state: DiscoveryState,
    endpoint: Option<SocketAddr>,
    heartbeat_ticks: u32,
    ticks_since_heartbeat: u32,
    warned_no_broadcast: bool,
}

impl DiscoveryEngine {
    pub fn new(heartbeat_ticks: u32) -> Self {
        Self {
            state: DiscoveryState::Idle,
            endpoint: None,
            heartbeat_ticks: heartbeat_ticks.max(1),
            ticks_since_heartbeat: 0,
            warned_no_broadcast: false,
        }
    }

    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    /// Host recorded from the first announcement.
    pub fn endpoint(&self) -> Option<SocketAddr> {
        self.endpoint
    }

    pub fn is_connected(&self) -> bool {
        self.state == DiscoveryState::Connected
    }

    fn wake(&mut self) {
        if self.state == DiscoveryState::Idle {
            debug!("discovery searching");
            self.state = DiscoveryState::Searching;
        }
    }

    /// Count one tick and send the heartbeat if it is due.
    ///
    /// Searching broadcasts [`DISCOVER`]; connected sends [`PING`] to the
    /// recorded endpoint and never broadcasts.
    pub fn on_tick(&mut self, transport: &mut dyn Transport) -> Option<Heartbeat> {
        self.wake();
        self.ticks_since_heartbeat += 1;
        if self.ticks_since_heartbeat < self.heartbeat_ticks {
            return None;
        }
        self.ticks_since_heartbeat = 0;

        let (payload, to) = match (self.state, self.endpoint) {
            (DiscoveryState::Connected, Some(endpoint)) => (PING, endpoint),
            _ => match transport.broadcast_addr() {
                Some(broadcast) => (DISCOVER, broadcast),
                None => {
                    if !self.warned_no_broadcast {
                        warn!("no broadcast address, skipping discovery probe");
                        self.warned_no_broadcast = true;
                    }
                    return None;
                }
            },
        };

        let delivered = transport.send(payload, to);
        trace!(payload = %String::from_utf8_lossy(payload), %to, delivered, "heartbeat");
        Some(Heartbeat {
            payload,
            to,
            delivered,
        })
    }

    /// Classify a datagram and apply the announcement transition.
    pub fn on_datagram<'a>(&mut self, datagram: &'a Datagram) -> Inbound<'a> {
        self.wake();
        let inbound = Inbound::classify(&datagram.payload);
        match &inbound {
            Inbound::Announcement if self.state == DiscoveryState::Searching => {
                info!(endpoint = %datagram.from, "host discovered");
                self.endpoint = Some(datagram.from);
                self.state = DiscoveryState::Connected;
            }
            Inbound::Announcement => {
                debug!(from = %datagram.from, "repeat announcement ignored");
            }
            Inbound::CommandAck { accepted, detail } => {
                info!(accepted, %detail, "fan command acknowledged");
            }
            Inbound::Unrecognized => {
                debug!(from = %datagram.from, len = datagram.payload.len(), "unrecognized datagram");
            }
            Inbound::Status(_) => {}
        }
        inbound
    }
}
