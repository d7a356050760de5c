#![forbid(unsafe_code)]

use crate::discovery::DiscoveryEngine;
use crate::error::Error;
use crate::transport::Transport;
use config::FanMode;
use std::net::SocketAddr;
use tracing::{debug, info};

/// Outcome of a mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The mode changed and its command went to the host.
    Sent {
        command: &'static str,
        to: SocketAddr,
        delivered: bool,
    },
    /// The mode changed locally; there is no host to tell.
    Stored,
    /// The mode was already selected.
    Unchanged,
}

/// Edge-triggered fan mode commands.
#[derive(Debug)]
pub struct CommandDispatcher {
    mode: FanMode,
}

impl CommandDispatcher {
    pub fn new(initial: FanMode) -> Self {
        Self { mode: initial }
    }

    pub fn mode(&self) -> FanMode {
        self.mode
    }

    /// Select mode `index`. A command goes out only when the mode actually
    /// changes and the host is known. Unknown indices change nothing.
    pub fn on_mode_selected(
        &mut self,
        index: usize,
        discovery: &DiscoveryEngine,
        transport: &mut dyn Transport,
    ) -> Result<Dispatch, Error> {
        let mode = FanMode::from_index(index).ok_or(Error::UnknownMode(index))?;
        if mode == self.mode {
            return Ok(Dispatch::Unchanged);
        }
        self.mode = mode;

        match (discovery.is_connected(), discovery.endpoint()) {
            (true, Some(to)) => {
                let command = mode.command();
                let delivered = transport.send(command.as_bytes(), to);
                info!(%mode, command, %to, delivered, "fan mode sent");
                Ok(Dispatch::Sent {
                    command,
                    to,
                    delivered,
                })
            }
            _ => {
                debug!(%mode, "fan mode stored, host not connected");
                Ok(Dispatch::Stored)
            }
        }
    }
}
