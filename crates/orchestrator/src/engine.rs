#![forbid(unsafe_code)]

use crate::clock::Clock;
use crate::command::{CommandDispatcher, Dispatch};
use crate::discovery::{DiscoveryEngine, DiscoveryState, Heartbeat, Inbound};
use crate::error::Error;
use crate::render::{FrameSink, FrameView};
use crate::transport::Transport;
use config::Config;
use geometry::{FrameGeometryPipeline, FrameReader, FrameStats, SceneInputs, VERTEX_CAPACITY};
use std::net::SocketAddr;
use telemetry::{SnapshotStore, parse_status};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub struct Services {
    pub transport: Box<dyn Transport>,
    pub sink: Box<dyn FrameSink>,
    pub clock: Box<dyn Clock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Select fan mode by index.
    SelectMode(usize),
    /// Step to the next fan mode.
    CycleMode,
    /// Log a one-line status summary.
    ReportStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub state: DiscoveryState,
    pub heartbeat: Option<Heartbeat>,
    /// Sender of the datagram handled this tick.
    pub received: Option<SocketAddr>,
    /// Status fields merged this tick.
    pub merged_fields: usize,
    /// `None` when the frame could not be built; the previous one stays.
    pub frame: Option<FrameStats>,
}

pub struct Engine {
    config: Config,
    services: Services,
    discovery: DiscoveryEngine,
    store: SnapshotStore,
    commands: CommandDispatcher,
    pipeline: FrameGeometryPipeline,
    reader: FrameReader,
    tick: u64,
}

impl Engine {
    pub fn new(config: Config, services: Services) -> Self {
        let (pipeline, reader) = FrameGeometryPipeline::new(VERTEX_CAPACITY);
        Self {
            discovery: DiscoveryEngine::new(config.timing.heartbeat_period()),
            store: SnapshotStore::new(),
            commands: CommandDispatcher::new(config.control.initial_mode),
            pipeline,
            reader,
            config,
            services,
            tick: 0,
        }
    }

    /// One full cycle: heartbeat, at most one datagram, clocks, power
    /// sample, frame commit, present.
    pub fn tick(&mut self) -> TickReport {
        self.tick = self.tick.saturating_add(1);

        let heartbeat = self.discovery.on_tick(self.services.transport.as_mut());

        let mut received = None;
        let mut merged_fields = 0;
        if let Some(datagram) = self.services.transport.poll_receive() {
            received = Some(datagram.from);
            match self.discovery.on_datagram(&datagram) {
                Inbound::Announcement => {
                    self.store.set_connected(self.discovery.is_connected());
                }
                Inbound::Status(payload) => {
                    let update = parse_status(payload);
                    merged_fields = update.len();
                    self.store.merge(&update);
                }
                Inbound::CommandAck { .. } | Inbound::Unrecognized => {}
            }
        }

        let inputs = SceneInputs::from(self.store.snapshot());
        self.pipeline.advance(&inputs);
        self.store.sample_power();

        let frame = match self.pipeline.regenerate(&inputs) {
            Ok(stats) => Some(stats),
            Err(err) => {
                error!(%err, "frame build failed, keeping previous frame");
                None
            }
        };

        {
            let active = self.reader.read();
            let view = FrameView {
                tick: self.tick,
                snapshot: self.store.snapshot(),
                history: self.store.history(),
                frame: &active,
                sprite_index: self
                    .pipeline
                    .clocks()
                    .sprite_index(self.config.timing.sprite_frames),
                mode: self.commands.mode(),
                discovery: self.discovery.state(),
                uptime_estimate: self.store.uptime_estimate(self.config.timing.tick_rate_hz),
            };
            self.services.sink.present(&view);
        }

        TickReport {
            tick: self.tick,
            state: self.discovery.state(),
            heartbeat,
            received,
            merged_fields,
            frame,
        }
    }

    /// Tick at the configured rate until `cancel` fires. Control events are
    /// applied between ticks; cancellation ends the loop after the tick in
    /// progress.
    pub async fn run_until(
        &mut self,
        cancel: CancellationToken,
        mut control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    ) {
        let period = self.config.timing.tick_period();
        let mut deadline = self.services.clock.now();
        let mut control_open = true;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(ticks = self.tick, "shutdown requested");
                    break;
                }
                event = control_rx.recv(), if control_open => {
                    match event {
                        Some(event) => self.handle_control(event),
                        None => control_open = false,
                    }
                }
                _ = self.services.clock.sleep_until(deadline) => {
                    self.tick();
                    deadline += period;
                    // fell behind: restart the schedule instead of bursting
                    let now = self.services.clock.now();
                    if deadline < now {
                        deadline = now;
                    }
                }
            }
        }
    }

    pub fn handle_control(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::SelectMode(index) => {
                if let Err(err) = self.select_mode(index) {
                    warn!(%err, "mode selection rejected");
                }
            }
            ControlEvent::CycleMode => {
                let next = self.commands.mode().next();
                if let Err(err) = self.select_mode(next.index()) {
                    warn!(%err, "mode selection rejected");
                }
            }
            ControlEvent::ReportStatus => {
                let snapshot = self.store.snapshot();
                info!(
                    tick = self.tick,
                    state = ?self.discovery.state(),
                    endpoint = ?self.discovery.endpoint(),
                    mode = %self.commands.mode(),
                    host = %snapshot.hostname,
                    cpu = snapshot.cpu_usage,
                    memory = snapshot.memory_usage,
                    power = snapshot.power_watts,
                    fan_rpm = snapshot.fan_rpm,
                    uptime = self.store.uptime_estimate(self.config.timing.tick_rate_hz),
                    "status"
                );
            }
        }
    }

    /// Select a fan mode, sending its command if it changed and the host is
    /// known.
    pub fn select_mode(&mut self, index: usize) -> Result<Dispatch, Error> {
        self.commands
            .on_mode_selected(index, &self.discovery, self.services.transport.as_mut())
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn discovery(&self) -> &DiscoveryEngine {
        &self.discovery
    }

    pub fn commands(&self) -> &CommandDispatcher {
        &self.commands
    }

    /// Another read handle on the active frame, e.g. for a renderer thread.
    pub fn frame_reader(&self) -> FrameReader {
        self.reader.clone()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Release everything in reverse order of acquisition: the sink, the
    /// frame buffers, the clock, then the transport.
    pub fn shutdown(self) {
        let Self {
            services,
            pipeline,
            reader,
            ..
        } = self;
        let Services {
            transport,
            sink,
            clock,
        } = services;

        drop(sink);
        debug!("renderer released");
        drop(reader);
        drop(pipeline);
        debug!("frame buffers released");
        drop(clock);
        drop(transport);
        debug!("transport released");
    }
}
