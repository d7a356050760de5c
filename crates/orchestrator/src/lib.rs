#![forbid(unsafe_code)]

//! The tick loop that ties the network, the telemetry store and the frame
//! pipeline together.
//!
//! Everything here is single-threaded and cooperative: one [`Engine::tick`]
//! polls at most one datagram, updates state, commits one frame and hands it
//! to a [`FrameSink`].

mod clock;
mod command;
mod discovery;
mod engine;
mod error;
mod render;
pub mod transport;

pub use clock::{Clock, SystemClock};
pub use command::{CommandDispatcher, Dispatch};
pub use discovery::{DISCOVER, DiscoveryEngine, DiscoveryState, Heartbeat, Inbound, PING};
pub use engine::{ControlEvent, Engine, Services, TickReport};
pub use error::Error;
pub use render::{FrameSink, FrameView, NoopSink};
pub use transport::{Datagram, Transport};
