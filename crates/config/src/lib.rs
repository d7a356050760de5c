#![forbid(unsafe_code)]

mod error;
mod fan_mode;
mod network;
mod timing;

pub use error::Error;
pub use fan_mode::FanMode;
pub use network::{DEFAULT_PORT, DEFAULT_RECV_FRAME_LEN, MIN_RECV_FRAME_LEN, Network};
pub use timing::Timing;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub network: Network,
    pub timing: Timing,
    pub control: Control,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Control {
    /// Mode assumed at startup, before the user picks one.
    pub initial_mode: FanMode,
}

impl Config {
    /// Configuration with every section at its compiled-in default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TOML file layered over the defaults. Missing keys keep their
    /// default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()?;
        if config.network.recv_frame_len < MIN_RECV_FRAME_LEN {
            return Err(Error::FrameTooSmall(config.network.recv_frame_len));
        }
        Ok(config)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }
}
