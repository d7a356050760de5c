use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::{Path, PathBuf};

/// Hololink: live host telemetry on a handheld
///
/// Hololink finds a telemetry host on the local network by broadcast,
/// keeps a heartbeat with it, and turns its status reports into a
/// continuously animated 3D scene.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub(crate) struct Cli {
    /// Path to configuration file.
    #[arg(short, long, value_parser = validate_file)]
    pub(crate) conffile: Option<PathBuf>,

    /// UDP port, overriding the configuration file.
    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    /// Do not open a socket; run on default telemetry.
    #[arg(long)]
    pub(crate) offline: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub(crate) print_config: bool,

    /// Stop after this many ticks.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) ticks: Option<u64>,

    #[command(flatten)]
    pub(crate) verbosity: Verbosity<WarnLevel>,
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}
