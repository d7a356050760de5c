mod cli;
mod error;
mod signals;
mod sink;

use crate::cli::Cli;
use crate::signals::{route_signals, wait_for_signal};
use crate::sink::TraceSink;
use clap::Parser;
use config::Config;
use flume::bounded;
use orchestrator::transport::{OfflineTransport, UdpTransport};
use orchestrator::{Engine, Services, SystemClock, Transport};
use std::io::Write;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    debug!(config = ?cli);

    let mut config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => Config::new(),
    };
    if let Some(port) = cli.port {
        config.network.port = port;
    }

    if cli.print_config {
        write!(std::io::stdout().lock(), "{}", config.to_toml()?)?;
        return Ok(());
    }

    let transport: Box<dyn Transport> = if cli.offline {
        Box::new(OfflineTransport)
    } else {
        match UdpTransport::bind(&config.network) {
            Ok(transport) => Box::new(transport),
            Err(err) => {
                warn!(%err, "socket setup failed, running offline");
                Box::new(OfflineTransport)
            }
        }
    };

    let cancel = CancellationToken::new();
    let mut sink = TraceSink::new(config.timing.tick_rate_hz);
    if let Some(ticks) = cli.ticks {
        sink = sink.with_tick_limit(ticks, cancel.clone());
    }

    let mut engine = Engine::new(
        config,
        Services {
            transport,
            sink: Box::new(sink),
            clock: Box::new(SystemClock),
        },
    );

    let (events_tx, events_rx) = bounded(8);
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let router = tokio::spawn(route_signals(events_rx, control_tx, cancel.clone()));

    let result = tokio::select! {
        () = engine.run_until(cancel.clone(), control_rx) => Ok(()),
        err = wait_for_signal(&events_tx) => {
            tracing::error!(error = ?err, "Error while waiting for signal");
            err
        }
    };

    router.abort();
    engine.shutdown();
    result?;
    Ok(())
}
