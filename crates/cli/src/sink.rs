use orchestrator::{FrameSink, FrameView};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Headless renderer: logs a frame summary about once a second and can end
/// the run after a fixed number of ticks.
#[derive(Debug)]
pub(crate) struct TraceSink {
    every: u64,
    limit: Option<(u64, CancellationToken)>,
}

impl TraceSink {
    pub(crate) fn new(tick_rate_hz: u32) -> Self {
        Self {
            every: u64::from(tick_rate_hz.max(1)),
            limit: None,
        }
    }

    pub(crate) fn with_tick_limit(mut self, ticks: u64, cancel: CancellationToken) -> Self {
        self.limit = Some((ticks, cancel));
        self
    }
}

impl FrameSink for TraceSink {
    fn present(&mut self, view: &FrameView<'_>) {
        if view.tick % self.every == 0 {
            debug!(
                tick = view.tick,
                sequence = view.frame.sequence(),
                vertices = view.frame.len(),
                state = ?view.discovery,
                mode = %view.mode,
                host = %view.snapshot.hostname,
                cpu = view.snapshot.cpu_usage,
                power = view.history.latest(),
                sprite = view.sprite_index,
                uptime = view.uptime_estimate,
                "frame"
            );
        }
        if let Some((ticks, cancel)) = &self.limit
            && view.tick >= *ticks
        {
            cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Config;
    use orchestrator::transport::OfflineTransport;
    use orchestrator::{Engine, Services, SystemClock};
    use tokio::sync::mpsc;

    fn engine(sink: TraceSink) -> Engine {
        Engine::new(
            Config::new(),
            Services {
                transport: Box::new(OfflineTransport),
                sink: Box::new(sink),
                clock: Box::new(SystemClock),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn tick_limit_stops_run_exactly() {
        let cancel = CancellationToken::new();
        let mut engine = engine(TraceSink::new(60).with_tick_limit(5, cancel.clone()));
        let (_control_tx, control_rx) = mpsc::unbounded_channel();

        engine.run_until(cancel, control_rx).await;
        assert_eq!(engine.ticks(), 5);
    }

    #[test]
    fn cancels_on_the_limit_tick() {
        let cancel = CancellationToken::new();
        let mut engine = engine(TraceSink::new(60).with_tick_limit(3, cancel.clone()));
        engine.tick();
        engine.tick();
        assert!(!cancel.is_cancelled());
        engine.tick();
        assert!(cancel.is_cancelled());
    }
}
