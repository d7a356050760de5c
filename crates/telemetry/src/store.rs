use crate::history::PowerHistory;
use crate::snapshot::TelemetrySnapshot;
use crate::update::TelemetryUpdate;
use tracing::debug;

/// Owner of the published snapshot and the power trace.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshot: TelemetrySnapshot,
    history: PowerHistory,
    ticks_since_uptime: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.snapshot
    }

    pub fn history(&self) -> &PowerHistory {
        &self.history
    }

    /// Fold a partial update into the snapshot, field by field.
    pub fn merge(&mut self, update: &TelemetryUpdate) {
        if update.uptime_seconds.is_some() {
            self.ticks_since_uptime = 0;
        }
        self.snapshot.apply(update);
        debug!(fields = update.len(), "snapshot merged");
    }

    /// Record the current power draw. Called once per tick whether or not
    /// fresh telemetry arrived.
    pub fn sample_power(&mut self) {
        self.history.push(self.snapshot.power_watts);
        self.ticks_since_uptime = self.ticks_since_uptime.saturating_add(1);
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.snapshot.connected = connected;
    }

    /// Host uptime extrapolated from the last report by the whole seconds
    /// that passed since, counted in ticks.
    pub fn uptime_estimate(&self, tick_rate_hz: u32) -> i64 {
        let elapsed = self.ticks_since_uptime / u64::from(tick_rate_hz.max(1));
        self.snapshot
            .uptime_seconds
            .saturating_add(i64::try_from(elapsed).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_status;

    #[test]
    fn example_sequence_keeps_untouched_fields() {
        let mut store = SnapshotStore::new();
        store.merge(&parse_status(br#"{"cpu_usage":73.5,"fan_rpm_missing":1}"#));
        store.merge(&parse_status(br#"{"cpu_temp":61}"#));

        let expected = TelemetrySnapshot {
            cpu_usage: 73.5,
            cpu_temp: 61.0,
            ..Default::default()
        };
        assert_eq!(store.snapshot(), &expected);
    }

    #[test]
    fn power_sampled_every_tick() {
        let mut store = SnapshotStore::new();
        store.sample_power();
        store.merge(&parse_status(br#"{"power_score":2000000}"#));
        store.sample_power();

        assert_eq!(store.history().cursor(), 2);
        assert_eq!(store.history().samples()[0], 15.0);
        assert_eq!(store.history().samples()[1], 20.0);
    }

    #[test]
    fn uptime_estimate_advances_between_reports() {
        let mut store = SnapshotStore::new();
        store.merge(&parse_status(br#"{"uptime_secs":100}"#));
        for _ in 0..150 {
            store.sample_power();
        }
        assert_eq!(store.uptime_estimate(60), 102);
        assert_eq!(store.snapshot().uptime_seconds, 100);

        store.merge(&parse_status(br#"{"uptime_secs":103}"#));
        assert_eq!(store.uptime_estimate(60), 103);
    }

    #[test]
    fn other_keys_do_not_reset_uptime_clock() {
        let mut store = SnapshotStore::new();
        for _ in 0..120 {
            store.sample_power();
        }
        store.merge(&parse_status(br#"{"cpu_usage":5}"#));
        assert_eq!(store.uptime_estimate(60), 2);
    }
}
