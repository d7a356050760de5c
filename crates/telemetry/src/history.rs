/// Number of power samples kept for the chart.
pub const POWER_HISTORY_LEN: usize = 50;

/// Fixed-capacity ring of power samples. The cursor points at the slot the
/// next sample overwrites, which is also the oldest sample once the ring has
/// wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerHistory {
    samples: [f32; POWER_HISTORY_LEN],
    cursor: usize,
}

impl Default for PowerHistory {
    fn default() -> Self {
        Self {
            samples: [0.0; POWER_HISTORY_LEN],
            cursor: 0,
        }
    }
}

impl PowerHistory {
    pub fn push(&mut self, watts: f32) {
        self.samples[self.cursor] = watts;
        self.cursor = (self.cursor + 1) % POWER_HISTORY_LEN;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw storage in slot order.
    pub fn samples(&self) -> &[f32; POWER_HISTORY_LEN] {
        &self.samples
    }

    /// Samples from oldest to newest.
    pub fn iter_chronological(&self) -> impl Iterator<Item = f32> + '_ {
        let (newer, older) = self.samples.split_at(self.cursor);
        older.iter().chain(newer).copied()
    }

    pub fn latest(&self) -> f32 {
        self.samples[(self.cursor + POWER_HISTORY_LEN - 1) % POWER_HISTORY_LEN]
    }
}
