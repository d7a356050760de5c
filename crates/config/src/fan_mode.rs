#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fan control mode selectable from the handheld.
///
/// The discriminant doubles as the on-screen button index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FanMode {
    Turbo = 0,
    Silent = 1,
    Custom = 2,
    #[default]
    Auto = 3,
}

impl FanMode {
    pub const ALL: [FanMode; 4] = [
        FanMode::Turbo,
        FanMode::Silent,
        FanMode::Custom,
        FanMode::Auto,
    ];

    /// Look up a mode by button index. Unknown indices yield `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire command sent to the host when this mode is selected.
    pub fn command(self) -> &'static str {
        match self {
            FanMode::Turbo => "FAN:TURBO",
            FanMode::Silent => "FAN:SILENT",
            FanMode::Custom => "FAN:CUSTOM",
            FanMode::Auto => "FAN:AUTO",
        }
    }

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FanMode::Turbo => "turbo",
            FanMode::Silent => "silent",
            FanMode::Custom => "custom",
            FanMode::Auto => "auto",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn commands_match_wire_table() {
        let commands: Vec<_> = FanMode::ALL.iter().map(|m| m.command()).collect();
        assert_eq!(
            commands,
            ["FAN:TURBO", "FAN:SILENT", "FAN:CUSTOM", "FAN:AUTO"]
        );
    }

    #[test]
    fn next_wraps_to_first() {
        assert_eq!(FanMode::Auto.next(), FanMode::Turbo);
        assert_eq!(FanMode::Turbo.next(), FanMode::Silent);
    }

    proptest! {
        #[test]
        fn from_index_roundtrips_known_and_rejects_unknown(index in 0usize..64) {
            match FanMode::from_index(index) {
                Some(mode) => prop_assert_eq!(mode.index(), index),
                None => prop_assert!(index >= FanMode::ALL.len()),
            }
        }
    }
}
