#![forbid(unsafe_code)]

use std::f64::consts::TAU;

/// Spin rate floor in radians per tick.
const FAN_BASE_RATE: f64 = 0.005;
/// Extra spin per tick at the reference speed.
const FAN_SCALE_RATE: f64 = 0.08;
/// Fan speed that maps to the full extra spin.
const FAN_REFERENCE_RPM: f64 = 3000.0;
/// Factor used while the host reports no fan speed.
const FAN_IDLE_FACTOR: f64 = 0.5;

/// Sprite frames per tick at idle and at full load.
const SPRITE_MIN_RATE: f64 = 0.05;
const SPRITE_MAX_RATE: f64 = 0.55;

/// Phase accumulators advanced once per tick.
///
/// Neither clock is ever reset. The fan angle wraps through the trig
/// functions that consume it; the sprite phase is reduced modulo the frame
/// count only when read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationClocks {
    fan_angle: f64,
    sprite_phase: f64,
}

impl AnimationClocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, fan_rpm: i32, cpu_usage: f32) {
        self.fan_angle -= Self::fan_step(fan_rpm);
        self.sprite_phase += Self::sprite_step(cpu_usage);
    }

    /// Radians the fan turns in one tick (always positive; the fan turns in
    /// the negative direction).
    pub fn fan_step(fan_rpm: i32) -> f64 {
        let factor = if fan_rpm > 0 {
            f64::from(fan_rpm) / FAN_REFERENCE_RPM
        } else {
            FAN_IDLE_FACTOR
        };
        FAN_BASE_RATE + factor * FAN_SCALE_RATE
    }

    /// Sprite frames advanced in one tick, interpolated by CPU load.
    pub fn sprite_step(cpu_usage: f32) -> f64 {
        let load = (f64::from(cpu_usage) / 100.0).clamp(0.0, 1.0);
        SPRITE_MIN_RATE + (SPRITE_MAX_RATE - SPRITE_MIN_RATE) * load
    }

    /// Fan angle reduced to `[0, 2π)` before narrowing, so the rendered
    /// step stays exact however long the clock has run.
    pub fn fan_angle(&self) -> f32 {
        self.fan_angle.rem_euclid(TAU) as f32
    }

    /// Unreduced sprite phase.
    pub fn sprite_phase(&self) -> f64 {
        self.sprite_phase
    }

    /// Sprite to draw this tick.
    pub fn sprite_index(&self, frame_count: usize) -> usize {
        (self.sprite_phase as usize) % frame_count.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fan_turns_faster_with_rpm() {
        assert!((AnimationClocks::fan_step(0) - 0.045).abs() < 1e-12);
        assert!((AnimationClocks::fan_step(3000) - 0.085).abs() < 1e-12);
        assert!(AnimationClocks::fan_step(6000) > AnimationClocks::fan_step(3000));
    }

    #[test]
    fn spin_stays_smooth_after_days() {
        let mut clocks = AnimationClocks::new();
        // about a week at 60 Hz
        for _ in 0..36_000_000u32 {
            clocks.advance(1200, 20.0);
        }
        let step = AnimationClocks::fan_step(1200) as f32;
        let mut previous = clocks.fan_angle();
        for _ in 0..12 {
            clocks.advance(1200, 20.0);
            let current = clocks.fan_angle();
            let delta = (f64::from(previous) - f64::from(current)).rem_euclid(TAU) as f32;
            assert!((delta - step).abs() < 1e-4, "delta {delta}, step {step}");
            assert!((0.0..=std::f32::consts::TAU).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn sprite_rate_is_bounded_by_load() {
        assert!((AnimationClocks::sprite_step(0.0) - SPRITE_MIN_RATE).abs() < 1e-12);
        assert!((AnimationClocks::sprite_step(100.0) - SPRITE_MAX_RATE).abs() < 1e-12);
        assert!((AnimationClocks::sprite_step(250.0) - SPRITE_MAX_RATE).abs() < 1e-12);
        assert!((AnimationClocks::sprite_step(-5.0) - SPRITE_MIN_RATE).abs() < 1e-12);
    }

    #[test]
    fn sprite_index_wraps_at_consumption() {
        let mut clocks = AnimationClocks::new();
        for _ in 0..20 {
            clocks.advance(1200, 100.0);
        }
        // 20 ticks at 0.55 frames per tick
        assert!((clocks.sprite_phase() - 11.0).abs() < 1e-9);
        assert_eq!(clocks.sprite_index(5), 1);
        assert_eq!(clocks.sprite_index(0), 0);
    }

    proptest! {
        #[test]
        fn fan_angle_decreases_monotonically(rpms in prop::collection::vec(-100i32..10_000, 1..100)) {
            let mut clocks = AnimationClocks::new();
            let mut previous = clocks.fan_angle;
            for rpm in rpms {
                clocks.advance(rpm, 50.0);
                prop_assert!(clocks.fan_angle < previous);
                previous = clocks.fan_angle;
            }
        }
    }
}
