//! Difficulty curve
//!
//! Step functions of elapsed session time. No interpolation: the game gets
//! harder in discrete jumps every `step_interval_ms` and plateaus at the caps.

use serde::{Deserialize, Serialize};

/// Parameters of a step-function difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    /// Entity speed at elapsed = 0 (field units per nominal tick)
    pub base_speed: f32,
    /// Speed added per step
    pub speed_increment: f32,
    /// Speed cap
    pub max_speed: f32,
    /// Hazard spawn interval at elapsed = 0 (ms)
    pub base_spawn_interval_ms: f32,
    /// Interval removed per step (ms)
    pub spawn_decrement_ms: f32,
    /// Interval floor (ms)
    pub min_spawn_interval_ms: f32,
    /// Length of one difficulty step (ms)
    pub step_interval_ms: f32,
}

/// Difficulty sampled at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    pub level: u32,
    pub speed: f32,
    pub spawn_interval_ms: f32,
}

impl DifficultyCurve {
    /// Number of completed steps at `elapsed_ms`
    pub fn level(&self, elapsed_ms: f32) -> u32 {
        if self.step_interval_ms <= 0.0 {
            return 0;
        }
        (elapsed_ms.max(0.0) / self.step_interval_ms).floor() as u32
    }

    pub fn speed(&self, elapsed_ms: f32) -> f32 {
        let steps = self.level(elapsed_ms) as f32;
        (self.base_speed + steps * self.speed_increment).min(self.max_speed)
    }

    pub fn spawn_interval_ms(&self, elapsed_ms: f32) -> f32 {
        let steps = self.level(elapsed_ms) as f32;
        (self.base_spawn_interval_ms - steps * self.spawn_decrement_ms)
            .max(self.min_spawn_interval_ms)
    }

    pub fn at(&self, elapsed_ms: f32) -> Difficulty {
        Difficulty {
            level: self.level(elapsed_ms),
            speed: self.speed(elapsed_ms),
            spawn_interval_ms: self.spawn_interval_ms(elapsed_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameKind;
    use proptest::prelude::*;

    fn curve() -> DifficultyCurve {
        DifficultyCurve {
            base_speed: 4.0,
            speed_increment: 1.0,
            max_speed: 12.0,
            base_spawn_interval_ms: 800.0,
            spawn_decrement_ms: 50.0,
            min_spawn_interval_ms: 350.0,
            step_interval_ms: 10_000.0,
        }
    }

    #[test]
    fn test_base_values_at_start() {
        let c = curve();
        assert_eq!(c.speed(0.0), 4.0);
        assert_eq!(c.spawn_interval_ms(0.0), 800.0);
        assert_eq!(c.level(0.0), 0);
    }

    #[test]
    fn test_one_step_at_ten_seconds() {
        let c = curve();
        assert_eq!(c.speed(9_999.0), 4.0);
        assert_eq!(c.speed(10_000.0), 5.0);
        assert_eq!(c.spawn_interval_ms(10_000.0), 750.0);
    }

    #[test]
    fn test_caps_plateau() {
        let c = curve();
        assert_eq!(c.speed(1_000_000.0), 12.0);
        assert_eq!(c.spawn_interval_ms(1_000_000.0), 350.0);
    }

    #[test]
    fn test_zero_step_interval_stays_flat() {
        let c = DifficultyCurve {
            step_interval_ms: 0.0,
            ..curve()
        };
        assert_eq!(c.speed(50_000.0), c.base_speed);
    }

    proptest! {
        #[test]
        fn prop_difficulty_is_monotonic(a in 0.0f32..2_000_000.0, b in 0.0f32..2_000_000.0) {
            let (t1, t2) = if a <= b { (a, b) } else { (b, a) };
            for kind in GameKind::ALL {
                let c = kind.config().difficulty;
                prop_assert!(c.speed(t1) <= c.speed(t2));
                prop_assert!(c.spawn_interval_ms(t1) >= c.spawn_interval_ms(t2));
            }
        }

        #[test]
        fn prop_difficulty_stays_within_caps(t in 0.0f32..2_000_000.0) {
            for kind in GameKind::ALL {
                let c = kind.config().difficulty;
                prop_assert!(c.speed(t) >= c.base_speed && c.speed(t) <= c.max_speed);
                prop_assert!(c.spawn_interval_ms(t) >= c.min_spawn_interval_ms);
                prop_assert!(c.spawn_interval_ms(t) <= c.base_spawn_interval_ms);
            }
        }
    }
}
