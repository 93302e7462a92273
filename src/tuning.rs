//! Data-driven game balance
//!
//! Physics and feel constants that hosts may override without recompiling.
//! Compiled defaults live in [`crate::consts`]; a JSON blob can replace any
//! subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-tick ball velocity decay factor
    pub ball_friction: f32,
    /// Per-tick felled-pin velocity decay factor
    pub pin_friction: f32,
    /// Fraction of ball speed transferred to a struck pin
    pub pin_impulse: f32,
    /// Ball speed retained after striking a pin
    pub ball_retention: f32,
    /// Down-lane settle acceleration on felled pins (px/s^2)
    pub settle_accel: f32,
    /// Settle drift terminal speed (px/s)
    pub settle_max_speed: f32,
    /// Speed below which an entity counts as motionless (px/s)
    pub settle_epsilon: f32,
    /// Power meter step per oscillator tick
    pub power_step: f32,
    /// Ticks between a throw resolving and the lane resetting
    pub rack_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_friction: BALL_FRICTION,
            pin_friction: PIN_FRICTION,
            pin_impulse: PIN_IMPULSE,
            ball_retention: BALL_RETENTION,
            settle_accel: SETTLE_ACCEL,
            settle_max_speed: SETTLE_MAX_SPEED,
            settle_epsilon: SETTLE_EPSILON,
            power_step: POWER_STEP,
            rack_delay_ticks: RACK_DELAY_TICKS,
        }
    }
}

impl Tuning {
    /// Parse a tuning blob; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a tuning blob, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning.sanitized(),
            Err(e) => {
                log::warn!("Bad tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Clamp values that would break the simulation contract
    ///
    /// Friction factors must stay below 1 or throws never settle; energy
    /// transfer factors must stay non-negative.
    pub fn sanitized(mut self) -> Self {
        let clamp_unit = |name: &str, v: &mut f32| {
            if !(0.0..1.0).contains(v) {
                log::warn!("Tuning {name}={v} outside [0, 1), clamping");
                *v = v.clamp(0.0, 0.999);
            }
        };
        clamp_unit("ball_friction", &mut self.ball_friction);
        clamp_unit("pin_friction", &mut self.pin_friction);
        clamp_unit("ball_retention", &mut self.ball_retention);
        if self.pin_impulse < 0.0 {
            log::warn!("Tuning pin_impulse negative, zeroing");
            self.pin_impulse = 0.0;
        }
        if self.settle_epsilon <= 0.0 {
            self.settle_epsilon = SETTLE_EPSILON;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{"pin_impulse": 0.8}"#).unwrap();
        assert_eq!(tuning.pin_impulse, 0.8);
        assert_eq!(tuning.ball_friction, BALL_FRICTION);
    }

    #[test]
    fn test_bad_json_falls_back() {
        let tuning = Tuning::from_json_or_default("not json");
        assert_eq!(tuning.power_step, POWER_STEP);
    }

    #[test]
    fn test_sanitize_clamps_friction() {
        let tuning = Tuning {
            ball_friction: 1.5,
            ..Default::default()
        }
        .sanitized();
        assert!(tuning.ball_friction < 1.0);
    }
}
