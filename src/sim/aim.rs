//! Two-phase aiming and launch control
//!
//! Holding the input oscillates the power meter while the pointer steers the
//! aim angle; releasing freezes the pair, and the throw converts it into the
//! ball's initial velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Where the aiming controller is in its press/release cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AimPhase {
    /// Waiting for a press
    #[default]
    Idle,
    /// Press held: power oscillating, angle tracking the pointer
    Aiming,
    /// Released: power/angle frozen, waiting for the throw to commit
    Armed,
}

/// Ephemeral aiming state, alive between press and throw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimState {
    pub phase: AimPhase,
    /// Power meter value, oscillating in [POWER_MIN, POWER_MAX]
    pub power: f32,
    /// Oscillation direction
    pub rising: bool,
    /// Aim angle in degrees, clamped to +/-AIM_ANGLE_LIMIT_DEG
    pub angle_deg: f32,
}

impl Default for AimState {
    fn default() -> Self {
        Self {
            phase: AimPhase::Idle,
            power: POWER_START,
            rising: true,
            angle_deg: 0.0,
        }
    }
}

impl AimState {
    pub fn is_aiming(&self) -> bool {
        self.phase == AimPhase::Aiming
    }

    /// Enter the aiming phase, resetting power to the mid baseline
    pub fn begin(&mut self) {
        self.phase = AimPhase::Aiming;
        self.power = POWER_START;
        self.rising = true;
    }

    /// One oscillator tick: triangle-wave bounce between the power bounds
    pub fn oscillate(&mut self, step: f32) {
        if self.phase != AimPhase::Aiming {
            return;
        }
        let next = if self.rising {
            self.power + step
        } else {
            self.power - step
        };
        if next >= POWER_MAX {
            self.power = POWER_MAX;
            self.rising = false;
        } else if next <= POWER_MIN {
            self.power = POWER_MIN;
            self.rising = true;
        } else {
            self.power = next;
        }
    }

    /// Recompute the angle from the pointer's horizontal offset
    ///
    /// Linear in the offset from lane center, clamped to the aim cone.
    pub fn set_angle_from_pointer(&mut self, pointer_x: f32, reference_width: f32) {
        if self.phase != AimPhase::Aiming {
            return;
        }
        let half = (reference_width / 2.0).max(1.0);
        let offset = (pointer_x - half) / half;
        self.angle_deg =
            (offset * AIM_ANGLE_SCALE_DEG).clamp(-AIM_ANGLE_LIMIT_DEG, AIM_ANGLE_LIMIT_DEG);
    }

    /// Freeze the current power/angle pair
    pub fn freeze(&mut self) {
        if self.phase == AimPhase::Aiming {
            self.phase = AimPhase::Armed;
        }
    }

    /// Leave the cycle without throwing (reset, game over)
    pub fn disarm(&mut self) {
        self.phase = AimPhase::Idle;
    }
}

/// Convert a frozen (power, angle) pair into the launch velocity (px/s)
///
/// The lateral component scales with both angle and power so weak throws
/// drift less; more power means faster, straighter travel up the lane.
pub fn launch_velocity(power: f32, angle_deg: f32) -> Vec2 {
    Vec2::new(angle_deg / 10.0 * power / 50.0, -(power / 5.0)) * TICK_RATE
}
