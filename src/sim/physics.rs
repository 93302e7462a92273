//! Discrete-time integration for lane entities
//!
//! Per-tick velocity decay is exponential (a constant factor per tick, not a
//! linear subtraction); felled pins pick up a capped down-lane settle drift
//! and park once they slide past the lane edge.

use glam::Vec2;

use super::state::{Ball, Pin};
use crate::consts::*;
use crate::tuning::Tuning;

/// Per-tick ball decay: friction, cosmetic roll, parking past the pit
///
/// Position advances in the tick loop's substeps so collision checks see
/// every intermediate position.
pub fn apply_ball_drag(ball: &mut Ball, tuning: &Tuning, dt: f32) {
    if ball.parked {
        return;
    }
    ball.vel *= tuning.ball_friction;
    ball.rotation += ball.vel.x * SPIN_FACTOR * dt;

    let pit_edge = -(OFF_LANE_MARGIN + ball.radius * 2.0);
    if ball.pos.y < pit_edge {
        ball.pos.y = pit_edge;
        ball.vel = Vec2::ZERO;
        ball.parked = true;
    }
}

/// Advance one pin a full tick
///
/// Standing pins are motionless by construction; felled pins integrate until
/// they park.
pub fn integrate_pin(pin: &mut Pin, tuning: &Tuning, dt: f32) {
    if !pin.fallen || pin.parked {
        return;
    }

    // Settle drift: accelerate down-lane toward the table edge, capped
    pin.vel.y = (pin.vel.y + tuning.settle_accel * dt).min(tuning.settle_max_speed);
    pin.vel *= tuning.pin_friction;

    pin.pos += pin.vel * dt;
    pin.rotation += pin.vel.x * SPIN_FACTOR * dt;

    let edge = LANE_LENGTH + OFF_LANE_MARGIN;
    if pin.pos.y > edge {
        pin.pos.y = edge;
        pin.vel = Vec2::ZERO;
        pin.parked = true;
    }
}
