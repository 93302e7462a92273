//! Circular-body collision detection and response
//!
//! Two cases only: the ball felling a standing pin (one-shot impulse
//! transfer), and felled pins shoving each other apart while they scatter
//! (positional correction, no velocity exchange).

use glam::Vec2;

use super::state::{Ball, Pin};
use crate::tuning::Tuning;

/// Result of a circle-circle overlap test
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal from the first body toward the second (zero if centers
    /// coincide - no meaningful separation direction)
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub depth: f32,
}

/// Overlap test between two circles
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let dist = delta.length();
    let reach = a_radius + b_radius;
    if dist >= reach {
        return None;
    }
    Some(Contact {
        normal: delta.normalize_or_zero(),
        depth: reach - dist,
    })
}

/// Fell a standing pin struck by the ball
///
/// The pin takes a fraction of the ball's speed along the contact normal and
/// the ball keeps a retention fraction of its velocity. One-shot: the caller
/// must not pass an already-fallen pin.
pub fn knock_down(ball: &mut Ball, pin: &mut Pin, contact: &Contact, tuning: &Tuning) {
    pin.fallen = true;
    pin.vel = contact.normal * ball.speed() * tuning.pin_impulse;
    ball.vel *= tuning.ball_retention;
}

/// Shove overlapping felled pins apart
///
/// Symmetric positional correction: each pin of an overlapping pair moves
/// half the overlap along the contact normal. Pairs with a coincident center
/// have no separation direction and are left alone; parked pins stay put.
pub fn separate_fallen_pins(pins: &mut [Pin]) {
    for i in 0..pins.len() {
        for j in i + 1..pins.len() {
            if !pins[i].fallen || !pins[j].fallen || pins[i].parked || pins[j].parked {
                continue;
            }
            let contact = match circle_contact(
                pins[i].pos,
                pins[i].radius,
                pins[j].pos,
                pins[j].radius,
            ) {
                Some(c) => c,
                None => continue,
            };
            let shift = contact.normal * (contact.depth / 2.0);
            pins[i].pos -= shift;
            pins[j].pos += shift;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::fresh_rack;

    #[test]
    fn test_circle_contact_hit_and_miss() {
        let contact = circle_contact(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0)
            .expect("overlapping circles must contact");
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert_eq!(contact.depth, 5.0);

        assert!(circle_contact(Vec2::ZERO, 10.0, Vec2::new(25.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_coincident_centers_give_zero_normal() {
        let contact = circle_contact(Vec2::ZERO, 10.0, Vec2::ZERO, 10.0).unwrap();
        assert_eq!(contact.normal, Vec2::ZERO);
    }

    #[test]
    fn test_knock_down_transfers_impulse() {
        let tuning = Tuning::default();
        let mut ball = Ball::at_start();
        ball.pos = Vec2::new(200.0, 205.0);
        ball.vel = Vec2::new(0.0, -1000.0);
        let mut pin = Pin::at_slot(0);
        pin.pos = Vec2::new(200.0, 180.0);

        let contact = circle_contact(ball.pos, ball.radius, pin.pos, pin.radius).unwrap();
        knock_down(&mut ball, &mut pin, &contact, &tuning);

        assert!(pin.fallen);
        // Pin flies away from the ball, up-lane
        assert!(pin.vel.y < 0.0);
        assert!((pin.speed() - 1000.0 * tuning.pin_impulse).abs() < 1e-2);
        // Ball is dampened but keeps its heading
        assert_eq!(ball.vel.y, -1000.0 * tuning.ball_retention);
    }

    #[test]
    fn test_separate_fallen_pins_resolves_overlap() {
        let mut pins = fresh_rack();
        pins[0].fallen = true;
        pins[1].fallen = true;
        // Force a deep overlap
        pins[1].pos = pins[0].pos + Vec2::new(PIN_RADIUS, 0.0);

        separate_fallen_pins(&mut pins);

        let gap = (pins[1].pos - pins[0].pos).length();
        assert!(gap >= 2.0 * PIN_RADIUS - 1e-3);
    }

    #[test]
    fn test_separate_ignores_standing_pins() {
        let mut pins = fresh_rack();
        pins[0].fallen = true;
        let standing_pos = pins[1].pos;
        pins[0].pos = standing_pos + Vec2::new(1.0, 0.0);

        separate_fallen_pins(&mut pins);
        assert_eq!(pins[1].pos, standing_pos);
    }
}
