//! Fixed timestep simulation tick
//!
//! Advances the lane one step: input dispatch, integration, collision,
//! settle detection, scoring hand-off, rack management. Everything runs to
//! completion within the tick, strictly in that order.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::aim::AimPhase;
use super::collision;
use super::physics;
use super::scoring::RackAction;
use super::state::{Ball, GameEvent, GameState, fresh_rack};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Horizontal pointer position, steering the aim while aiming
    pub pointer_x: Option<f32>,
    /// Width the pointer position is measured against
    pub reference_width: f32,
    /// Press-and-hold began (starts aiming)
    pub press: bool,
    /// Hold released (freezes the aim and throws)
    pub release: bool,
    /// Wholesale new-game reset
    pub reset: bool,
    /// Demo/attract mode: a heuristic bowler supplies the other commands
    pub demo_mode: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            pointer_x: None,
            reference_width: LANE_WIDTH,
            press: false,
            release: false,
            reset: false,
            demo_mode: false,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.reset {
        log::info!("Game reset");
        state.reset();
        return;
    }

    let mut input = input.clone();
    if input.demo_mode {
        drive_demo_bowler(state, &mut input);
    }
    let input = &input;

    if let Some(pointer_x) = input.pointer_x {
        state.update_aim_angle(pointer_x, input.reference_width);
    }
    if input.press {
        state.start_aiming();
    }
    if input.release {
        state.stop_aiming();
        state.throw_ball();
    }

    state.time_ticks += 1;

    if state.throw_in_progress {
        advance_throw(state, dt);
    } else if state.rack_delay > 0 {
        state.rack_delay -= 1;
        if state.rack_delay == 0 {
            apply_rack_action(state);
        }
    }
}

/// One physics step of an in-flight throw
fn advance_throw(state: &mut GameState, dt: f32) {
    // Pins first, then the ball sweeps against the updated rack
    for pin in &mut state.pins {
        physics::integrate_pin(pin, &state.tuning, dt);
    }

    sweep_ball(state, dt);
    physics::apply_ball_drag(&mut state.ball, &state.tuning, dt);

    collision::separate_fallen_pins(&mut state.pins);

    if throw_settled(state) {
        resolve_throw(state);
    }
}

/// Move the ball in substeps, felling any standing pin it reaches
///
/// Substeps stay under a fraction of the ball radius so the narrow contact
/// window on the back-row corner pins cannot be tunneled through at launch
/// speed.
fn sweep_ball(state: &mut GameState, dt: f32) {
    if state.ball.parked {
        return;
    }
    let travel = state.ball.speed() * dt;
    let num_steps = ((travel / (state.ball.radius * 0.3)).ceil() as usize).clamp(1, 20);
    let step_dt = dt / num_steps as f32;

    let mut felled: Vec<usize> = Vec::new();

    for _ in 0..num_steps {
        state.ball.pos += state.ball.vel * step_dt;

        // Stay quiet until the ball reaches the pin deck
        if state.ball.pos.y >= PIN_DECK_Y {
            continue;
        }

        for slot in 0..state.pins.len() {
            if state.pins[slot].fallen {
                continue;
            }
            let Some(contact) = collision::circle_contact(
                state.ball.pos,
                state.ball.radius,
                state.pins[slot].pos,
                state.pins[slot].radius,
            ) else {
                continue;
            };
            collision::knock_down(&mut state.ball, &mut state.pins[slot], &contact, &state.tuning);
            felled.push(slot);
        }
    }

    for slot in felled {
        state.push_event(GameEvent::PinFelled { slot });
    }
}

/// A throw is resolved once the ball is done and every pin has stopped
///
/// "Done" for the ball means past the pit end of the lane or slower than the
/// settle epsilon - a heavily dampened ball can die on the deck itself.
fn throw_settled(state: &GameState) -> bool {
    let eps = state.tuning.settle_epsilon;
    let ball_done = state.ball.parked || state.ball.pos.y < 0.0 || state.ball.speed() < eps;
    ball_done && state.pins.iter().all(|p| p.is_at_rest(eps))
}

/// Hand a settled throw to the scorecard and schedule the lane reset
fn resolve_throw(state: &mut GameState) {
    let down = state.pins_down();
    let pins_this_throw = down.saturating_sub(state.pins_down_at_throw_start);
    state.throw_in_progress = false;

    let outcome = state.scorecard.record_throw(pins_this_throw);
    state.push_event(GameEvent::ThrowSettled {
        pins: pins_this_throw,
    });
    log::info!(
        "Throw settled: {pins_this_throw} pins down (frame {})",
        state.scorecard.frame_index() + 1
    );

    if let Some(frame) = outcome.frame_closed {
        state.push_event(GameEvent::FrameClosed { frame });
    }

    if outcome.game_over {
        state.game_over = true;
        state.aim.disarm();
        let total = state.scorecard.total().unwrap_or(0);
        state.push_event(GameEvent::GameOver { total });
        log::info!("Game over, total {total}");
        return;
    }

    state.pending_rack = Some(outcome.rack);
    state.rack_delay = state.tuning.rack_delay_ticks;
}

/// Apply the deferred rack action and stage the next throw
fn apply_rack_action(state: &mut GameState) {
    match state.pending_rack.take() {
        Some(RackAction::Fresh) => {
            state.pins = fresh_rack();
            state.pins_down_at_throw_start = 0;
            state.push_event(GameEvent::FreshRack);
        }
        Some(RackAction::Keep) => {
            state.pins_down_at_throw_start = state.pins_down();
        }
        None => {}
    }
    state.ball = Ball::at_start();
}

/// Heuristic bowler for demo/attract mode
///
/// Aims near the head pin with a small seeded wobble and releases close to
/// peak power.
fn drive_demo_bowler(state: &GameState, input: &mut TickInput) {
    if state.game_over {
        return;
    }
    match state.aim.phase {
        AimPhase::Idle => {
            if !state.throw_in_progress && state.rack_delay == 0 {
                input.press = true;
            }
        }
        AimPhase::Aiming => {
            let mut rng = Pcg32::seed_from_u64(
                state.seed ^ u64::from(state.throw_count).wrapping_mul(0x9E37_79B9_7F4A_7C15),
            );
            let wobble: f32 = rng.random_range(-0.05..0.05);
            input.pointer_x = Some((0.5 + wobble) * input.reference_width);
            if state.aim.power >= 90.0 {
                input.release = true;
            }
        }
        AimPhase::Armed => {
            input.release = true;
        }
    }
}
