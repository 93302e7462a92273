//! Game state and core simulation types
//!
//! Everything needed to replay or snapshot a game lives here; transient
//! notification events are skipped during serialization.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aim::{AimPhase, AimState, launch_velocity};
use super::scoring::{RackAction, Scorecard};
use crate::consts::*;
use crate::tuning::Tuning;

/// The bowling ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cosmetic roll, accumulated from horizontal velocity
    pub rotation: f32,
    /// Off the lane: velocity zeroed, position clamped
    pub parked: bool,
}

impl Ball {
    /// Ball at rest on the approach line
    pub fn at_start() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            rotation: 0.0,
            parked: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A single pin, bound to its rack slot for the whole game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// Rack slot 0-9 (0 = head pin, rows recede up-lane)
    pub slot: usize,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub radius: f32,
    /// One-shot: set on first ball contact, never cleared within a rack
    pub fallen: bool,
    /// Slid past the lane edge: velocity zeroed, position clamped
    pub parked: bool,
}

impl Pin {
    /// Pin standing at its slot's rack position
    pub fn at_slot(slot: usize) -> Self {
        Self {
            slot,
            pos: rack_position(slot),
            vel: Vec2::ZERO,
            rotation: 0.0,
            radius: PIN_RADIUS,
            fallen: false,
            parked: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Motionless for settle purposes
    pub fn is_at_rest(&self, epsilon: f32) -> bool {
        !self.fallen || self.parked || self.speed() < epsilon
    }
}

/// Rack position for a slot: head pin nearest the bowler, rows of 1/2/3/4
pub fn rack_position(slot: usize) -> Vec2 {
    let (row, index) = match slot {
        0 => (0, 0),
        1..=2 => (1, slot - 1),
        3..=5 => (2, slot - 3),
        _ => (3, slot - 6),
    };
    let x = LANE_WIDTH / 2.0 + (index as f32 - row as f32 / 2.0) * PIN_SPACING;
    let y = HEAD_PIN_Y - row as f32 * ROW_SPACING;
    Vec2::new(x, y)
}

/// Fresh rack of ten standing pins
pub fn fresh_rack() -> Vec<Pin> {
    (0..PIN_COUNT).map(Pin::at_slot).collect()
}

/// Discrete notifications for host UI/audio collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched { power: f32, angle_deg: f32 },
    PinFelled { slot: usize },
    ThrowSettled { pins: u8 },
    FrameClosed { frame: usize },
    FreshRack,
    GameOver { total: u32 },
}

/// Read-only per-tick view for renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub ball: BallView,
    pub pins: Vec<PinView>,
    pub is_aiming: bool,
    pub power: f32,
    pub angle: f32,
    pub throw_in_progress: bool,
    pub game_over: bool,
    pub scores: [Option<u32>; FRAME_COUNT],
    pub current_frame: usize,
    pub current_frame_throws: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PinView {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub fallen: bool,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed (demo bowler jitter derivation)
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    /// Ten slots, replaced wholesale on re-rack, never spliced mid-rack
    pub pins: Vec<Pin>,
    pub aim: AimState,
    pub scorecard: Scorecard,
    pub throw_in_progress: bool,
    pub game_over: bool,
    /// Ticks until the pending rack action applies (settle animation window)
    pub rack_delay: u32,
    pub pending_rack: Option<RackAction>,
    /// Fallen count when the current throw started (per-throw differencing)
    pub pins_down_at_throw_start: u8,
    /// Throws launched this game
    pub throw_count: u32,
    pub tuning: Tuning,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            time_ticks: 0,
            ball: Ball::at_start(),
            pins: fresh_rack(),
            aim: AimState::default(),
            scorecard: Scorecard::new(),
            throw_in_progress: false,
            game_over: false,
            rack_delay: 0,
            pending_rack: None,
            pins_down_at_throw_start: 0,
            throw_count: 0,
            tuning,
            events: Vec::new(),
        }
    }

    /// Wholesale reset for a new game; the only supported abort mechanism
    pub fn reset(&mut self) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(self.seed, tuning);
    }

    /// Pins currently marked fallen
    pub fn pins_down(&self) -> u8 {
        self.pins.iter().filter(|p| p.fallen).count() as u8
    }

    /// Begin the aim cycle
    ///
    /// Ignored while a throw is in flight, during the rack-reset window, or
    /// after the game has ended.
    pub fn start_aiming(&mut self) {
        if self.throw_in_progress || self.game_over || self.rack_delay > 0 {
            return;
        }
        if self.aim.phase != AimPhase::Idle {
            return;
        }
        self.aim.begin();
    }

    /// Steer the aim from the pointer's horizontal position
    pub fn update_aim_angle(&mut self, pointer_x: f32, reference_width: f32) {
        self.aim.set_angle_from_pointer(pointer_x, reference_width);
    }

    /// Freeze the oscillating power and current angle
    pub fn stop_aiming(&mut self) {
        self.aim.freeze();
    }

    /// Commit the frozen aim into a launch; ignored unless armed
    pub fn throw_ball(&mut self) {
        if self.aim.phase != AimPhase::Armed || self.throw_in_progress || self.game_over {
            return;
        }
        let power = self.aim.power;
        let angle_deg = self.aim.angle_deg;
        self.ball = Ball::at_start();
        self.ball.vel = launch_velocity(power, angle_deg);
        self.aim.disarm();
        self.throw_in_progress = true;
        self.throw_count += 1;
        self.push_event(GameEvent::BallLaunched { power, angle_deg });
        log::debug!(
            "Throw {} away: power={power:.0} angle={angle_deg:.1}",
            self.throw_count
        );
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all notifications queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the rendering collaborator
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: BallView {
                x: self.ball.pos.x,
                y: self.ball.pos.y,
                radius: self.ball.radius,
                rotation: self.ball.rotation,
            },
            pins: self
                .pins
                .iter()
                .map(|p| PinView {
                    x: p.pos.x,
                    y: p.pos.y,
                    rotation: p.rotation,
                    fallen: p.fallen,
                })
                .collect(),
            is_aiming: self.aim.is_aiming(),
            power: self.aim.power,
            angle: self.aim.angle_deg,
            throw_in_progress: self.throw_in_progress,
            game_over: self.game_over,
            scores: self.scorecard.cumulative_scores(),
            current_frame: self.scorecard.frame_index(),
            current_frame_throws: self.scorecard.current_throws().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rack_layout_is_triangular() {
        let pins = fresh_rack();
        assert_eq!(pins.len(), PIN_COUNT);
        // Head pin dead center, nearest the bowler
        assert_eq!(pins[0].pos.x, LANE_WIDTH / 2.0);
        assert!(pins.iter().all(|p| p.pos.y <= HEAD_PIN_Y));
        // Back-row corners are the widest pins
        let max_offset = pins
            .iter()
            .map(|p| (p.pos.x - LANE_WIDTH / 2.0).abs())
            .fold(0.0f32, f32::max);
        assert_eq!(max_offset, 1.5 * PIN_SPACING);
    }

    #[test]
    fn test_rack_has_no_overlapping_pins() {
        let pins = fresh_rack();
        for a in &pins {
            for b in &pins {
                if a.slot != b.slot {
                    assert!((a.pos - b.pos).length() > a.radius + b.radius);
                }
            }
        }
    }

    #[test]
    fn test_throw_requires_armed_aim() {
        let mut state = GameState::new(1);
        state.throw_ball();
        assert!(!state.throw_in_progress);

        state.start_aiming();
        state.throw_ball();
        assert!(!state.throw_in_progress);

        state.stop_aiming();
        state.throw_ball();
        assert!(state.throw_in_progress);
    }

    #[test]
    fn test_start_aiming_blocked_during_throw() {
        let mut state = GameState::new(1);
        state.start_aiming();
        state.stop_aiming();
        state.throw_ball();

        state.start_aiming();
        assert_eq!(state.aim.phase, AimPhase::Idle);
    }

    #[test]
    fn test_reset_reinitializes_everything() {
        let mut state = GameState::new(42);
        state.start_aiming();
        state.stop_aiming();
        state.throw_ball();
        state.pins[0].fallen = true;

        state.reset();
        assert_eq!(state.seed, 42);
        assert!(!state.throw_in_progress);
        assert_eq!(state.pins_down(), 0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(7);
        state.start_aiming();
        let snap = state.snapshot();
        assert!(snap.is_aiming);
        assert_eq!(snap.pins.len(), PIN_COUNT);
        assert_eq!(snap.scores, [None; FRAME_COUNT]);
        assert_eq!(snap.current_frame, 0);
    }
}
