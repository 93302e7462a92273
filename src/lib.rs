//! Tenpin - a ten-pin bowling lane simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, aiming, scoring)
//! - `driver`: Fixed-timestep scheduler that pumps the simulation
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory session leaderboard
//!
//! Rendering, input wiring, and audio live in host applications; they feed
//! `TickInput` samples in and read `Snapshot` views out.

pub mod driver;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use driver::Driver;
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation tick rate in Hz
    pub const TICK_RATE: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Period of the aim power oscillator (independent of the physics tick)
    pub const AIM_TICK_PERIOD: f32 = 0.02;

    /// Lane dimensions (canvas-style coordinates, y grows toward the bowler)
    pub const LANE_WIDTH: f32 = 400.0;
    pub const LANE_LENGTH: f32 = 600.0;
    /// Entities past this margin beyond the lane are parked
    pub const OFF_LANE_MARGIN: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 22.0;
    /// Ball start position (bottom center of the lane)
    pub const BALL_START_X: f32 = LANE_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = 540.0;
    /// Ball-pin tests only run once the ball is above this line
    pub const PIN_DECK_Y: f32 = 240.0;

    /// Pin rack layout - head pin nearest the bowler, rows recede up-lane
    pub const PIN_RADIUS: f32 = 9.0;
    pub const PIN_SPACING: f32 = 20.0;
    pub const ROW_SPACING: f32 = 24.0;
    pub const HEAD_PIN_Y: f32 = 180.0;
    pub const PIN_COUNT: usize = 10;

    /// Fraction of ball speed transferred to a struck pin
    pub const PIN_IMPULSE: f32 = 0.6;
    /// Ball speed retained after striking a pin
    pub const BALL_RETENTION: f32 = 0.7;
    /// Per-tick friction decay factors
    pub const BALL_FRICTION: f32 = 0.99;
    pub const PIN_FRICTION: f32 = 0.96;
    /// Felled pins drift down-lane under this acceleration (px/s^2)
    pub const SETTLE_ACCEL: f32 = 540.0;
    /// Settle drift terminal speed (px/s)
    pub const SETTLE_MAX_SPEED: f32 = 360.0;
    /// All entities below this speed (px/s) count as motionless
    pub const SETTLE_EPSILON: f32 = 10.0;
    /// Cosmetic spin from horizontal velocity (radians per px)
    pub const SPIN_FACTOR: f32 = 0.04;

    /// Aim power oscillation bounds and step (triangle wave)
    pub const POWER_MIN: f32 = 20.0;
    pub const POWER_MAX: f32 = 100.0;
    pub const POWER_START: f32 = 50.0;
    pub const POWER_STEP: f32 = 2.0;
    /// Aim angle clamp (degrees either side of straight)
    pub const AIM_ANGLE_LIMIT_DEG: f32 = 30.0;
    /// Degrees of aim per half-lane of pointer offset
    pub const AIM_ANGLE_SCALE_DEG: f32 = 45.0;

    /// Ticks between a throw resolving and the lane resetting
    pub const RACK_DELAY_TICKS: u32 = 45;

    /// Frames per game
    pub const FRAME_COUNT: usize = 10;
}
