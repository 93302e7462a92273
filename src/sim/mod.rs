//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable slot order for the pin rack
//! - No rendering or platform dependencies

pub mod aim;
pub mod collision;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod tick;

pub use aim::{AimPhase, AimState, launch_velocity};
pub use collision::{Contact, circle_contact};
pub use scoring::{FrameRecord, RackAction, Scorecard, ThrowOutcome};
pub use state::{Ball, GameEvent, GameState, Pin, Snapshot, fresh_rack, rack_position};
pub use tick::{TickInput, tick};
