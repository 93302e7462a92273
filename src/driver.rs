//! Fixed-rate scheduling for host applications
//!
//! Hosts call [`Driver::pump`] once per animation frame with wall-clock
//! elapsed time. Two independent schedules share the game state on one
//! thread: the physics tick at `SIM_DT` and the aim power oscillator at
//! `AIM_TICK_PERIOD`. The oscillator's accumulator is zeroed on every exit
//! from the aiming phase, so no cadence leaks across aim cycles.

use crate::consts::*;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Owns the game state and both of its schedules
pub struct Driver {
    pub state: GameState,
    input: TickInput,
    sim_accum: f32,
    aim_accum: f32,
}

impl Driver {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            input: TickInput::default(),
            sim_accum: 0.0,
            aim_accum: 0.0,
        }
    }

    /// Advance both schedules by the elapsed wall-clock seconds
    pub fn pump(&mut self, elapsed: f32) {
        let elapsed = elapsed.min(0.1);

        // Aim oscillator: its own fixed-interval schedule, cancelled the
        // moment aiming ends
        if self.state.aim.is_aiming() {
            self.aim_accum += elapsed;
            while self.aim_accum >= AIM_TICK_PERIOD {
                let step = self.state.tuning.power_step;
                self.state.aim.oscillate(step);
                self.aim_accum -= AIM_TICK_PERIOD;
            }
        } else {
            self.aim_accum = 0.0;
        }

        self.sim_accum += elapsed;
        let mut substeps = 0;
        while self.sim_accum >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input, SIM_DT);
            self.sim_accum -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.press = false;
            self.input.release = false;
            self.input.reset = false;
        }
    }

    /// Press-and-hold began
    pub fn press(&mut self) {
        self.input.press = true;
    }

    /// Hold released
    pub fn release(&mut self) {
        self.input.release = true;
    }

    /// Pointer moved; `reference_width` is the host surface width
    pub fn point(&mut self, pointer_x: f32, reference_width: f32) {
        self.input.pointer_x = Some(pointer_x);
        self.input.reference_width = reference_width;
    }

    /// Request a wholesale new-game reset on the next tick
    pub fn request_reset(&mut self) {
        self.input.reset = true;
        self.sim_accum = 0.0;
        self.aim_accum = 0.0;
    }

    pub fn set_demo_mode(&mut self, on: bool) {
        self.input.demo_mode = on;
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
