//! Fixed-step pacing for variable frame times
//!
//! Hosts that receive real frame deltas (display refresh callbacks, timers)
//! feed them here; the stepper turns them into whole simulation ticks.

use super::state::RunStatus;
use super::tick::{Simulation, TickOutcome};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Accumulates real time and spends it in fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unspent real time (seconds)
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one real frame of `frame_dt` seconds and run the ticks it covers.
    ///
    /// Returns every non-trivial tick outcome in order. Time is dropped while
    /// the simulation is not running so a resume does not burst forward.
    pub fn advance(&mut self, sim: &mut Simulation, frame_dt: f32) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        if sim.status() != RunStatus::Running {
            self.accumulator = 0.0;
            return outcomes;
        }

        let step = sim.settings().time_step;
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            match sim.tick() {
                TickOutcome::Skipped => {
                    self.accumulator = 0.0;
                    break;
                }
                TickOutcome::Advanced => {}
                outcome => outcomes.push(outcome),
            }
            self.accumulator -= step;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= step {
            log::warn!(
                "Dropping {:.3}s of frame time after {} substeps",
                self.accumulator,
                MAX_SUBSTEPS
            );
            self.accumulator = 0.0;
        }
        outcomes
    }
}
