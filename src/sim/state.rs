//! Observable simulation state
//!
//! Every value here is replaced wholesale by the tick driver rather than
//! edited in place, so observers can hold on to copies freely.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cm_to_m;

/// Run status of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Not started yet (or reset)
    #[default]
    Idle,
    /// Advancing on every tick
    Running,
    /// Suspended, all progress retained
    Paused,
    /// Bell struck; terminal until reset
    Finished,
}

/// The marble as seen by observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarbleState {
    /// Position (cm)
    pub position: Vec2,
    /// Speed along the path (m/s)
    pub velocity: f32,
    /// Height above the machine's bottom edge (cm)
    pub height: f32,
}

impl MarbleState {
    /// Marble sitting still at `position`
    pub fn at_rest(position: Vec2, machine_height_cm: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
            height: machine_height_cm - position.y,
        }
    }

    #[inline]
    pub fn height_m(&self) -> f32 {
        cm_to_m(self.height)
    }

    /// Kinetic energy of a rolling solid sphere, K = (7/10) m v² (J)
    pub fn kinetic_energy(&self, mass_kg: f32) -> f32 {
        0.7 * mass_kg * self.velocity * self.velocity
    }

    /// Potential energy above the bottom edge, PE = m g h (J)
    pub fn potential_energy(&self, mass_kg: f32, gravity: f32) -> f32 {
        mass_kg * gravity * self.height_m()
    }
}

/// One inter-segment impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// The segment just completed (1-based)
    pub segment_index: usize,
    /// Speed arriving at the next surface (m/s)
    pub speed_pre_impact: f32,
    /// Speed after restitution (m/s)
    pub speed_post_impact: f32,
    /// Seconds since the run started
    pub timestamp: f32,
}

impl fmt::Display for CollisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}  {:>8.2}  {:>8.2}  {:>7.2}s",
            self.segment_index, self.speed_pre_impact, self.speed_post_impact, self.timestamp
        )
    }
}

/// Immutable copy of everything an observer can read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub status: RunStatus,
    pub marble: MarbleState,
    /// 0-based index of the segment being traversed
    pub active_segment_index: usize,
    pub segment_count: usize,
    pub collision_log: Vec<CollisionEvent>,
}
