//! Deterministic marble simulation
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Track geometry is read-only configuration
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod physics;
pub mod segment;
pub mod state;
pub mod tick;
pub mod track;

pub use clock::FixedStepper;
pub use physics::{
    Frame, advance_frame, apply_impact, impact_speeds, rolling_acceleration, speed_from_drop,
};
pub use segment::{ArcGeometry, Segment, SegmentKind};
pub use state::{CollisionEvent, MarbleState, RunStatus, SimSnapshot};
pub use tick::{FinishHook, Simulation, TickOutcome};
pub use track::Track;
