//! Rube Goldberg marble run
//!
//! Core modules:
//! - `sim`: Deterministic marble simulation (track geometry, integrator, impacts)
//! - `settings`: Physical constants supplied at construction
//! - `error`: Construction-time failures (bad track or settings)

pub mod error;
pub mod settings;
pub mod sim;

pub use error::TrackError;
pub use settings::SimSettings;

use glam::Vec2;

/// Machine and physics constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one frame per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame the stepper will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f32 = 9.81;
    /// Speed retained after each inter-segment impact
    pub const COEFFICIENT_OF_RESTITUTION: f32 = 0.6;

    /// Rolling solid sphere: a = (5/7) g sin(theta)
    pub const ROLLING_ACCEL_FACTOR: f32 = 5.0 / 7.0;
    /// Rolling solid sphere: v² = v0² + (10/7) g h
    pub const ROLLING_ENERGY_FACTOR: f32 = 10.0 / 7.0;

    /// Machine dimensions (cm, origin top-left, y grows downward)
    pub const MACHINE_WIDTH_CM: f32 = 36.0;
    pub const MACHINE_HEIGHT_CM: f32 = 24.0;
    /// Screen scale for renderers
    pub const PX_PER_CM: f32 = 15.0;

    /// Marble defaults
    pub const MARBLE_MASS_KG: f32 = 0.005;
    pub const MARBLE_RADIUS_M: f32 = 0.008;

    /// The bell hangs this far past the end of the last segment (cm)
    pub const BELL_OFFSET_CM: f32 = 1.0;
}

/// Centimeters to meters
#[inline]
pub fn cm_to_m(cm: f32) -> f32 {
    cm / 100.0
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
