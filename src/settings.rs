//! Simulation settings
//!
//! Physical constants handed to a `Simulation` at construction. Stored as
//! JSON so a host can tweak the machine without recompiling.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TrackError;

/// Physical constants for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimSettings {
    /// Gravitational acceleration (m/s²)
    pub gravity: f32,
    /// Fraction of speed kept after each impact, in (0, 1]
    pub restitution: f32,
    /// Distance from the top edge to the bottom reference line (cm)
    pub machine_height_cm: f32,
    pub machine_width_cm: f32,
    /// Seconds advanced per tick
    pub time_step: f32,

    // === Marble ===
    pub marble_mass_kg: f32,
    pub marble_radius_m: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: COEFFICIENT_OF_RESTITUTION,
            machine_height_cm: MACHINE_HEIGHT_CM,
            machine_width_cm: MACHINE_WIDTH_CM,
            time_step: SIM_DT,

            marble_mass_kg: MARBLE_MASS_KG,
            marble_radius_m: MARBLE_RADIUS_M,
        }
    }
}

impl SimSettings {
    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: g={}, e={}, dt={}",
            settings.gravity,
            settings.restitution,
            settings.time_step
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, TrackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the integrator diverge or stall
    pub fn validate(&self) -> Result<(), TrackError> {
        if !self.gravity.is_finite() {
            return Err(TrackError::InvalidSettings(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(TrackError::InvalidSettings(format!(
                "restitution must be in (0, 1], got {}",
                self.restitution
            )));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(TrackError::InvalidSettings(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if !self.machine_height_cm.is_finite() {
            return Err(TrackError::InvalidSettings(format!(
                "machine height must be finite, got {}",
                self.machine_height_cm
            )));
        }
        Ok(())
    }

    /// Marble radius in centimeters (for renderers)
    pub fn marble_radius_cm(&self) -> f32 {
        self.marble_radius_m * 100.0
    }
}
