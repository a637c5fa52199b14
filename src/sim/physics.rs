//! Rolling-marble physics
//!
//! Two models run side by side. Within a segment the marble is moved by
//! explicit Euler integration of a rolling acceleration, which gives smooth
//! animation. At each segment boundary the arrival speed is recomputed in
//! closed form from energy conservation, discarding integration drift.

use super::segment::{Segment, SegmentKind};
use super::state::MarbleState;
use crate::consts::{ROLLING_ACCEL_FACTOR, ROLLING_ENERGY_FACTOR};
use crate::settings::SimSettings;

/// Acceleration along the path (m/s²).
///
/// Falls are unconstrained and get full gravity. Lines and arcs are rolling
/// contact: a = (5/7) g sin(theta), with sin(theta) = drop / path length.
pub fn rolling_acceleration(segment: &Segment, gravity: f32) -> f32 {
    match segment.kind {
        SegmentKind::Fall => gravity,
        SegmentKind::Line | SegmentKind::Arc => {
            let length_m = segment.length_m();
            if length_m <= 0.0 {
                return 0.0;
            }
            let sin_theta = segment.delta_height_m() / length_m;
            ROLLING_ACCEL_FACTOR * gravity * sin_theta
        }
    }
}

/// Speed after dropping `delta_h_m` meters from speed `v0`.
///
/// v = sqrt(v0² + (10/7) g h). A rise larger than the marble can climb
/// leaves it at rest rather than producing an imaginary speed.
pub fn speed_from_drop(delta_h_m: f32, v0: f32, gravity: f32) -> f32 {
    let energy_change = ROLLING_ENERGY_FACTOR * gravity * delta_h_m;
    (v0 * v0 + energy_change).max(0.0).sqrt()
}

/// Inelastic impact: v_post = e * v_pre
#[inline]
pub fn apply_impact(speed: f32, restitution: f32) -> f32 {
    speed * restitution
}

/// Output of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub state: MarbleState,
    /// Distance covered this frame (cm)
    pub distance_cm: f32,
    /// Accumulated distance along the segment (cm)
    pub progress_cm: f32,
    /// Fraction of the segment covered, clamped to [0, 1]
    pub progress_ratio: f32,
}

impl Frame {
    /// The marble reached or passed the end of its segment
    pub fn segment_complete(&self) -> bool {
        self.progress_ratio >= 1.0
    }
}

/// Advance the marble by one fixed timestep along `segment`.
///
/// Does not decide what happens at the end of the segment; callers check
/// [`Frame::segment_complete`] and resolve the transition themselves.
pub fn advance_frame(
    state: &MarbleState,
    segment: &Segment,
    progress_cm: f32,
    dt: f32,
    settings: &SimSettings,
) -> Frame {
    let acceleration = rolling_acceleration(segment, settings.gravity);

    // Unclamped: a marble climbing a rise may briefly roll backwards
    let velocity = state.velocity + acceleration * dt;

    let distance_cm = velocity * 100.0 * dt;
    let progress_cm = progress_cm + distance_cm;
    let progress_ratio = segment.progress_ratio(progress_cm);

    let position = match segment.position_at_progress(progress_ratio) {
        Some(p) => p,
        None => {
            log::debug!(
                "No geometry for {:?}, holding marble at {:?}",
                segment.description,
                state.position
            );
            state.position
        }
    };

    Frame {
        state: MarbleState {
            position,
            velocity,
            height: settings.machine_height_cm - position.y,
        },
        distance_cm,
        progress_cm,
        progress_ratio,
    }
}

/// Closed-form arrival speed and post-impact speed at the end of `segment`
pub fn impact_speeds(
    segment: &Segment,
    carried_velocity: f32,
    settings: &SimSettings,
) -> (f32, f32) {
    let pre = speed_from_drop(segment.delta_height_m(), carried_velocity, settings.gravity);
    (pre, apply_impact(pre, settings.restitution))
}

/// Marble parked on the end of `segment` after a transition
#[inline]
pub fn snap_to_end(segment: &Segment, velocity: f32, machine_height_cm: f32) -> MarbleState {
    MarbleState {
        position: segment.end,
        velocity,
        height: machine_height_cm - segment.end.y,
    }
}
