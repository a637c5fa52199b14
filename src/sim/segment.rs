//! Track segment geometry
//!
//! A segment is one fixed piece of the machine: a straight line, a vertical
//! fall or a circular arc. All coordinates are in centimeters with the origin
//! at the top-left corner and y growing downward, so `end.y - start.y > 0`
//! means the marble drops.
//!
//! Arc angles follow the canvas convention: increasing angle turns clockwise
//! on screen.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cm_to_m, polar_to_cartesian};

/// Shape of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Straight ramp or platform (rolling contact)
    Line,
    /// Vertical drop (free fall, no surface contact)
    Fall,
    /// Circular tube (rolling contact)
    Arc,
}

/// Complete circle parameters of an arc segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Vec2,
    pub radius: f32,
    /// Start angle (radians)
    pub start_angle: f32,
    /// End angle (radians)
    pub end_angle: f32,
    /// Sweep toward decreasing angles
    pub anticlockwise: bool,
}

impl ArcGeometry {
    /// Signed angular sweep from start to end in the arc's direction
    pub fn sweep(&self) -> f32 {
        if self.anticlockwise {
            let mut span = self.start_angle - self.end_angle;
            if span < 0.0 {
                span += TAU;
            }
            -span
        } else {
            let mut span = self.end_angle - self.start_angle;
            if span < 0.0 {
                span += TAU;
            }
            span
        }
    }

    /// Point on the circle at the given fraction of the sweep
    pub fn point_at(&self, ratio: f32) -> Vec2 {
        let angle = self.start_angle + self.sweep() * ratio;
        self.center + polar_to_cartesian(self.radius, angle)
    }
}

/// One immutable piece of the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub start: Vec2,
    pub end: Vec2,
    /// Path length (cm), authored rather than derived
    pub length: f32,
    // Arc-only; all four must be present for the arc to be usable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_angle: Option<f32>,
    #[serde(default)]
    pub anticlockwise: bool,
    /// Human-readable label ("Funnel drop")
    #[serde(default)]
    pub description: String,
}

impl Segment {
    fn new(kind: SegmentKind, start: Vec2, end: Vec2, length: f32) -> Self {
        Self {
            kind,
            start,
            end,
            length,
            center: None,
            radius: None,
            start_angle: None,
            end_angle: None,
            anticlockwise: false,
            description: String::new(),
        }
    }

    pub fn line(start: Vec2, end: Vec2, length: f32) -> Self {
        Self::new(SegmentKind::Line, start, end, length)
    }

    pub fn fall(start: Vec2, end: Vec2, length: f32) -> Self {
        Self::new(SegmentKind::Fall, start, end, length)
    }

    pub fn arc(start: Vec2, end: Vec2, arc: ArcGeometry, length: f32) -> Self {
        Self {
            center: Some(arc.center),
            radius: Some(arc.radius),
            start_angle: Some(arc.start_angle),
            end_angle: Some(arc.end_angle),
            anticlockwise: arc.anticlockwise,
            ..Self::new(SegmentKind::Arc, start, end, length)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Circle parameters, if every arc field is present
    pub fn arc_geometry(&self) -> Option<ArcGeometry> {
        Some(ArcGeometry {
            center: self.center?,
            radius: self.radius?,
            start_angle: self.start_angle?,
            end_angle: self.end_angle?,
            anticlockwise: self.anticlockwise,
        })
    }

    /// Arc segment with missing circle parameters
    pub fn is_incomplete_arc(&self) -> bool {
        self.kind == SegmentKind::Arc && self.arc_geometry().is_none()
    }

    /// Net drop from start to end (meters, positive = downward)
    #[inline]
    pub fn delta_height_m(&self) -> f32 {
        cm_to_m(self.end.y - self.start.y)
    }

    #[inline]
    pub fn length_m(&self) -> f32 {
        cm_to_m(self.length)
    }

    /// Fraction of the segment covered after `progress_cm`, clamped to [0, 1].
    ///
    /// A zero-length segment counts as already complete.
    pub fn progress_ratio(&self, progress_cm: f32) -> f32 {
        if self.length <= 0.0 {
            return 1.0;
        }
        (progress_cm / self.length).clamp(0.0, 1.0)
    }

    /// Position after covering `ratio` of the segment.
    ///
    /// Returns `None` for an arc without complete circle parameters; callers
    /// hold the previous position in that case.
    pub fn position_at_progress(&self, ratio: f32) -> Option<Vec2> {
        match self.kind {
            SegmentKind::Line | SegmentKind::Fall => Some(self.start.lerp(self.end, ratio)),
            SegmentKind::Arc => self.arc_geometry().map(|arc| arc.point_at(ratio)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    fn left_tube() -> Segment {
        Segment::arc(
            Vec2::new(14.0, 7.0),
            Vec2::new(11.0, 10.0),
            ArcGeometry {
                center: Vec2::new(11.0, 7.0),
                radius: 3.0,
                start_angle: 0.0,
                end_angle: FRAC_PI_2,
                anticlockwise: false,
            },
            4.71,
        )
    }

    fn right_tube() -> Segment {
        Segment::arc(
            Vec2::new(11.0, 10.0),
            Vec2::new(14.0, 13.0),
            ArcGeometry {
                center: Vec2::new(14.0, 10.0),
                radius: 3.0,
                start_angle: PI,
                end_angle: FRAC_PI_2,
                anticlockwise: true,
            },
            4.71,
        )
    }

    #[test]
    fn test_line_interpolates() {
        let seg = Segment::line(Vec2::new(2.0, 2.0), Vec2::new(10.0, 3.0), 8.06);
        assert!(close(seg.position_at_progress(0.0).unwrap(), seg.start));
        assert!(close(seg.position_at_progress(1.0).unwrap(), seg.end));
        assert!(close(seg.position_at_progress(0.5).unwrap(), Vec2::new(6.0, 2.5)));
    }

    #[test]
    fn test_fall_interpolates() {
        let seg = Segment::fall(Vec2::new(10.0, 3.0), Vec2::new(10.0, 7.0), 4.0);
        assert!(close(seg.position_at_progress(0.25).unwrap(), Vec2::new(10.0, 4.0)));
        assert!((seg.delta_height_m() - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_clockwise_arc_endpoints() {
        let seg = left_tube();
        assert!(close(seg.position_at_progress(0.0).unwrap(), seg.start));
        assert!(close(seg.position_at_progress(1.0).unwrap(), seg.end));
        // Midpoint stays on the circle
        let mid = seg.position_at_progress(0.5).unwrap();
        assert!(((mid - Vec2::new(11.0, 7.0)).length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_anticlockwise_arc_endpoints() {
        let seg = right_tube();
        assert!(close(seg.position_at_progress(0.0).unwrap(), seg.start));
        assert!(close(seg.position_at_progress(1.0).unwrap(), seg.end));
        // Passes through the lower-left quadrant of its circle
        let mid = seg.position_at_progress(0.5).unwrap();
        assert!(mid.x < 14.0 && mid.y > 10.0);
    }

    #[test]
    fn test_sweep_wraps_around() {
        let arc = ArcGeometry {
            center: Vec2::ZERO,
            radius: 1.0,
            start_angle: 3.0 * FRAC_PI_2,
            end_angle: 0.0,
            anticlockwise: false,
        };
        assert!((arc.sweep() - FRAC_PI_2).abs() < 1e-5);

        let arc = ArcGeometry {
            anticlockwise: true,
            start_angle: 0.0,
            end_angle: 3.0 * FRAC_PI_2,
            ..arc
        };
        assert!((arc.sweep() + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_incomplete_arc_has_no_position() {
        let mut seg = left_tube();
        seg.radius = None;
        assert!(seg.is_incomplete_arc());
        assert!(seg.position_at_progress(0.5).is_none());
    }

    #[test]
    fn test_zero_length_is_complete() {
        let seg = Segment::line(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), 0.0);
        assert_eq!(seg.progress_ratio(0.0), 1.0);
        assert_eq!(seg.length_m(), 0.0);
    }

    #[test]
    fn test_progress_ratio_clamps() {
        let seg = Segment::line(Vec2::ZERO, Vec2::new(4.0, 0.0), 4.0);
        assert!((seg.progress_ratio(1.0) - 0.25).abs() < 1e-6);
        assert_eq!(seg.progress_ratio(9.0), 1.0);
        // Rolling back past the start stays on the segment
        assert_eq!(seg.progress_ratio(-3.0), 0.0);
    }

    #[test]
    fn test_arc_json_shape() {
        let json = r#"{
            "type": "arc",
            "start": [14.0, 7.0],
            "end": [11.0, 10.0],
            "center": [11.0, 7.0],
            "radius": 3.0,
            "startAngle": 0.0,
            "endAngle": 1.5707964,
            "anticlockwise": false,
            "length": 4.71,
            "description": "Left curved tube"
        }"#;
        let seg: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(seg.kind, SegmentKind::Arc);
        assert_eq!(seg.description, "Left curved tube");
        assert!(seg.arc_geometry().is_some());
    }

    proptest! {
        #[test]
        fn prop_straight_endpoints(
            sx in -50.0f32..50.0, sy in -50.0f32..50.0,
            ex in -50.0f32..50.0, ey in -50.0f32..50.0,
            fall in any::<bool>(),
        ) {
            let (start, end) = (Vec2::new(sx, sy), Vec2::new(ex, ey));
            let length = (end - start).length().max(0.1);
            let seg = if fall {
                Segment::fall(start, end, length)
            } else {
                Segment::line(start, end, length)
            };
            prop_assert!(close(seg.position_at_progress(0.0).unwrap(), start));
            prop_assert!(close(seg.position_at_progress(1.0).unwrap(), end));
        }

        #[test]
        fn prop_arc_endpoints(
            radius in 0.5f32..10.0,
            start_angle in -PI..PI,
            end_angle in -PI..PI,
            anticlockwise in any::<bool>(),
        ) {
            let arc = ArcGeometry {
                center: Vec2::new(5.0, 5.0),
                radius,
                start_angle,
                end_angle,
                anticlockwise,
            };
            let start = arc.center + polar_to_cartesian(radius, start_angle);
            let end = arc.center + polar_to_cartesian(radius, end_angle);
            let seg = Segment::arc(start, end, arc, 1.0);
            let p0 = seg.position_at_progress(0.0).unwrap();
            let p1 = seg.position_at_progress(1.0).unwrap();
            prop_assert!((p0 - start).length() < 1e-3);
            prop_assert!((p1 - end).length() < 1e-3);
        }
    }
}
