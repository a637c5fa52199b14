//! The ordered segment sequence a marble rolls through
//!
//! Tracks are static configuration: validated once when built or loaded,
//! then only read by the simulation.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::segment::{ArcGeometry, Segment};
use crate::consts::BELL_OFFSET_CM;
use crate::error::TrackError;

/// A validated, non-empty sequence of segments
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    segments: Vec<Segment>,
}

impl Track {
    /// Build a track, rejecting empty sequences and unusable lengths.
    ///
    /// Arcs with missing circle parameters are accepted; the simulation
    /// holds the marble's last position while crossing them.
    pub fn new(segments: Vec<Segment>) -> Result<Self, TrackError> {
        if segments.is_empty() {
            return Err(TrackError::Empty);
        }
        for (index, segment) in segments.iter().enumerate() {
            if !segment.length.is_finite() || segment.length < 0.0 {
                return Err(TrackError::InvalidLength {
                    index,
                    length: segment.length,
                });
            }
            if segment.is_incomplete_arc() {
                log::warn!(
                    "Segment {} ({:?}) is an arc without complete circle parameters",
                    index + 1,
                    segment.description
                );
            }
        }
        Ok(Self { segments })
    }

    /// Load a track from a JSON array of segments
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        let segments: Vec<Segment> = serde_json::from_str(json)?;
        let track = Self::new(segments)?;
        log::info!("Loaded track with {} segments", track.len());
        Ok(track)
    }

    pub fn to_json(&self) -> Result<String, TrackError> {
        Ok(serde_json::to_string_pretty(&self.segments)?)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed track
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Where the bell hangs, just past the end of the last segment
    pub fn bell_position(&self) -> Vec2 {
        self.last().end + Vec2::new(BELL_OFFSET_CM, 0.0)
    }

    /// The ten-step reference machine (36 x 24 cm)
    pub fn reference() -> Self {
        let segments = vec![
            Segment::line(Vec2::new(2.0, 2.0), Vec2::new(10.0, 3.0), 8.06)
                .with_description("Initial platform"),
            Segment::fall(Vec2::new(10.0, 3.0), Vec2::new(10.0, 7.0), 4.0)
                .with_description("Drop to Jenga block"),
            Segment::line(Vec2::new(10.0, 7.0), Vec2::new(14.0, 7.0), 4.0)
                .with_description("Jenga block surface"),
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
            .with_description("Left curved tube"),
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
            .with_description("Right curved tube"),
            Segment::line(Vec2::new(14.0, 13.0), Vec2::new(20.0, 15.0), 6.32)
                .with_description("Steep ramp"),
            Segment::line(Vec2::new(20.0, 15.0), Vec2::new(27.0, 15.0), 7.0)
                .with_description("U-Block base"),
            Segment::fall(Vec2::new(27.0, 15.0), Vec2::new(27.0, 19.0), 4.0)
                .with_description("Funnel drop"),
            Segment::line(Vec2::new(27.0, 19.0), Vec2::new(34.0, 22.0), 7.62)
                .with_description("Final ramp"),
            Segment::line(Vec2::new(34.0, 22.0), Vec2::new(35.0, 22.0), 1.0)
                .with_description("Bell strike"),
        ];
        Self { segments }
    }
}
