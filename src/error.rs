//! Construction-time errors
//!
//! The per-frame simulation never fails; everything that can go wrong is
//! caught when the track or settings are loaded.

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("track has no segments")]
    Empty,
    #[error("segment {index} has invalid length {length}")]
    InvalidLength { index: usize, length: f32 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse track data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
