use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_BACKGROUND_LEVEL, DEFAULT_INNER_RADIUS, DEFAULT_OUTER_RADIUS,
};

/// Radii of the cosine taper, in pixels of the frame grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
        }
    }
}

/// Which frames of a sequence the pipelines visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameBoundary {
    /// Frames `0..N-1`; the final frame is skipped.
    #[default]
    DropLast,
    /// Every frame.
    All,
}

impl FrameBoundary {
    /// Number of frames processed out of a sequence of `total`.
    pub fn frames_to_process(self, total: usize) -> usize {
        match self {
            FrameBoundary::DropLast => total.saturating_sub(1),
            FrameBoundary::All => total,
        }
    }
}

/// Settings for the masked pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub window: WindowConfig,
    pub boundary: FrameBoundary,
    /// Value that zero-weight pixels are pulled toward.
    pub background_level: f64,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            boundary: FrameBoundary::default(),
            background_level: DEFAULT_BACKGROUND_LEVEL,
        }
    }
}
