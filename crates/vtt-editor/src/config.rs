//! Transformer behavior settings

use serde::{Deserialize, Serialize};
use vtt_core::{SnapConfig, WALL_SNAP};

use crate::hit::HitTestOptions;

/// Wall poles only snap when a grid target is within this distance
pub const WALL_SNAP_TOLERANCE: f32 = 50.0;

/// Settings shared by wall and region transformers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformerConfig {
    /// Master switch for grid snapping
    pub snap_enabled: bool,
    pub snap: SnapConfig,
    /// Maximum distance to a snap target, `None` for unlimited
    pub snap_tolerance: Option<f32>,
    pub hit: HitTestOptions,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            snap: WALL_SNAP,
            snap_tolerance: None,
            hit: HitTestOptions::default(),
        }
    }
}

impl TransformerConfig {
    pub fn wall() -> Self {
        Self {
            snap_tolerance: Some(WALL_SNAP_TOLERANCE),
            ..Self::default()
        }
    }

    pub fn region() -> Self {
        Self::default()
    }

    pub fn with_snap_enabled(mut self, enabled: bool) -> Self {
        self.snap_enabled = enabled;
        self
    }
}
