//! Application configuration module
//!
//! Editor preferences (snapping, grid, hit sizes, history depth) and UI
//! settings, persisted as RON.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use serde::{Deserialize, Serialize};
use vtt_editor::{HitTestOptions, TransformerConfig};

/// Editor preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Snap dragged and inserted vertices to the grid
    pub snap_to_grid: bool,
    /// Draw grid lines
    pub show_grid: bool,
    /// Grid cell size in world units
    pub grid_cell_size: f32,
    /// Undo entries kept per editing session
    pub max_history: usize,
    /// Handle sizes in screen pixels
    #[serde(default)]
    pub hit: HitTestOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            show_grid: true,
            grid_cell_size: 50.0,
            max_history: 50,
            hit: HitTestOptions::default(),
        }
    }
}

impl EditorConfig {
    /// Apply these preferences to a transformer configuration
    pub fn apply_to(&self, base: TransformerConfig) -> TransformerConfig {
        TransformerConfig {
            snap_enabled: self.snap_to_grid,
            hit: self.hit,
            ..base
        }
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// UI theme
    pub theme: UiTheme,
    /// Width of the scene panel
    pub side_panel_width: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            side_panel_width: 220.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Editor settings
    #[serde(default)]
    pub editor: EditorConfig,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}
