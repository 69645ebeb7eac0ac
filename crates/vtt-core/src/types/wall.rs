//! Wall and pole definitions

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ControlPoint;

/// Default wall height at a pole, in world units
pub const DEFAULT_POLE_HEIGHT: f32 = 1.0;

/// A wall vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    pub position: Vec2,
    /// Wall height at this pole
    pub h: f32,
}

impl Pole {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            h: DEFAULT_POLE_HEIGHT,
        }
    }

    pub fn with_height(mut self, h: f32) -> Self {
        self.h = h;
        self
    }
}

impl From<Vec2> for Pole {
    fn from(position: Vec2) -> Self {
        Self {
            position,
            h: DEFAULT_POLE_HEIGHT,
        }
    }
}

impl ControlPoint for Pole {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// Wall visibility for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WallVisibility {
    #[default]
    Normal,
    Fence,
    Invisible,
}

/// An open polyline of poles blocking movement and sight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: Uuid,
    pub name: String,
    pub poles: Vec<Pole>,
    #[serde(default)]
    pub visibility: WallVisibility,
}

impl Wall {
    /// Minimum number of poles a wall keeps
    pub const MIN_POLES: usize = 2;

    pub fn new(name: impl Into<String>, poles: Vec<Pole>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            poles,
            visibility: WallVisibility::default(),
        }
    }

    /// Number of segments (no closing segment)
    pub fn segment_count(&self) -> usize {
        self.poles.len().saturating_sub(1)
    }
}
