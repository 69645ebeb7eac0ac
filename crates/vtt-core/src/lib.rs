//! VTT Scene Core
//!
//! Core data structures and math for editing scene geometry:
//! - Pole, Wall and Region: the geometry owned by a scene
//! - ControlPoint: the vertex abstraction shared by walls and regions
//! - Grid snapping with hierarchical snap modes
//! - Viewport transform between screen and world space
//! - Segment projection and hit geometry helpers

pub mod geometry;
pub mod grid;
pub mod snapping;
pub mod types;
pub mod viewport;

pub use geometry::*;
pub use grid::*;
pub use snapping::*;
pub use types::*;
pub use viewport::*;
