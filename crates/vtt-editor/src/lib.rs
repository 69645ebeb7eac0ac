//! VTT Geometry Editor
//!
//! Interactive editing engine for scene walls and regions.
//!
//! # Architecture
//!
//! - [`Transformer`] - One interaction engine for open polylines (walls) and
//!   closed polygons (regions), parameterized by [`ShapeRules`]
//! - [`TransformerHost`] - The owner of the geometry, notified of committed edits
//! - [`LocalAction`] / [`ActionLog`] - Reversible edit records and the
//!   transaction-scoped undo/redo stack consuming them
//! - [`KeyboardRouter`] - Capture/bubble key dispatch with scoped listener guards
//! - [`hit::hit_test`] - Vertex and line picking with widened hit areas
//!
//! # Example
//!
//! ```ignore
//! use vtt_editor::{RegionTransformer, TransformerHost};
//!
//! let mut editor: RegionTransformer = RegionTransformer::region(vertices, grid);
//! editor.begin_vertex_drag(0);
//! editor.update_vertex_drag(0, pointer, modifiers);
//! editor.end_vertex_drag(0, pointer, modifiers, &mut host);
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod handles;
pub mod history;
pub mod hit;
pub mod host;
pub mod input;
pub mod keyboard;
pub mod selection;
pub mod shape;
pub mod transformer;

pub use actions::{ActionError, ActionSink, LocalAction, VertexMove};
pub use config::TransformerConfig;
pub use error::EditorError;
pub use handles::{HandleTable, VertexHandle};
pub use history::ActionLog;
pub use hit::{HitTarget, HitTestOptions};
pub use host::{TransformerHost, WallBreak};
pub use input::{Key, KeyEvent, KeyOutcome, KeyTarget};
pub use keyboard::{KeyboardRouter, ListenerGuard, Phase};
pub use selection::Selection;
pub use shape::ShapeRules;
pub use transformer::{InsertPreview, RegionTransformer, Transformer, WallTransformer};

pub use vtt_core::KeyModifiers;
