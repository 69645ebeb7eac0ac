//! Editor error types

use thiserror::Error;
use vtt_core::GeometryError;

use crate::actions::ActionError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    #[error("Line {line} does not exist in a shape of {vertices} vertices")]
    NoSuchLine { line: usize, vertices: usize },
}
