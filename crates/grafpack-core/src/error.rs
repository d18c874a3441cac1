//! Editor errors.

use crate::shapes::ShapeKind;
use thiserror::Error;

/// Errors reported by the shape factory, the geometry engine and the controller.
///
/// None of these are fatal: the editor state is left exactly as it was before
/// the failing call, except where the controller documents otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A shape kind name outside the closed set of kinds.
    #[error("Unknown shape kind: {0}")]
    UnknownKind(String),
    /// An operation the shape variant does not define (e.g. rotating a circle).
    #[error("{operation} is not supported for {kind}")]
    UnsupportedOperation {
        operation: &'static str,
        kind: ShapeKind,
    },
    /// An action that needs a selected shape was requested with none selected.
    #[error("No shape selected to {action}")]
    NoSelection { action: &'static str },
}

impl EditorError {
    /// Whether this error is a user-facing warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, EditorError::NoSelection { .. })
    }
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
