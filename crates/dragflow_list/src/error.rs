//! Drag list error types

use thiserror::Error;

/// Configuration errors surfaced when a [`crate::DraggableList`] is built.
///
/// Everything that can go wrong at runtime (stale indices, missing
/// measurements, a saturated outer container) is recovered locally and never
/// reaches the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragListError {
    /// No key extractor was supplied
    #[error("a key extractor is required to build a draggable list")]
    MissingKeyExtractor,

    /// A numeric setting is out of range
    #[error("invalid drag list config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f32 },

    /// The settle spring parameters are not usable
    #[error("invalid settle spring: stiffness={stiffness}, damping={damping}, mass={mass}")]
    InvalidSpring {
        stiffness: f32,
        damping: f32,
        mass: f32,
    },
}

/// Result type for drag list operations
pub type Result<T> = std::result::Result<T, DragListError>;
