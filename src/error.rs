//! Error types for building an articulated model.

use crate::articulation::SegmentEnd;
use thiserror::Error;

/// Errors that can occur while constructing or attaching limbs and segments.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArticulationError {
    /// A segment (or the seed segment of a limb) was given a non-positive or
    /// non-finite length.
    #[error("invalid segment length: {length} (must be positive and finite)")]
    InvalidLength {
        /// The rejected length.
        length: f32,
    },

    /// A deserialized limb had no segments.
    #[error("limb {limb} has no segments")]
    EmptyLimb {
        /// Name of the offending limb.
        limb: String,
    },

    /// The same limb was attached twice to one end of a segment.
    #[error("limb {limb} is already attached to the {end} of segment {segment}")]
    DuplicateAttachment {
        /// Name of the limb being attached.
        limb: String,
        /// Name of the receiving segment.
        segment: String,
        /// The end that already holds the limb.
        end: SegmentEnd,
    },
}

/// Result alias for articulation operations.
pub type Result<T> = std::result::Result<T, ArticulationError>;
