//! Error Types
//!
//! This module defines the error types shared by every Sinew crate.
//!
//! # Overview
//!
//! The main error type [`SinewError`] covers the contract violations of the
//! skinning core:
//! - Skin setup failures (joint / inverse-bind-matrix count mismatch)
//! - Malformed keyframe tracks
//! - Corrupt hierarchies (cycles, dangling node references)
//!
//! Only per-channel and per-joint failures are recovered from (the offending
//! item is skipped with a warning). Everything else is surfaced to the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sinew_core::errors::{SinewError, Result};
//!
//! fn bind() -> Result<()> {
//!     Err(SinewError::EmptySkin)
//! }
//! ```

use thiserror::Error;

use crate::NodeIndex;

/// The main error type for the Sinew skinning core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SinewError {
    // ========================================================================
    // Skin Errors
    // ========================================================================
    /// A skin declares a different number of joints and inverse bind matrices.
    #[error(
        "Skin data mismatch: {joints} joints but {inverse_bind_matrices} inverse bind matrices"
    )]
    SkinDataMismatch {
        /// Number of joints declared by the skin
        joints: usize,
        /// Number of inverse bind matrices supplied
        inverse_bind_matrices: usize,
    },

    /// A skin without any joint cannot be bound.
    #[error("Skin has no joints")]
    EmptySkin,

    /// Global transforms handed to the skinning updater come from a traversal
    /// that does not start at the skeleton root.
    #[error("Traversal root mismatch: skin expects node {expected}, got node {found}")]
    TraversalRootMismatch {
        /// Root joint the skin was bound against
        expected: NodeIndex,
        /// Root of the supplied traversal
        found: NodeIndex,
    },

    // ========================================================================
    // Keyframe Track Errors
    // ========================================================================
    /// A track has fewer than the two samples needed to form an interval.
    #[error("Insufficient keyframes: {count} sample(s), at least 2 required")]
    InsufficientKeyframes {
        /// Number of samples in the track
        count: usize,
    },

    /// Track input and output arrays have different lengths.
    #[error("Track length mismatch: {times} times but {values} values")]
    TrackLengthMismatch {
        /// Number of time samples
        times: usize,
        /// Number of output values
        values: usize,
    },

    /// Track input is decreasing or not finite at the given sample.
    #[error("Keyframe times must be finite and non-decreasing (sample {index})")]
    UnsortedKeyframes {
        /// First offending sample
        index: usize,
    },

    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// A traversal reached the same node twice.
    #[error("Cyclic hierarchy: node {node} reached twice")]
    CyclicHierarchy {
        /// Node that was revisited
        node: NodeIndex,
    },

    /// A node, joint or channel refers to an index outside the node arena.
    #[error("Missing node reference: {context} (index: {index})")]
    MissingNodeReference {
        /// Description of what held the reference
        context: String,
        /// The invalid index
        index: NodeIndex,
    },
}

impl SinewError {
    /// Shorthand for [`SinewError::MissingNodeReference`].
    pub fn missing_node(context: impl Into<String>, index: NodeIndex) -> Self {
        SinewError::MissingNodeReference {
            context: context.into(),
            index,
        }
    }
}

/// Alias for `Result<T, SinewError>`.
pub type Result<T> = std::result::Result<T, SinewError>;
