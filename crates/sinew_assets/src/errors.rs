//! Asset loading errors.

use sinew_core::SinewError;
use thiserror::Error;

/// Failure while importing a skinned asset.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The glTF document or one of its buffers could not be read.
    #[cfg(feature = "gltf")]
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The imported data violates a skinning core contract (malformed skin,
    /// dangling child reference, ...).
    #[error("Invalid skinning data: {0}")]
    Skinning(#[from] SinewError),
}

/// Alias for `Result<T, AssetError>`.
pub type Result<T> = std::result::Result<T, AssetError>;
