//! Shared math helpers.

use glam::{Mat4, Quat, Vec3};

/// Stable index of a node inside a scene graph arena.
pub type NodeIndex = usize;

/// Builds `T * R * S` from decomposed components.
///
/// Scale is applied first, then rotation, then translation, which is the
/// fixed composition order for every decomposed local transform.
#[inline]
#[must_use]
pub fn compose_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}
