use glam::{Mat4, Quat, Vec3};
use sinew_core::compose_trs;

/// Local transform of a scene node.
///
/// A node carries either a raw matrix or independent translation / rotation /
/// scale components, never both. The variant is resolved into a dense matrix
/// once per traversal via [`LocalTransform::to_matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalTransform {
    /// Raw local matrix, used verbatim.
    Matrix(Mat4),
    /// Components composed as `T * R * S`.
    Decomposed {
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
}

impl LocalTransform {
    pub const IDENTITY: Self = Self::Decomposed {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::Decomposed {
            translation,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_trs(translation, Quat::IDENTITY, Vec3::ONE)
    }

    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::from_trs(Vec3::ZERO, rotation, Vec3::ONE)
    }

    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self::Matrix(matrix)
    }

    /// Whether this transform is stored as a raw matrix.
    #[inline]
    #[must_use]
    pub fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix(_))
    }

    /// Resolves the transform into a dense local matrix.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        match *self {
            Self::Matrix(matrix) => matrix,
            Self::Decomposed {
                translation,
                rotation,
                scale,
            } => compose_trs(translation, rotation, scale),
        }
    }

    /// Returns `(translation, rotation, scale)`.
    ///
    /// A raw matrix is decomposed; shear present in the matrix is lost.
    #[must_use]
    pub fn to_trs(&self) -> (Vec3, Quat, Vec3) {
        match *self {
            Self::Matrix(matrix) => {
                let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
                (translation, rotation, scale)
            }
            Self::Decomposed {
                translation,
                rotation,
                scale,
            } => (translation, rotation, scale),
        }
    }

    /// Replaces the translation component.
    ///
    /// A matrix transform is first converted to its decomposed form.
    pub fn set_translation(&mut self, translation: Vec3) {
        let (_, rotation, scale) = self.to_trs();
        *self = Self::from_trs(translation, rotation, scale);
    }

    /// Replaces the rotation component.
    pub fn set_rotation(&mut self, rotation: Quat) {
        let (translation, _, scale) = self.to_trs();
        *self = Self::from_trs(translation, rotation, scale);
    }

    /// Replaces the scale component.
    pub fn set_scale(&mut self, scale: Vec3) {
        let (translation, rotation, _) = self.to_trs();
        *self = Self::from_trs(translation, rotation, scale);
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for LocalTransform {
    fn from(matrix: Mat4) -> Self {
        Self::Matrix(matrix)
    }
}
