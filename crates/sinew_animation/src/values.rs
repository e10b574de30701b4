use glam::{Quat, Vec3};

/// Keyframe output types stored as a fixed number of float components.
///
/// Used to extract raw track values from flat accessor data: vec3 for
/// translation and scale, `(x, y, z, w)` quaternions for rotation.
pub trait KeyframeValue: Copy + std::fmt::Debug + PartialEq {
    /// Floats per keyframe value.
    const COMPONENTS: usize;

    /// Builds a value from the first [`Self::COMPONENTS`] floats of
    /// `components`. Extra floats are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `components` holds fewer than [`Self::COMPONENTS`] floats.
    fn from_components(components: &[f32]) -> Self;
}

impl KeyframeValue for Vec3 {
    const COMPONENTS: usize = 3;

    fn from_components(components: &[f32]) -> Self {
        Vec3::from_slice(components)
    }
}

impl KeyframeValue for Quat {
    const COMPONENTS: usize = 4;

    fn from_components(components: &[f32]) -> Self {
        Quat::from_xyzw(components[0], components[1], components[2], components[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_components() {
        assert_eq!(Vec3::from_components(&[1.0, 2.0, 3.0, 9.0]), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Quat::from_components(&[0.0, 0.0, 0.0, 1.0]), Quat::IDENTITY);
    }

    #[test]
    #[should_panic]
    fn short_vec3_slice_panics() {
        let _ = Vec3::from_components(&[1.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn short_quat_slice_panics() {
        let _ = Quat::from_components(&[0.0, 0.0, 1.0]);
    }
}
