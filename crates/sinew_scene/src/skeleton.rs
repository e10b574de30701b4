//! Skin Binder & Skinning Updater
//!
//! A [`Skin`] is the immutable descriptor delivered by the asset parser: an
//! ordered joint list and one inverse bind matrix per joint. Binding it
//! against a [`SceneGraph`] yields a [`SkinState`] that owns the inverse bind
//! matrices and the per-joint output consumed by rendering:
//!
//! ```text
//! joint_matrices[j] = global(joints[j]) * inverse_bind_matrices[j]
//! ```
//!
//! # Joint order invariant
//!
//! `joint_matrices` is always written in **skin-declared joint order**, and
//! its length never changes after binding. Global transforms are produced in
//! traversal emission order rooted at `joints[0]`; the updater maps every
//! joint onto its emission slot through [`GlobalTransforms::slot_of`] and
//! rejects global transforms from a traversal with any other root. Joint list
//! order and traversal order therefore never need to coincide.

use glam::Mat4;
use log::{trace, warn};
use sinew_core::{NodeIndex, Result, SinewError};

use crate::graph::SceneGraph;
use crate::transform_system::{GlobalTransforms, compute_global_transforms, compute_local_transforms};

/// Skin descriptor: joints and their inverse bind matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Skin {
    pub name: String,
    joints: Vec<NodeIndex>,
    inverse_bind_matrices: Vec<Mat4>,
}

impl Skin {
    /// Fails with [`SinewError::SkinDataMismatch`] when the two lists differ
    /// in length and with [`SinewError::EmptySkin`] when there are no joints.
    pub fn new(
        name: impl Into<String>,
        joints: Vec<NodeIndex>,
        inverse_bind_matrices: Vec<Mat4>,
    ) -> Result<Self> {
        if joints.len() != inverse_bind_matrices.len() {
            return Err(SinewError::SkinDataMismatch {
                joints: joints.len(),
                inverse_bind_matrices: inverse_bind_matrices.len(),
            });
        }
        if joints.is_empty() {
            return Err(SinewError::EmptySkin);
        }

        Ok(Self {
            name: name.into(),
            joints,
            inverse_bind_matrices,
        })
    }

    /// Skin whose inverse bind matrices are all identity.
    pub fn with_identity_inverse_binds(
        name: impl Into<String>,
        joints: Vec<NodeIndex>,
    ) -> Result<Self> {
        let count = joints.len();
        Self::new(name, joints, vec![Mat4::IDENTITY; count])
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[NodeIndex] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    /// `joints[0]`, the root of every traversal for this skin.
    #[inline]
    #[must_use]
    pub fn root_joint(&self) -> NodeIndex {
        self.joints[0]
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }
}

/// Runtime state of a bound skin.
#[derive(Debug, Clone)]
pub struct SkinState {
    name: String,
    joints: Vec<NodeIndex>,

    // Static after binding
    inverse_bind_matrices: Vec<Mat4>,
    initial_global_transforms: GlobalTransforms,
    bind_joint_matrices: Vec<Mat4>,

    // Rewritten every animated frame
    joint_matrices: Vec<Mat4>,
}

/// Binds `skin` against the bind pose stored in `graph`.
///
/// Joints outside the subtree of `joints[0]` are reported and keep an
/// identity joint matrix; a missing root joint cannot be bound and fails.
pub fn bind_skin(graph: &SceneGraph, skin: &Skin) -> Result<SkinState> {
    if skin.joints.len() != skin.inverse_bind_matrices.len() {
        return Err(SinewError::SkinDataMismatch {
            joints: skin.joints.len(),
            inverse_bind_matrices: skin.inverse_bind_matrices.len(),
        });
    }
    if skin.joints.is_empty() {
        return Err(SinewError::EmptySkin);
    }

    let root = skin.root_joint();
    let locals = compute_local_transforms(graph, root)?;
    let globals = compute_global_transforms(graph, &locals, root, Mat4::IDENTITY)?;

    for (j, &joint) in skin.joints.iter().enumerate() {
        if globals.slot_of(joint).is_none() {
            warn!(
                "Skin '{}': joint {j} (node {joint}) is not reachable from root joint {root}; skipped",
                skin.name
            );
        }
    }

    let mut state = SkinState {
        name: skin.name.clone(),
        joints: skin.joints.clone(),
        inverse_bind_matrices: skin.inverse_bind_matrices.clone(),
        initial_global_transforms: GlobalTransforms::new(),
        bind_joint_matrices: Vec::new(),
        joint_matrices: vec![Mat4::IDENTITY; skin.joints.len()],
    };
    state.write_joint_matrices(&globals);
    state.bind_joint_matrices.clone_from(&state.joint_matrices);
    state.initial_global_transforms = globals;

    Ok(state)
}

/// Recomputes the joint matrices of `state` from this frame's global
/// transforms. See [`SkinState::update`].
pub fn update_skin<'a>(state: &'a mut SkinState, globals: &GlobalTransforms) -> Result<&'a [Mat4]> {
    state.update(globals)
}

impl SkinState {
    /// Overwrites the joint matrices from `globals`.
    ///
    /// `globals` must come from a traversal rooted at the skin's root joint,
    /// otherwise [`SinewError::TraversalRootMismatch`] is returned and nothing
    /// is written. Unreached joints keep their previous matrix.
    pub fn update(&mut self, globals: &GlobalTransforms) -> Result<&[Mat4]> {
        let expected = self.root();
        match globals.root() {
            Some(found) if found == expected => {}
            Some(found) => return Err(SinewError::TraversalRootMismatch { expected, found }),
            None => return Err(SinewError::missing_node("global transform traversal", expected)),
        }

        let skipped = self.write_joint_matrices(globals);
        if skipped > 0 {
            trace!("Skin '{}': {skipped} unreached joint(s) left unchanged", self.name);
        }
        Ok(&self.joint_matrices)
    }

    fn write_joint_matrices(&mut self, globals: &GlobalTransforms) -> usize {
        let mut skipped = 0;
        for ((output, &joint), ibm) in self
            .joint_matrices
            .iter_mut()
            .zip(&self.joints)
            .zip(&self.inverse_bind_matrices)
        {
            match globals.get(joint) {
                Some(world) => *output = world * *ibm,
                None => skipped += 1,
            }
        }
        skipped
    }

    /// Restores the joint matrices computed at bind time.
    pub fn reset_to_bind_pose(&mut self) {
        self.joint_matrices.clone_from(&self.bind_joint_matrices);
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[NodeIndex] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.joints[0]
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    /// Global transforms of the bind pose, in emission order.
    #[inline]
    #[must_use]
    pub fn initial_global_transforms(&self) -> &GlobalTransforms {
        &self.initial_global_transforms
    }

    #[inline]
    #[must_use]
    pub fn bind_joint_matrices(&self) -> &[Mat4] {
        &self.bind_joint_matrices
    }

    /// Final skinning matrices, one per joint in skin-declared order.
    #[inline]
    #[must_use]
    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joint_matrices
    }

    /// Joint matrices as raw bytes, ready for a uniform/storage upload.
    #[inline]
    #[must_use]
    pub fn joint_matrices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.joint_matrices)
    }

    /// Whether the joint list matches the traversal emission order, i.e.
    /// joint `j` is emitted at slot `j`.
    #[must_use]
    pub fn is_traversal_ordered(&self) -> bool {
        let order = self.initial_global_transforms.order();
        self.joints.len() <= order.len() && self.joints.iter().zip(order).all(|(a, b)| a == b)
    }
}
