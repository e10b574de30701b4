use glam::{Mat4, Quat, Vec3};
use sinew_core::NodeIndex;
use smallvec::SmallVec;

use crate::transform::LocalTransform;

/// A scene node: hierarchy links plus a local transform.
///
/// # Design Principles
///
/// - Nodes live in a flat arena ([`SceneGraph`](crate::SceneGraph)) and refer
///   to each other by [`NodeIndex`], never by reference
/// - Only the data every traversal needs is stored here
///
/// # Hierarchy
///
/// - `parent`: index of the parent node (`None` for roots)
/// - `children`: ordered child indices; traversals visit them in this order
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: SmallVec<[NodeIndex; 4]>,

    /// Local transform relative to the parent.
    pub transform: LocalTransform,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: LocalTransform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.set_translation(translation);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.set_rotation(rotation);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.set_scale(scale);
        self
    }

    #[must_use]
    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.transform = LocalTransform::Matrix(matrix);
        self
    }

    /// Declares child indices. Only honoured by
    /// [`SceneGraph::from_nodes`](crate::SceneGraph::from_nodes).
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeIndex>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
