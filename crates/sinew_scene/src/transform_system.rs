//! Transform Resolver
//!
//! Computes local and global (world) matrices for the subtree below a root
//! node by depth-first, pre-order traversal of a [`SceneGraph`].
//!
//! # Emission order
//!
//! [`compute_global_transforms`] appends one matrix per visited node in
//! traversal order (parent before children, children in declared order); it
//! is **not** indexed by node id. The returned [`GlobalTransforms`] records
//! which node produced each slot, so consumers such as the skinning updater
//! can map their own ordering onto the emission order explicitly.
//!
//! # Preconditions
//!
//! The root must exist and the subtree must be acyclic. Reaching a node twice
//! fails fast with [`SinewError::CyclicHierarchy`] instead of looping.
//!
//! The resolver never mutates the graph.

use glam::Mat4;
use sinew_core::{NodeIndex, Result, SinewError};

use crate::graph::SceneGraph;
use crate::node::Node;

/// Global transforms of one traversal, in emission order.
#[derive(Debug, Clone, Default)]
pub struct GlobalTransforms {
    root: Option<NodeIndex>,
    matrices: Vec<Mat4>,
    /// Node emitted at each slot
    order: Vec<NodeIndex>,
    /// Slot of each node id, `None` when not reached
    slots: Vec<Option<usize>>,
}

impl GlobalTransforms {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of the traversal that produced these matrices.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Matrices in emission order.
    #[inline]
    #[must_use]
    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    /// Node ids in emission order.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Emission slot of `node`, if the traversal reached it.
    #[inline]
    #[must_use]
    pub fn slot_of(&self, node: NodeIndex) -> Option<usize> {
        self.slots.get(node).copied().flatten()
    }

    /// Global matrix of `node`, if the traversal reached it.
    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeIndex) -> Option<Mat4> {
        self.slot_of(node).map(|slot| self.matrices[slot])
    }

    /// `(node, matrix)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Mat4)> {
        self.order.iter().copied().zip(&self.matrices)
    }

    /// Clears the contents, keeping allocations for reuse.
    pub fn clear(&mut self) {
        self.root = None;
        self.matrices.clear();
        self.order.clear();
        self.slots.clear();
    }
}

/// Reusable traversal state: the visited set and the explicit DFS stack.
///
/// Owned by callers that resolve transforms every frame so that repeated
/// traversals only allocate when the graph grows.
#[derive(Debug, Clone, Default)]
pub struct TraversalScratch {
    visited: Vec<bool>,
    stack: Vec<(NodeIndex, Option<NodeIndex>)>,
}

impl TraversalScratch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, node_count: usize) {
        self.visited.clear();
        self.visited.resize(node_count, false);
        self.stack.clear();
    }
}

/// Visits the subtree below `root` in pre-order.
///
/// The visitor receives the node id, the node and the id of the parent it was
/// reached from (`None` for `root`).
pub(crate) fn walk_depth_first<F>(
    graph: &SceneGraph,
    root: NodeIndex,
    scratch: &mut TraversalScratch,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(NodeIndex, &Node, Option<NodeIndex>) -> Result<()>,
{
    scratch.reset(graph.len());
    scratch.stack.push((root, None));

    while let Some((index, parent)) = scratch.stack.pop() {
        let Some(node) = graph.get(index) else {
            let context = match parent {
                Some(parent) => format!("child of node {parent}"),
                None => "traversal root".to_owned(),
            };
            return Err(SinewError::missing_node(context, index));
        };

        if std::mem::replace(&mut scratch.visited[index], true) {
            return Err(SinewError::CyclicHierarchy { node: index });
        }

        visit(index, node, parent)?;

        // Reverse push keeps children in declared order
        for &child in node.children().iter().rev() {
            scratch.stack.push((child, Some(index)));
        }
    }

    Ok(())
}

/// Resolves the local matrix of every node reachable from `root`.
///
/// The result is indexed by node id and has one entry per node in the graph;
/// nodes outside the subtree keep the identity matrix.
pub fn compute_local_transforms(graph: &SceneGraph, root: NodeIndex) -> Result<Vec<Mat4>> {
    let mut locals = Vec::with_capacity(graph.len());
    compute_local_transforms_into(graph, root, &mut locals, &mut TraversalScratch::new())?;
    Ok(locals)
}

/// Buffer-reusing variant of [`compute_local_transforms`].
pub fn compute_local_transforms_into(
    graph: &SceneGraph,
    root: NodeIndex,
    locals: &mut Vec<Mat4>,
    scratch: &mut TraversalScratch,
) -> Result<()> {
    locals.clear();
    locals.resize(graph.len(), Mat4::IDENTITY);

    walk_depth_first(graph, root, scratch, |index, node, _| {
        locals[index] = node.transform.to_matrix();
        Ok(())
    })
}

/// Composes `parent_transform` with the local matrices of the subtree below
/// `root`, emitting `parent_world * locals[node]` for every node in traversal
/// order.
///
/// `locals` is indexed by node id, as produced by [`compute_local_transforms`].
pub fn compute_global_transforms(
    graph: &SceneGraph,
    locals: &[Mat4],
    root: NodeIndex,
    parent_transform: Mat4,
) -> Result<GlobalTransforms> {
    let mut globals = GlobalTransforms::new();
    compute_global_transforms_into(
        graph,
        locals,
        root,
        parent_transform,
        &mut globals,
        &mut TraversalScratch::new(),
    )?;
    Ok(globals)
}

/// Buffer-reusing variant of [`compute_global_transforms`].
///
/// On error `globals` is left empty.
pub fn compute_global_transforms_into(
    graph: &SceneGraph,
    locals: &[Mat4],
    root: NodeIndex,
    parent_transform: Mat4,
    globals: &mut GlobalTransforms,
    scratch: &mut TraversalScratch,
) -> Result<()> {
    globals.clear();
    globals.slots.resize(graph.len(), None);
    globals.root = Some(root);

    let result = walk_depth_first(graph, root, scratch, |index, _, parent| {
        let local = locals
            .get(index)
            .ok_or_else(|| SinewError::missing_node("local transform", index))?;

        // Pre-order: the parent has always been emitted already
        let parent_world = parent
            .and_then(|p| globals.slots[p])
            .map_or(parent_transform, |slot| globals.matrices[slot]);

        globals.slots[index] = Some(globals.matrices.len());
        globals.matrices.push(parent_world * *local);
        globals.order.push(index);
        Ok(())
    });

    if result.is_err() {
        globals.clear();
    }
    result
}
