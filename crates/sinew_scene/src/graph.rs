//! Scene Graph Model
//!
//! A flat arena of [`Node`]s addressed by stable [`NodeIndex`] values.
//! Traversals always take the arena plus a root index and never follow live
//! references, so the same child lists can be walked by several passes per
//! frame without aliasing concerns.

use log::warn;
use rustc_hash::FxHashMap;
use sinew_core::{NodeIndex, Result, SinewError};

use crate::node::Node;

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    /// First node registered under each name
    names: FxHashMap<String, NodeIndex>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from parser-supplied node records.
    ///
    /// Child lists declared with [`Node::with_children`] are kept and parent
    /// links are derived from them. A child listed under several parents keeps
    /// the last one as its parent (with a warning); the traversal will still
    /// reject the shared child as a revisit.
    pub fn from_nodes(mut nodes: Vec<Node>) -> Result<Self> {
        let len = nodes.len();

        let mut links = Vec::new();
        for (parent, node) in nodes.iter().enumerate() {
            for &child in &node.children {
                if child >= len {
                    return Err(SinewError::missing_node(
                        format!("child of node {parent}"),
                        child,
                    ));
                }
                links.push((parent, child));
            }
        }

        for node in &mut nodes {
            node.parent = None;
        }
        for (parent, child) in links {
            if let Some(previous) = nodes[child].parent {
                warn!("Node {child} is listed under nodes {previous} and {parent}; keeping {parent}");
            }
            nodes[child].parent = Some(parent);
        }

        let mut names = FxHashMap::default();
        for (index, node) in nodes.iter().enumerate() {
            names.entry(node.name.clone()).or_insert(index);
        }

        Ok(Self { nodes, names })
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Inserts `node` as a detached root and returns its index.
    ///
    /// Hierarchy links carried by `node` are discarded; use [`Self::attach`].
    pub fn add_node(&mut self, mut node: Node) -> NodeIndex {
        node.parent = None;
        node.children.clear();

        let index = self.nodes.len();
        self.names.entry(node.name.clone()).or_insert(index);
        self.nodes.push(node);
        index
    }

    /// Inserts `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeIndex, node: Node) -> Result<NodeIndex> {
        if !self.contains(parent) {
            return Err(SinewError::missing_node("parent node", parent));
        }
        let index = self.add_node(node);
        self.attach(parent, index)?;
        Ok(index)
    }

    /// Makes `child` the last child of `parent`, detaching it from any
    /// previous parent.
    ///
    /// Fails with [`SinewError::CyclicHierarchy`] if `child` is `parent` or one
    /// of its ancestors.
    pub fn attach(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<()> {
        if !self.contains(parent) {
            return Err(SinewError::missing_node("parent node", parent));
        }
        if !self.contains(child) {
            return Err(SinewError::missing_node("child node", child));
        }

        // Walk up from `parent`; the step bound guards against corrupt links.
        let mut cursor = Some(parent);
        let mut steps = 0;
        while let Some(ancestor) = cursor {
            if ancestor == child || steps > self.nodes.len() {
                return Err(SinewError::CyclicHierarchy { node: child });
            }
            cursor = self.nodes[ancestor].parent;
            steps += 1;
        }

        self.detach(child)?;
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Turns `child` into a root node.
    pub fn detach(&mut self, child: NodeIndex) -> Result<()> {
        let node = self
            .nodes
            .get_mut(child)
            .ok_or_else(|| SinewError::missing_node("detached node", child))?;

        if let Some(parent) = node.parent.take() {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|c| *c != child);
            }
        }
        Ok(())
    }

    pub fn set_name(&mut self, index: NodeIndex, name: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .get_mut(index)
            .ok_or_else(|| SinewError::missing_node("renamed node", index))?;
        let name = name.into();
        let old_name = std::mem::replace(&mut node.name, name.clone());

        // The lowest index still carrying the old name takes over its entry
        if self.names.get(&old_name) == Some(&index) {
            match self.nodes.iter().position(|n| n.name == old_name) {
                Some(next) => {
                    self.names.insert(old_name, next);
                }
                None => {
                    self.names.remove(&old_name);
                }
            }
        }

        let entry = self.names.entry(name).or_insert(index);
        *entry = (*entry).min(index);
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, index: NodeIndex) -> bool {
        index < self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Indices of all parentless nodes, in arena order.
    pub fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_root())
            .map(|(index, _)| index)
    }

    /// First node registered under `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    /// Copies every local transform from `template`.
    ///
    /// Both graphs must share the same layout (e.g. one is a clone of the
    /// other); nodes beyond the shorter arena are left untouched.
    pub fn reset_transforms_from(&mut self, template: &SceneGraph) {
        debug_assert_eq!(self.nodes.len(), template.nodes.len());
        for (node, source) in self.nodes.iter_mut().zip(&template.nodes) {
            node.transform = source.transform;
        }
    }
}
