//! Scene hierarchy module
//!
//! Manages the skeleton hierarchy and everything derived from it:
//! - Node / LocalTransform: arena entries with a matrix or TRS local transform
//! - SceneGraph: the flat node arena
//! - transform_system: local / global matrix resolution by depth-first traversal
//! - skeleton: skin binding and per-frame joint matrix updates

pub mod graph;
pub mod node;
pub mod skeleton;
pub mod transform;
pub mod transform_system;

pub use graph::SceneGraph;
pub use node::Node;
pub use sinew_core::NodeIndex;
pub use skeleton::{Skin, SkinState, bind_skin, update_skin};
pub use transform::LocalTransform;
pub use transform_system::{
    GlobalTransforms, TraversalScratch, compute_global_transforms,
    compute_global_transforms_into, compute_local_transforms, compute_local_transforms_into,
};
