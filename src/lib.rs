//! # Sinew
//!
//! Skeletal animation and skinning core.
//!
//! Given a node hierarchy, a skin and keyframe animation clips, Sinew
//! computes per-frame joint matrices for GPU skinning:
//!
//! ```text
//! jointMatrix[j] = global(joint[j]) * inverseBindMatrix[j]
//! ```
//!
//! The workspace is split into:
//! - [`core`]: error type and math helpers
//! - [`scene`]: node arena, transform resolver, skin binder and skinning updater
//! - [`animation`]: keyframe sampler, clip evaluator and playback
//! - [`assets`]: glTF import (`gltf` feature)
//!
//! ```rust,ignore
//! use sinew::prelude::*;
//!
//! let asset = GltfLoader::load("models/fox.glb")?;
//! let mut instance = asset.instantiate()?;
//! instance.play(&asset.animations[0]);
//!
//! instance.update(1.0 / 60.0)?;
//! let matrices = instance.joint_matrices(0);
//! ```

pub use sinew_animation as animation;
pub use sinew_assets as assets;
pub use sinew_core as core;
pub use sinew_scene as scene;

pub use sinew_animation::{
    AnimationAction, AnimationClip, AnimationSettings, Binder, SkinnedInstance, apply_animation,
    find_keyframe_index,
};
#[cfg(feature = "gltf")]
pub use sinew_assets::GltfLoader;
pub use sinew_assets::{AssetError, SkinnedAsset};
pub use sinew_core::{NodeIndex, Result, SinewError};
pub use sinew_scene::{
    GlobalTransforms, LocalTransform, Node, SceneGraph, Skin, SkinState, bind_skin,
    compute_global_transforms, compute_local_transforms, update_skin,
};

pub mod prelude {
    //! Common imports.
    pub use crate::animation::{
        AnimationAction, AnimationChannel, AnimationClip, AnimationSettings, KeyframeTrack,
        SkinnedInstance,
    };
    #[cfg(feature = "gltf")]
    pub use crate::assets::GltfLoader;
    pub use crate::assets::SkinnedAsset;
    pub use crate::core::{NodeIndex, SinewError};
    pub use crate::scene::{LocalTransform, Node, SceneGraph, Skin, SkinState};
    pub use glam::{Mat4, Quat, Vec3};
}
