//! Asset import for the skinning core.
//!
//! Loaders translate interchange formats into the parser-agnostic records the
//! core consumes: a template [`SceneGraph`], [`Skin`] descriptors and
//! [`AnimationClip`]s whose channels address nodes by arena index.
//!
//! Enable the `gltf` feature for [`GltfLoader`].

pub mod errors;
pub mod loaders;

use std::sync::Arc;

use sinew_animation::{AnimationClip, SkinnedInstance};
use sinew_scene::{SceneGraph, Skin};

pub use errors::{AssetError, Result};
#[cfg(feature = "gltf")]
pub use loaders::GltfLoader;

/// Everything needed to spawn skinned, animated instances of one model.
#[derive(Debug, Clone)]
pub struct SkinnedAsset {
    /// Read-only bind-pose hierarchy shared by every instance
    pub graph: Arc<SceneGraph>,
    pub skins: Vec<Skin>,
    pub animations: Vec<AnimationClip>,
}

impl SkinnedAsset {
    /// Spawns a new instance with its own working copy of the hierarchy.
    pub fn instantiate(&self) -> Result<SkinnedInstance> {
        Ok(SkinnedInstance::new(Arc::clone(&self.graph), &self.skins)?)
    }

    /// First animation whose name is `name`.
    #[must_use]
    pub fn find_animation(&self, name: &str) -> Option<&AnimationClip> {
        self.animations.iter().find(|clip| clip.name == name)
    }
}
