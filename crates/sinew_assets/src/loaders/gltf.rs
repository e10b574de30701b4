//! glTF 2.0 loader.
//!
//! Reads the node hierarchy, skins and animations of a glTF document. Node
//! indices are kept as-is, so channel targets and skin joints refer to the
//! same arena slots as in the file.
//!
//! Only what the skinning core consumes is imported: meshes, materials and
//! morph target weights are ignored. Every sampler is played back with step
//! sampling; cubic-spline outputs keep their keyframe values and drop the
//! tangents.

use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use gltf::animation::Interpolation;
use gltf::animation::util::ReadOutputs;
use log::{debug, info, warn};
use sinew_animation::{AnimationChannel, AnimationClip, KeyframeTrack};
use sinew_core::Result as CoreResult;
use sinew_scene::{LocalTransform, Node, SceneGraph, Skin};

use crate::SkinnedAsset;
use crate::errors::Result;

pub struct GltfLoader;

impl GltfLoader {
    /// Imports a `.gltf` or `.glb` file, including external buffers.
    pub fn load(path: impl AsRef<Path>) -> Result<SkinnedAsset> {
        let path = path.as_ref();
        let (document, buffers, _images) = gltf::import(path)?;
        let asset = Self::build(&document, &buffers)?;

        info!(
            "Loaded '{}': {} nodes, {} skins, {} animations",
            path.display(),
            asset.graph.len(),
            asset.skins.len(),
            asset.animations.len()
        );
        Ok(asset)
    }

    /// Imports a self-contained document (GLB or glTF with embedded buffers).
    pub fn from_slice(bytes: &[u8]) -> Result<SkinnedAsset> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        Self::build(&document, &buffers)
    }

    fn build(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<SkinnedAsset> {
        let graph = Self::load_nodes(document)?;
        let skins = Self::load_skins(document, buffers)?;
        let animations = Self::load_animations(document, buffers);

        Ok(SkinnedAsset {
            graph: Arc::new(graph),
            skins,
            animations,
        })
    }

    fn load_nodes(document: &gltf::Document) -> Result<SceneGraph> {
        let nodes = document
            .nodes()
            .map(|node| {
                let name = node
                    .name()
                    .map_or_else(|| format!("Node_{}", node.index()), str::to_owned);

                let transform = match node.transform() {
                    gltf::scene::Transform::Matrix { matrix } => {
                        LocalTransform::from_matrix(Mat4::from_cols_array_2d(&matrix))
                    }
                    gltf::scene::Transform::Decomposed {
                        translation,
                        rotation,
                        scale,
                    } => LocalTransform::from_trs(
                        Vec3::from_array(translation),
                        Quat::from_array(rotation),
                        Vec3::from_array(scale),
                    ),
                };

                Node::new(name)
                    .with_transform(transform)
                    .with_children(node.children().map(|child| child.index()))
            })
            .collect();

        Ok(SceneGraph::from_nodes(nodes)?)
    }

    fn load_skins(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<Vec<Skin>> {
        let mut skins = Vec::new();

        for skin in document.skins() {
            let name = skin
                .name()
                .map_or_else(|| format!("Skin_{}", skin.index()), str::to_owned);
            let joints: Vec<_> = skin.joints().map(|joint| joint.index()).collect();

            if let (Some(skeleton), Some(&first)) = (skin.skeleton(), joints.first())
                && skeleton.index() != first
            {
                warn!(
                    "Skin '{name}': skeleton root is node {} but the first joint is node {first}; traversing from the first joint",
                    skeleton.index()
                );
            }

            // Missing inverse bind matrices default to identity
            let reader = skin.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
            let skin = match reader.read_inverse_bind_matrices() {
                Some(iter) => {
                    let matrices = iter.map(|m| Mat4::from_cols_array_2d(&m)).collect();
                    Skin::new(name, joints, matrices)?
                }
                None => Skin::with_identity_inverse_binds(name, joints)?,
            };
            skins.push(skin);
        }

        Ok(skins)
    }

    fn load_animations(
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
    ) -> Vec<AnimationClip> {
        document
            .animations()
            .map(|animation| {
                let name = animation
                    .name()
                    .map_or_else(|| format!("Animation_{}", animation.index()), str::to_owned);

                let channels: Vec<_> = animation
                    .channels()
                    .filter_map(|channel| Self::read_channel(&name, &channel, buffers))
                    .collect();

                AnimationClip::from_channel_results(name, channels)
            })
            .collect()
    }

    /// `None` for channels the core does not animate or whose data is absent.
    fn read_channel(
        clip: &str,
        channel: &gltf::animation::Channel<'_>,
        buffers: &[gltf::buffer::Data],
    ) -> Option<CoreResult<AnimationChannel>> {
        let reader =
            channel.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let node = channel.target().node().index();
        let interpolation = channel.sampler().interpolation();

        if matches!(interpolation, Interpolation::Linear) {
            debug!("Clip '{clip}': linear channel on node {node} is step-sampled");
        }

        let (Some(inputs), Some(outputs)) = (reader.read_inputs(), reader.read_outputs()) else {
            warn!("Clip '{clip}': channel on node {node} has no readable data; skipped");
            return None;
        };
        let times: Vec<f32> = inputs.collect();
        let cubic = matches!(interpolation, Interpolation::CubicSpline);

        let channel = match outputs {
            ReadOutputs::Translations(iter) => {
                let values = keyframe_values(iter.map(Vec3::from_array), cubic);
                KeyframeTrack::new(times, values).map(|track| AnimationChannel::translation(node, track))
            }
            ReadOutputs::Rotations(iter) => {
                let values = keyframe_values(iter.into_f32().map(Quat::from_array), cubic);
                KeyframeTrack::new(times, values).map(|track| AnimationChannel::rotation(node, track))
            }
            ReadOutputs::Scales(iter) => {
                let values = keyframe_values(iter.map(Vec3::from_array), cubic);
                KeyframeTrack::new(times, values).map(|track| AnimationChannel::scale(node, track))
            }
            ReadOutputs::MorphTargetWeights(_) => {
                debug!("Clip '{clip}': morph target weights on node {node} ignored");
                return None;
            }
        };
        Some(channel)
    }
}

/// Cubic-spline outputs are stored as `(in_tangent, value, out_tangent)`
/// triples; only the value is kept.
fn keyframe_values<T>(iter: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        iter.skip(1).step_by(3).collect()
    } else {
        iter.collect()
    }
}
