use log::warn;
use sinew_scene::SceneGraph;

use crate::clip::{AnimationChannel, AnimationClip};

/// Resolves clip channels against a concrete scene graph.
pub struct Binder;

impl Binder {
    /// Retargets `clip`, authored against `source`, onto `target` by matching
    /// node names. Channels whose node has no namesake in `target` are skipped.
    #[must_use]
    pub fn retarget(clip: &AnimationClip, source: &SceneGraph, target: &SceneGraph) -> AnimationClip {
        let channels = clip
            .channels()
            .iter()
            .filter_map(|channel| {
                let Some(source_node) = source.get(channel.target_node) else {
                    warn!(
                        "Clip '{}': source node {} does not exist; channel skipped",
                        clip.name, channel.target_node
                    );
                    return None;
                };
                let name = source_node.name();
                match target.find_by_name(name) {
                    Some(target_node) => Some(AnimationChannel {
                        target_node,
                        data: channel.data.clone(),
                    }),
                    None => {
                        warn!(
                            "Clip '{}': no node named '{name}' to retarget {} onto; channel skipped",
                            clip.name,
                            channel.target_path()
                        );
                        None
                    }
                }
            })
            .collect();

        AnimationClip::new(clip.name.clone(), channels)
    }

    /// Drops the channels of `clip` that target nodes missing from `graph`,
    /// reporting each one. The rest of the clip keeps animating.
    #[must_use]
    pub fn retain_valid(clip: &AnimationClip, graph: &SceneGraph) -> AnimationClip {
        let channels = clip
            .channels()
            .iter()
            .filter(|channel| {
                let valid = graph.contains(channel.target_node);
                if !valid {
                    warn!(
                        "Clip '{}': {} channel targets missing node {}; channel skipped",
                        clip.name,
                        channel.target_path(),
                        channel.target_node
                    );
                }
                valid
            })
            .cloned()
            .collect();

        AnimationClip::new(clip.name.clone(), channels)
    }
}
