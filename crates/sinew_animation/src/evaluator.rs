//! Animation Evaluator
//!
//! Applies a clip at an explicit time to the working transforms of a scene
//! graph. For every channel:
//!
//! 1. wrap the time into the channel's own range: `time mod input[last]`
//! 2. find the keyframe interval with the sampler
//! 3. take `output[index]` verbatim (step sampling, no interpolation)
//! 4. write it into the target node's translation, rotation or scale
//!
//! Translation, rotation and scale are kept as separate components of the
//! node transform and recomposed as `T * R * S` by the resolver, so channels
//! on different paths give the same result in any order.

use log::debug;
use sinew_scene::SceneGraph;

use crate::clip::{AnimationChannel, AnimationClip, ChannelData};
use crate::tracks::{KeyframeCursor, KeyframeTrack};
use crate::values::KeyframeValue;

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Channels written to their target node
    pub applied: usize,
    /// Channels skipped because their target node does not exist
    pub skipped: usize,
}

/// Wraps `time` into `[0, duration)`.
///
/// Negative times wrap from the end. A zero-length (or non-finite) range maps
/// every time to `0`.
#[must_use]
pub fn wrap_time(time: f32, duration: f32) -> f32 {
    if duration > 0.0 && duration.is_finite() && time.is_finite() {
        time.rem_euclid(duration)
    } else {
        0.0
    }
}

/// Applies every channel of `clip` at `time`.
pub fn apply_animation(graph: &mut SceneGraph, clip: &AnimationClip, time: f32) -> EvaluationReport {
    evaluate(graph, clip, time, None)
}

/// Same as [`apply_animation`], resolving keyframes through one cursor per
/// channel (`cursors[i]` belongs to `clip.channels()[i]`).
pub fn apply_animation_with_cursors(
    graph: &mut SceneGraph,
    clip: &AnimationClip,
    time: f32,
    cursors: &mut [KeyframeCursor],
) -> EvaluationReport {
    evaluate(graph, clip, time, Some(cursors))
}

fn evaluate(
    graph: &mut SceneGraph,
    clip: &AnimationClip,
    time: f32,
    mut cursors: Option<&mut [KeyframeCursor]>,
) -> EvaluationReport {
    let mut report = EvaluationReport::default();

    for (index, channel) in clip.channels().iter().enumerate() {
        let cursor = cursors.as_deref_mut().and_then(|c| c.get_mut(index));
        if apply_channel(graph, channel, time, cursor) {
            report.applied += 1;
        } else {
            debug!(
                "Clip '{}': channel {index} targets missing node {}",
                clip.name, channel.target_node
            );
            report.skipped += 1;
        }
    }

    report
}

fn apply_channel(
    graph: &mut SceneGraph,
    channel: &AnimationChannel,
    time: f32,
    cursor: Option<&mut KeyframeCursor>,
) -> bool {
    let Some(node) = graph.get_mut(channel.target_node) else {
        return false;
    };
    let time = wrap_time(time, channel.duration());

    match &channel.data {
        ChannelData::Translation(track) => {
            node.transform.set_translation(sample(track, time, cursor));
        }
        ChannelData::Rotation(track) => {
            node.transform.set_rotation(sample(track, time, cursor));
        }
        ChannelData::Scale(track) => {
            node.transform.set_scale(sample(track, time, cursor));
        }
    }
    true
}

#[inline]
fn sample<T: KeyframeValue>(
    track: &KeyframeTrack<T>,
    time: f32,
    cursor: Option<&mut KeyframeCursor>,
) -> T {
    match cursor {
        Some(cursor) => track.sample_with_cursor(time, cursor),
        None => track.sample(time),
    }
}
