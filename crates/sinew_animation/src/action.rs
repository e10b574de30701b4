use std::sync::Arc;

use sinew_scene::SceneGraph;

use crate::clip::AnimationClip;
use crate::evaluator::{EvaluationReport, apply_animation, apply_animation_with_cursors};
use crate::settings::AnimationSettings;
use crate::tracks::KeyframeCursor;

/// Playback state of one clip: the thin driver that turns frame deltas into
/// the explicit time fed to the evaluator.
///
/// Time is accumulated unwrapped; every channel wraps it into its own range
/// during evaluation.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    /// Disabled actions neither advance nor write to the scene, so the last
    /// applied pose is held.
    pub enabled: bool,
    /// Paused actions keep writing the pose at the frozen time.
    pub paused: bool,

    use_cursors: bool,
    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self::with_settings(clip, &AnimationSettings::default())
    }

    #[must_use]
    pub fn with_settings(clip: Arc<AnimationClip>, settings: &AnimationSettings) -> Self {
        let channel_count = clip.len();
        Self {
            clip,
            time: 0.0,
            time_scale: settings.playback_speed,
            enabled: settings.autoplay,
            paused: false,
            use_cursors: settings.keyframe_cursors,
            track_cursors: vec![KeyframeCursor::default(); channel_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.enabled && !self.paused
    }

    /// Advances time: `time += dt * time_scale`.
    pub fn update(&mut self, dt: f32) {
        if self.is_playing() {
            self.time += dt * self.time_scale;
        }
    }

    /// Jumps to `time`. Cursors recover on their own at the next lookup.
    pub fn seek(&mut self, time: f32) {
        self.time = time;
    }

    /// Rewinds to the start and forgets cached keyframe positions.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.track_cursors.fill(KeyframeCursor::default());
    }

    /// Writes the pose at the current time into `graph`.
    pub fn apply(&mut self, graph: &mut SceneGraph) -> EvaluationReport {
        if !self.enabled {
            return EvaluationReport::default();
        }

        if self.use_cursors {
            apply_animation_with_cursors(graph, &self.clip, self.time, &mut self.track_cursors)
        } else {
            apply_animation(graph, &self.clip, self.time)
        }
    }
}
