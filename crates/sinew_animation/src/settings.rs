//! Animation playback configuration.
//!
//! ```rust,ignore
//! use sinew::animation::AnimationSettings;
//!
//! let settings = AnimationSettings {
//!     playback_speed: 2.0,
//!     ..Default::default()
//! };
//! let instance = SkinnedInstance::with_settings(template, &skins, settings)?;
//! ```

/// Settings applied to every action created by a skinned instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Multiplier on frame delta time: `time += dt * playback_speed`.
    pub playback_speed: f32,
    /// Whether new actions start enabled.
    pub autoplay: bool,
    /// Resolve keyframes through per-channel cursors instead of a binary
    /// search every frame. Both give identical results.
    pub keyframe_cursors: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            playback_speed: 1.0,
            autoplay: true,
            keyframe_cursors: true,
        }
    }
}
