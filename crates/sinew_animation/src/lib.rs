//! Skeletal animation module
//!
//! - tracks: keyframe search (binary search / cursor) and step sampling
//! - clip: channels and clips
//! - evaluator: applies a clip at an explicit time to a scene graph
//! - action: playback driver (time accumulation)
//! - binder: channel validation and retargeting by node name
//! - system: per-entity frame pipeline ([`SkinnedInstance`])

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod evaluator;
pub mod settings;
pub mod system;
pub mod tracks;
pub mod values;

pub use action::AnimationAction;
pub use binder::Binder;
pub use binding::TargetPath;
pub use clip::{AnimationChannel, AnimationClip, ChannelData};
pub use evaluator::{EvaluationReport, apply_animation, apply_animation_with_cursors, wrap_time};
pub use settings::AnimationSettings;
pub use system::SkinnedInstance;
pub use tracks::{KeyframeCursor, KeyframeTrack, find_keyframe_index, find_keyframe_index_with_cursor};
pub use values::KeyframeValue;
