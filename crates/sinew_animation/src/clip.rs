use glam::{Quat, Vec3};
use log::warn;
use rustc_hash::FxHashSet;
use sinew_core::{NodeIndex, Result};

use crate::binding::TargetPath;
use crate::tracks::KeyframeTrack;

/// Keyframe data of a channel, tagged by the property it drives.
///
/// The tag fixes the value type, so a rotation channel can only ever carry
/// quaternions and translation/scale channels only vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelData {
    Translation(KeyframeTrack<Vec3>),
    Rotation(KeyframeTrack<Quat>),
    Scale(KeyframeTrack<Vec3>),
}

impl ChannelData {
    #[must_use]
    pub fn target_path(&self) -> TargetPath {
        match self {
            ChannelData::Translation(_) => TargetPath::Translation,
            ChannelData::Rotation(_) => TargetPath::Rotation,
            ChannelData::Scale(_) => TargetPath::Scale,
        }
    }

    #[must_use]
    pub fn times(&self) -> &[f32] {
        match self {
            ChannelData::Translation(track) | ChannelData::Scale(track) => track.times(),
            ChannelData::Rotation(track) => track.times(),
        }
    }

    /// Time of the last keyframe.
    #[must_use]
    pub fn duration(&self) -> f32 {
        match self {
            ChannelData::Translation(track) | ChannelData::Scale(track) => track.duration(),
            ChannelData::Rotation(track) => track.duration(),
        }
    }
}

/// One track driving one property of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationChannel {
    pub target_node: NodeIndex,
    pub data: ChannelData,
}

impl AnimationChannel {
    #[must_use]
    pub fn translation(target_node: NodeIndex, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            target_node,
            data: ChannelData::Translation(track),
        }
    }

    #[must_use]
    pub fn rotation(target_node: NodeIndex, track: KeyframeTrack<Quat>) -> Self {
        Self {
            target_node,
            data: ChannelData::Rotation(track),
        }
    }

    #[must_use]
    pub fn scale(target_node: NodeIndex, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            target_node,
            data: ChannelData::Scale(track),
        }
    }

    #[inline]
    #[must_use]
    pub fn target_path(&self) -> TargetPath {
        self.data.target_path()
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.data.duration()
    }
}

/// A named, unordered collection of channels.
///
/// Channels on distinct `(node, path)` pairs commute. When several channels
/// share a pair, the one declared last wins; such clips are accepted but
/// reported, and callers should not rely on the ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    duration: f32,
    channels: Vec<AnimationChannel>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, channels: Vec<AnimationChannel>) -> Self {
        let name = name.into();
        let duration = channels
            .iter()
            .map(AnimationChannel::duration)
            .fold(0.0_f32, f32::max);

        let mut seen = FxHashSet::default();
        for channel in &channels {
            if !seen.insert((channel.target_node, channel.target_path())) {
                warn!(
                    "Clip '{name}': several channels drive {} of node {}; the last one wins",
                    channel.target_path(),
                    channel.target_node
                );
            }
        }

        Self {
            name,
            duration,
            channels,
        }
    }

    /// Builds a clip from fallible channel constructions, skipping (and
    /// reporting) every channel that failed to load, e.g. with
    /// [`SinewError::InsufficientKeyframes`](sinew_core::SinewError::InsufficientKeyframes).
    pub fn from_channel_results<I>(name: impl Into<String>, channels: I) -> Self
    where
        I: IntoIterator<Item = Result<AnimationChannel>>,
    {
        let name = name.into();
        let channels = channels
            .into_iter()
            .enumerate()
            .filter_map(|(index, channel)| match channel {
                Ok(channel) => Some(channel),
                Err(err) => {
                    warn!("Clip '{name}': channel {index} skipped: {err}");
                    None
                }
            })
            .collect();
        Self::new(name, channels)
    }

    /// Largest channel end time.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[AnimationChannel] {
        &self.channels
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
