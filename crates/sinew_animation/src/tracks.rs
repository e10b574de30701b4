//! Animation Sampler
//!
//! Keyframe search over time-sampled tracks and step (nearest-left) value
//! extraction. Values are never interpolated between keyframes.
//!
//! # Boundary policy
//!
//! [`find_keyframe_index`] returns the interval `i` with
//! `times[i] <= t < times[i + 1]`, clamped to `0..=len - 2`:
//! - `t` before the first sample (or NaN) selects interval `0`
//! - `t` at or after the last sample selects interval `len - 2`
//!
//! The sampler performs no wrapping; looping is the evaluator's job.

use sinew_core::{Result, SinewError};

use crate::values::KeyframeValue;

const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last interval found for a track so that monotonic playback
/// resolves keyframes with a short linear scan instead of a full search.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Finds the keyframe interval containing `time`.
///
/// Fails with [`SinewError::InsufficientKeyframes`] when `times` holds fewer
/// than two samples. `times` must be non-decreasing.
pub fn find_keyframe_index(times: &[f32], time: f32) -> Result<usize> {
    check_len(times)?;
    Ok(search_interval(times, time))
}

/// Cursor-accelerated [`find_keyframe_index`]; always returns the same index.
pub fn find_keyframe_index_with_cursor(
    times: &[f32],
    time: f32,
    cursor: &mut KeyframeCursor,
) -> Result<usize> {
    check_len(times)?;
    Ok(scan_interval(times, time, cursor))
}

fn check_len(times: &[f32]) -> Result<()> {
    if times.len() < 2 {
        return Err(SinewError::InsufficientKeyframes { count: times.len() });
    }
    Ok(())
}

/// Binary search; `times.len() >= 2`.
fn search_interval(times: &[f32], time: f32) -> usize {
    // First index whose time is > `time`
    let next_index = times.partition_point(|&t| t <= time);
    next_index.saturating_sub(1).min(times.len() - 2)
}

/// Whether interval `i` is the one [`search_interval`] would return.
fn interval_contains(times: &[f32], i: usize, time: f32) -> bool {
    let last = times.len() - 2;
    (i == 0 || times[i] <= time) && (i == last || time < times[i + 1])
}

fn scan_interval(times: &[f32], time: f32, cursor: &mut KeyframeCursor) -> usize {
    let last = times.len() - 2;
    let start = cursor.last_index.min(last);

    // Forward first (normal playback), then backward (reverse / small rewind)
    let local = (0..=MAX_SCAN_OFFSET)
        .map(|offset| start + offset)
        .take_while(|&i| i <= last)
        .find(|&i| interval_contains(times, i, time))
        .or_else(|| {
            (1..=MAX_SCAN_OFFSET)
                .map_while(|offset| start.checked_sub(offset))
                .find(|&i| interval_contains(times, i, time))
        });

    // Large jump (scrubbing / loop reset): fall back to the binary search
    let index = local.unwrap_or_else(|| search_interval(times, time));
    cursor.last_index = index;
    index
}

/// A validated keyframe track: non-decreasing times and one value per time.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: KeyframeValue> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: KeyframeValue> KeyframeTrack<T> {
    /// Validates the track invariants.
    ///
    /// - fewer than two samples: [`SinewError::InsufficientKeyframes`]
    /// - `times.len() != values.len()`: [`SinewError::TrackLengthMismatch`]
    /// - non-finite or decreasing times: [`SinewError::UnsortedKeyframes`]
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Result<Self> {
        check_len(&times)?;
        if times.len() != values.len() {
            return Err(SinewError::TrackLengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(SinewError::UnsortedKeyframes { index });
        }
        if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(SinewError::UnsortedKeyframes { index: index + 1 });
        }

        Ok(Self { times, values })
    }

    /// Builds a track from flat output data with [`KeyframeValue::COMPONENTS`]
    /// floats per keyframe.
    pub fn from_flat(times: Vec<f32>, components: &[f32]) -> Result<Self> {
        if components.len() != times.len() * T::COMPONENTS {
            return Err(SinewError::TrackLengthMismatch {
                times: times.len(),
                values: components.len() / T::COMPONENTS,
            });
        }
        let values = components
            .chunks_exact(T::COMPONENTS)
            .map(T::from_components)
            .collect();
        Self::new(times, values)
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`: a valid track holds at least two keyframes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    #[inline]
    #[must_use]
    pub fn keyframe_index(&self, time: f32) -> usize {
        search_interval(&self.times, time)
    }

    #[inline]
    pub fn keyframe_index_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> usize {
        scan_interval(&self.times, time, cursor)
    }

    /// Value of the keyframe interval containing `time` (step sampling).
    #[inline]
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        self.values[self.keyframe_index(time)]
    }

    #[inline]
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        self.values[self.keyframe_index_with_cursor(time, cursor)]
    }
}
