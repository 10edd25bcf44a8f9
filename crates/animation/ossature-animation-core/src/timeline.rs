#![allow(dead_code)]
//! Keyframe timelines for a single animation channel.
//!
//! A [`Timeline`] is immutable once built and cheap to clone; every
//! [`Playhead`] sampling it shares the same keyframe slice.

use std::sync::Arc;

use crate::error::{AnimationError, Result};
use crate::interp::{BezierHandles, Interpolator};
use crate::playhead::Playhead;
use crate::value::Animatable;

/// One keyframe of a channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyFrame<T> {
    pub time: u32,
    pub value: T,
    /// Overrides the timeline default for segments touching this keyframe.
    pub interpolator: Option<Interpolator>,
    pub bezier: Option<BezierHandles<T>>,
}

impl<T> KeyFrame<T> {
    pub fn new(time: u32, value: T) -> Self {
        Self {
            time,
            value,
            interpolator: None,
            bezier: None,
        }
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = Some(interpolator);
        self
    }

    pub fn with_bezier(mut self, handles: BezierHandles<T>) -> Self {
        self.bezier = Some(handles);
        self
    }
}

/// Ordered, time-keyed values for one channel.
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    initial: T,
    default_interpolator: Interpolator,
    keyframes: Arc<[KeyFrame<T>]>,
}

impl<T: Animatable> Timeline<T> {
    /// Build from keyframes in any order. Two keyframes at the same time are
    /// rejected.
    pub fn new(
        initial: T,
        default_interpolator: Interpolator,
        mut keyframes: Vec<KeyFrame<T>>,
    ) -> Result<Self> {
        keyframes.sort_by_key(|k| k.time);
        if let Some(pair) = keyframes.windows(2).find(|w| w[0].time == w[1].time) {
            return Err(AnimationError::DuplicateKeyFrame { time: pair[0].time });
        }
        Ok(Self {
            initial,
            default_interpolator,
            keyframes: keyframes.into(),
        })
    }

    /// Timeline with no keyframes; always yields `initial`.
    pub fn constant(initial: T) -> Self {
        Self {
            initial,
            default_interpolator: Interpolator::default(),
            keyframes: Arc::from(Vec::new()),
        }
    }

    pub fn builder(initial: T) -> TimelineBuilder<T> {
        TimelineBuilder {
            initial,
            default_interpolator: Interpolator::default(),
            keyframes: Vec::new(),
        }
    }

    pub fn initial(&self) -> T {
        self.initial
    }

    pub fn default_interpolator(&self) -> Interpolator {
        self.default_interpolator
    }

    /// Keyframes sorted by ascending time.
    pub fn keyframes(&self) -> &[KeyFrame<T>] {
        &self.keyframes
    }

    pub(crate) fn shared_keyframes(&self) -> Arc<[KeyFrame<T>]> {
        Arc::clone(&self.keyframes)
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time of the last keyframe, if any.
    pub fn end_time(&self) -> Option<u32> {
        self.keyframes.last().map(|k| k.time)
    }

    /// Value a fresh playhead yields at tick 0: the first keyframe's value
    /// (held before it), or `initial` without keyframes.
    pub fn first_value(&self) -> T {
        self.keyframes
            .first()
            .map(|k| k.value)
            .unwrap_or(self.initial)
    }

    /// New forward-only cursor starting at tick 0.
    pub fn playhead(&self) -> Playhead<T> {
        Playhead::new(self)
    }
}

/// Insert-or-replace builder; a built timeline never holds two keyframes at
/// one time.
#[derive(Debug)]
pub struct TimelineBuilder<T> {
    initial: T,
    default_interpolator: Interpolator,
    keyframes: Vec<KeyFrame<T>>,
}

impl<T: Animatable> TimelineBuilder<T> {
    pub fn default_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.default_interpolator = interpolator;
        self
    }

    pub fn keyframe(mut self, time: u32, value: T) -> Self {
        self.insert(KeyFrame::new(time, value));
        self
    }

    pub fn keyframe_with(mut self, keyframe: KeyFrame<T>) -> Self {
        self.insert(keyframe);
        self
    }

    /// Insert keeping time order; an existing keyframe at the same time is
    /// replaced and returned.
    pub fn insert(&mut self, keyframe: KeyFrame<T>) -> Option<KeyFrame<T>> {
        match self.keyframes.binary_search_by_key(&keyframe.time, |k| k.time) {
            Ok(idx) => {
                log::debug!("replacing keyframe at tick {}", keyframe.time);
                Some(std::mem::replace(&mut self.keyframes[idx], keyframe))
            }
            Err(idx) => {
                self.keyframes.insert(idx, keyframe);
                None
            }
        }
    }

    pub fn build(self) -> Timeline<T> {
        Timeline {
            initial: self.initial,
            default_interpolator: self.default_interpolator,
            keyframes: self.keyframes.into(),
        }
    }
}
