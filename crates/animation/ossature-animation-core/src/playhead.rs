#![allow(dead_code)]
//! Forward-only, tick-driven sampling of a [`Timeline`].
//!
//! Each call to [`Playhead::next`] yields the value for the current tick and
//! then advances by one. The interpolation segment is only rebuilt when a
//! keyframe boundary is crossed.

use std::sync::Arc;

use crate::interp::{Interpolator, Segment, SegmentPoint};
use crate::timeline::{KeyFrame, Timeline};
use crate::value::Animatable;

/// Stateful cursor over one timeline.
#[derive(Clone, Debug)]
pub enum Playhead<T: Animatable> {
    /// Zero or one keyframe: the same value forever.
    Constant(T),
    Running(Cursor<T>),
}

impl<T: Animatable> Playhead<T> {
    pub fn new(timeline: &Timeline<T>) -> Self {
        match timeline.keyframes() {
            [] => Playhead::Constant(timeline.initial()),
            [only] => Playhead::Constant(only.value),
            _ => Playhead::Running(Cursor::new(timeline)),
        }
    }

    /// Value for the current tick; advances the cursor.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> T {
        match self {
            Playhead::Constant(value) => *value,
            Playhead::Running(cursor) => cursor.next(),
        }
    }

    /// Tick the next call to [`Playhead::next`] samples. Constant playheads
    /// report 0.
    pub fn tick(&self) -> u32 {
        match self {
            Playhead::Constant(_) => 0,
            Playhead::Running(cursor) => cursor.tick,
        }
    }
}

/// Cursor state for timelines with at least two keyframes.
#[derive(Clone, Debug)]
pub struct Cursor<T: Animatable> {
    keyframes: Arc<[KeyFrame<T>]>,
    default_interpolator: Interpolator,
    /// Index of the `previous` keyframe; `next` and `after` follow it.
    previous: usize,
    segment: Segment<T>,
    tick: u32,
}

impl<T: Animatable> Cursor<T> {
    fn new(timeline: &Timeline<T>) -> Self {
        let shared = timeline.shared_keyframes();
        let keyframes = match shared.first().copied() {
            Some(first) if first.time > 0 => {
                // Hold the first authored value from tick 0.
                let mut padded = Vec::with_capacity(shared.len() + 1);
                padded.push(KeyFrame::new(0, first.value).with_interpolator(Interpolator::Step));
                padded.extend_from_slice(&shared);
                Arc::from(padded)
            }
            _ => shared,
        };
        let default_interpolator = timeline.default_interpolator();
        let segment = build_segment(&keyframes, 0, default_interpolator);
        Self {
            keyframes,
            default_interpolator,
            previous: 0,
            segment,
            tick: 0,
        }
    }

    fn next(&mut self) -> T {
        let value = self.sample();
        self.tick = self.tick.saturating_add(1);
        value
    }

    fn sample(&mut self) -> T {
        loop {
            let previous = &self.keyframes[self.previous];
            let Some(next) = self.keyframes.get(self.previous + 1) else {
                return previous.value;
            };
            if self.tick == next.time {
                return next.value;
            }
            if self.tick > next.time {
                self.previous += 1;
                self.segment =
                    build_segment(&self.keyframes, self.previous, self.default_interpolator);
                continue;
            }
            let span = next.time.saturating_sub(previous.time);
            if span == 0 {
                return next.value;
            }
            let progress = self.tick.saturating_sub(previous.time) as f32 / span as f32;
            return self.segment.eval(progress);
        }
    }
}

fn build_segment<T: Animatable>(
    keyframes: &[KeyFrame<T>],
    previous: usize,
    default_interpolator: Interpolator,
) -> Segment<T> {
    let from = &keyframes[previous];
    let Some(to) = keyframes.get(previous + 1) else {
        return Segment::Step {
            from: from.value,
            to: from.value,
        };
    };
    let leaving = from.interpolator.unwrap_or(default_interpolator);
    let entering = to.interpolator.unwrap_or(default_interpolator);
    let before = previous
        .checked_sub(1)
        .and_then(|i| keyframes.get(i))
        .map(|k| k.value);
    let after = keyframes.get(previous + 2).map(|k| k.value);
    Segment::new(
        leaving.combine(entering),
        before,
        &point(from),
        &point(to),
        after,
    )
}

fn point<T: Copy>(keyframe: &KeyFrame<T>) -> SegmentPoint<T> {
    SegmentPoint {
        time: keyframe.time,
        value: keyframe.value,
        bezier: keyframe.bezier,
    }
}
