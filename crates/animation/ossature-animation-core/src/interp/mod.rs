#![allow(dead_code)]
//! Interpolation strategies and per-segment evaluation.
//!
//! Strategies form a closed set selected when a playhead crosses a keyframe
//! boundary. The resulting [`Segment`] is evaluated every tick without any
//! dynamic dispatch.

pub mod functions;

use serde::{Deserialize, Serialize};

use crate::value::Animatable;
use functions::{bezier_axis, catmull_rom_value, lerp_value, step_value, BezierAxis};

/// Interpolation strategy attached to a timeline or a keyframe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolator {
    #[default]
    Linear,
    Step,
    CatmullRom,
    Bezier,
}

impl Interpolator {
    /// Combine the interpolator leaving a keyframe (`self`) with the one
    /// entering the next keyframe (`right`).
    pub fn combine(self, right: Interpolator) -> Interpolator {
        use Interpolator::*;
        match (self, right) {
            (Step, _) => Step,
            (CatmullRom, _) => CatmullRom,
            (Linear, Linear | Step) => Linear,
            (Linear, other) => other,
            (Bezier, CatmullRom) => CatmullRom,
            (Bezier, _) => Bezier,
        }
    }
}

/// Bezier handles of one keyframe. Times are tick offsets relative to the
/// keyframe, values are offsets relative to the keyframe value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierHandles<T> {
    pub left_time: T,
    pub left_value: T,
    pub right_time: T,
    pub right_value: T,
}

impl<T: Animatable> Default for BezierHandles<T> {
    fn default() -> Self {
        Self {
            left_time: T::splat(-0.1),
            left_value: T::splat(0.0),
            right_time: T::splat(0.1),
            right_value: T::splat(0.0),
        }
    }
}

/// Endpoint of a segment as seen by the evaluator.
#[derive(Clone, Copy, Debug)]
pub struct SegmentPoint<T> {
    pub time: u32,
    pub value: T,
    pub bezier: Option<BezierHandles<T>>,
}

/// A ready-to-evaluate interpolation between two keyframes.
#[derive(Clone, Debug)]
pub enum Segment<T: Animatable> {
    Linear { from: T, to: T },
    Step { from: T, to: T },
    CatmullRom {
        before: Option<T>,
        from: T,
        to: T,
        after: Option<T>,
    },
    /// One set of control points per axis.
    Bezier { axes: Vec<BezierAxis> },
}

impl<T: Animatable> Segment<T> {
    pub fn new(
        kind: Interpolator,
        before: Option<T>,
        from: &SegmentPoint<T>,
        to: &SegmentPoint<T>,
        after: Option<T>,
    ) -> Self {
        match kind {
            Interpolator::Linear => Segment::Linear {
                from: from.value,
                to: to.value,
            },
            Interpolator::Step => Segment::Step {
                from: from.value,
                to: to.value,
            },
            Interpolator::CatmullRom => Segment::CatmullRom {
                before,
                from: from.value,
                to: to.value,
                after,
            },
            Interpolator::Bezier => Segment::Bezier {
                axes: bezier_axes(from, to),
            },
        }
    }

    /// Evaluate at `progress` in [0,1].
    pub fn eval(&self, progress: f32) -> T {
        match self {
            Segment::Linear { from, to } => lerp_value(*from, *to, progress),
            Segment::Step { from, to } => step_value(*from, *to, progress),
            Segment::CatmullRom {
                before,
                from,
                to,
                after,
            } => catmull_rom_value(*before, *from, *to, *after, progress),
            Segment::Bezier { axes } => T::from_axes(|i| bezier_axis(&axes[i], progress)),
        }
    }
}

fn bezier_axes<T: Animatable>(from: &SegmentPoint<T>, to: &SegmentPoint<T>) -> Vec<BezierAxis> {
    let leaving = from.bezier.unwrap_or_default();
    let entering = to.bezier.unwrap_or_default();
    let gap = to.time.saturating_sub(from.time).max(1) as f32;

    (0..T::AXES)
        .map(|i| {
            let right = leaving.right_time.axis(i).clamp(0.0, gap);
            let left = entering.left_time.axis(i).clamp(-gap, 0.0);
            let y0 = from.value.axis(i);
            let y3 = to.value.axis(i);
            BezierAxis {
                x1: right / gap,
                x2: (gap + left) / gap,
                y0,
                y1: y0 + leaving.right_value.axis(i),
                y2: y3 + entering.left_value.axis(i),
                y3,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn point(time: u32, value: f32) -> SegmentPoint<f32> {
        SegmentPoint {
            time,
            value,
            bezier: None,
        }
    }

    #[test]
    fn combine_rules() {
        use Interpolator::*;
        assert_eq!(Step.combine(Linear), Step);
        assert_eq!(Step.combine(CatmullRom), Step);
        assert_eq!(CatmullRom.combine(Step), CatmullRom);
        assert_eq!(Linear.combine(Linear), Linear);
        assert_eq!(Linear.combine(Step), Linear);
        assert_eq!(Linear.combine(CatmullRom), CatmullRom);
        assert_eq!(Linear.combine(Bezier), Bezier);
        assert_eq!(Bezier.combine(CatmullRom), CatmullRom);
        assert_eq!(Bezier.combine(Linear), Bezier);
        assert_eq!(Bezier.combine(Step), Bezier);
    }

    #[test]
    fn interpolator_serde_uses_snake_case() {
        let parsed: Interpolator = serde_json::from_str("\"catmull_rom\"").unwrap();
        assert_eq!(parsed, Interpolator::CatmullRom);
        assert_eq!(serde_json::to_string(&Interpolator::Step).unwrap(), "\"step\"");
    }

    #[test]
    fn default_bezier_handles_ease_in_and_out() {
        let seg = Segment::new(
            Interpolator::Bezier,
            None,
            &point(0, 0.0),
            &point(10, 10.0),
            None,
        );
        let quarter = seg.eval(0.25);
        let half = seg.eval(0.5);
        assert!((half - 5.0).abs() < 1e-2, "half={half}");
        // flat handles slow the start relative to linear
        assert!(quarter < 2.5, "quarter={quarter}");
        assert!((seg.eval(1.0) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn bezier_segment_is_per_axis() {
        let from = SegmentPoint {
            time: 0,
            value: Vec3::ZERO,
            bezier: None,
        };
        let to = SegmentPoint {
            time: 4,
            value: Vec3::new(4.0, 8.0, -4.0),
            bezier: None,
        };
        let seg = Segment::new(Interpolator::Bezier, None, &from, &to, None);
        let end = seg.eval(1.0);
        assert!((end - to.value).length() < 1e-3);
    }
}
