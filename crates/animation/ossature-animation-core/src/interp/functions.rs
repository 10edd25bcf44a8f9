#![allow(dead_code)]
//! Interpolation helpers:
//! - lerp / lerp_value (component-wise linear)
//! - step_value (hold until the segment ends)
//! - catmull_rom_value (Catmull-Rom spline through optional neighbours)
//! - bezier_value (per-axis cubic bezier with time inverted by bisection)

use crate::value::Animatable;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_value<T: Animatable>(a: T, b: T, t: f32) -> T {
    a.zip_with(b, |x, y| lerp_f32(x, y, t))
}

/// Step semantics: the start value for every progress below 1.
#[inline]
pub fn step_value<T: Animatable>(a: T, b: T, t: f32) -> T {
    if t < 1.0 {
        a
    } else {
        b
    }
}

#[inline]
fn catmull_rom_f32(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let a = 2.0 * p1 - 2.0 * p2 + v0 + v1;
    let b = -3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1;
    let t2 = t * t;
    let t3 = t2 * t;
    a * t3 + b * t2 + v0 * t + p1
}

/// Catmull-Rom between `from` and `to`. Missing neighbours are replaced by
/// the nearest segment endpoint.
#[inline]
pub fn catmull_rom_value<T: Animatable>(
    before: Option<T>,
    from: T,
    to: T,
    after: Option<T>,
    t: f32,
) -> T {
    let p0 = before.unwrap_or(from);
    let p3 = after.unwrap_or(to);
    T::from_axes(|i| catmull_rom_f32(p0.axis(i), from.axis(i), to.axis(i), p3.axis(i), t))
}

#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Control points of one axis of a bezier segment, with the time axis
/// normalized to [0,1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierAxis {
    pub x1: f32,
    pub x2: f32,
    pub y0: f32,
    pub y1: f32,
    pub y2: f32,
    pub y3: f32,
}

/// Evaluate the value curve at normalized time `t`, inverting the time curve
/// via binary search.
#[inline]
pub fn bezier_axis(axis: &BezierAxis, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, axis.x1, axis.x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(axis.y0, axis.y1, axis.y2, axis.y3, mid)
}
