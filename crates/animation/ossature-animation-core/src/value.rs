#![allow(dead_code)]
//! Channel value abstraction.
//!
//! Timelines are generic over any fixed-arity float tuple. Interpolation is
//! written once per axis and lifted through [`Animatable::from_axes`].

use glam::Vec3;

/// A value a timeline channel can carry.
pub trait Animatable: Copy + core::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Number of float components.
    const AXES: usize;

    fn axis(&self, index: usize) -> f32;

    /// Build a value from a per-axis generator.
    fn from_axes(f: impl FnMut(usize) -> f32) -> Self;

    #[inline]
    fn splat(v: f32) -> Self {
        Self::from_axes(|_| v)
    }

    /// Combine two values axis by axis.
    #[inline]
    fn zip_with(self, other: Self, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Self::from_axes(|i| f(self.axis(i), other.axis(i)))
    }
}

impl Animatable for f32 {
    const AXES: usize = 1;

    #[inline]
    fn axis(&self, _index: usize) -> f32 {
        *self
    }

    #[inline]
    fn from_axes(mut f: impl FnMut(usize) -> f32) -> Self {
        f(0)
    }
}

impl Animatable for Vec3 {
    const AXES: usize = 3;

    #[inline]
    fn axis(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn from_axes(mut f: impl FnMut(usize) -> f32) -> Self {
        let x = f(0);
        let y = f(1);
        let z = f(2);
        Vec3::new(x, y, z)
    }
}
