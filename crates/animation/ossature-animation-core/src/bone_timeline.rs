#![allow(dead_code)]
//! Per-bone channel bundles (position, rotation, scale).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::playhead::Playhead;
use crate::timeline::Timeline;

/// One sampled local frame of a bone. Rotation is Euler degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneFrame {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl BoneFrame {
    /// Rest frame: no displacement, no rotation, unit scale.
    pub const INITIAL: BoneFrame = BoneFrame {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }
}

impl Default for BoneFrame {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// The three channel timelines of one animated bone.
#[derive(Clone, Debug)]
pub struct BoneTimeline {
    positions: Timeline<Vec3>,
    rotations: Timeline<Vec3>,
    scales: Timeline<Vec3>,
}

impl BoneTimeline {
    pub fn new(positions: Timeline<Vec3>, rotations: Timeline<Vec3>, scales: Timeline<Vec3>) -> Self {
        Self {
            positions,
            rotations,
            scales,
        }
    }

    /// Channels without keyframes yielding [`BoneFrame::INITIAL`].
    pub fn empty() -> Self {
        Self::new(
            Timeline::constant(Vec3::ZERO),
            Timeline::constant(Vec3::ZERO),
            Timeline::constant(Vec3::ONE),
        )
    }

    pub fn positions(&self) -> &Timeline<Vec3> {
        &self.positions
    }

    pub fn rotations(&self) -> &Timeline<Vec3> {
        &self.rotations
    }

    pub fn scales(&self) -> &Timeline<Vec3> {
        &self.scales
    }

    /// Frame a fresh playhead yields at tick 0.
    pub fn first_frame(&self) -> BoneFrame {
        BoneFrame::new(
            self.positions.first_value(),
            self.rotations.first_value(),
            self.scales.first_value(),
        )
    }

    /// Last keyframe time across all channels.
    pub fn end_time(&self) -> Option<u32> {
        [
            self.positions.end_time(),
            self.rotations.end_time(),
            self.scales.end_time(),
        ]
        .into_iter()
        .flatten()
        .max()
    }

    pub fn create_playhead(&self) -> BonePlayhead {
        BonePlayhead {
            position: self.positions.playhead(),
            rotation: self.rotations.playhead(),
            scale: self.scales.playhead(),
        }
    }
}

/// Three independent channel playheads driven by the same tick.
#[derive(Clone, Debug)]
pub struct BonePlayhead {
    pub position: Playhead<Vec3>,
    pub rotation: Playhead<Vec3>,
    pub scale: Playhead<Vec3>,
}

impl BonePlayhead {
    /// Sample all channels for the current tick and advance each.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> BoneFrame {
        BoneFrame::new(self.position.next(), self.rotation.next(), self.scale.next())
    }
}
