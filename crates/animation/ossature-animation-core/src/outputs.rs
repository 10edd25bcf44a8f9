#![allow(dead_code)]
//! Output contracts of the controller.
//!
//! Every tick the controller pushes one world-space [`BonePose`] per bone into
//! a [`BoneSink`]. Adapters implement the sink to drive their scene objects.
//! Queue state changes are reported separately as [`ControllerEvent`]s.

use glam::{EulerRot, Quat, Vec3};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::effects::SoundEffect;

/// World-space transform of one bone for the current tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonePose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl BonePose {
    /// Rotation as Euler degrees in the channel convention (X, Y, Z).
    pub fn euler_degrees(&self) -> Vec3 {
        let (z, y, x) = self.rotation.to_euler(EulerRot::ZYX);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }
}

/// Receives bone poses, parents before children.
pub trait BoneSink {
    fn update_bone(&mut self, bone: &str, pose: &BonePose);

    /// Item/texture identifier of a bone that declares one, pushed right before
    /// its pose every tick.
    fn update_model_data(&mut self, _bone: &str, _model_data: u32) {}

    /// A sound keyed on the tick just played, after every bone was updated.
    fn emit_sound(&mut self, _sound: &SoundEffect) {}
}

impl<F> BoneSink for F
where
    F: FnMut(&str, &BonePose),
{
    fn update_bone(&mut self, bone: &str, pose: &BonePose) {
        self(bone, pose)
    }
}

/// Sink keeping the latest pose per bone.
#[derive(Clone, Debug, Default)]
pub struct PoseBuffer {
    poses: HashMap<String, BonePose>,
    model_data: HashMap<String, u32>,
    sounds: Vec<SoundEffect>,
    updates: usize,
}

impl PoseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bone: &str) -> Option<&BonePose> {
        self.poses.get(bone)
    }

    pub fn poses(&self) -> &HashMap<String, BonePose> {
        &self.poses
    }

    pub fn model_data(&self, bone: &str) -> Option<u32> {
        self.model_data.get(bone).copied()
    }

    /// Sounds emitted since the last [`take_sounds`](Self::take_sounds), in order.
    pub fn sounds(&self) -> &[SoundEffect] {
        &self.sounds
    }

    pub fn take_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    /// Total `update_bone` calls received.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn clear(&mut self) {
        self.poses.clear();
        self.model_data.clear();
        self.sounds.clear();
        self.updates = 0;
    }
}

impl BoneSink for PoseBuffer {
    fn update_bone(&mut self, bone: &str, pose: &BonePose) {
        self.updates += 1;
        match self.poses.get_mut(bone) {
            Some(slot) => *slot = *pose,
            None => {
                self.poses.insert(bone.to_string(), *pose);
            }
        }
    }

    fn update_model_data(&mut self, bone: &str, model_data: u32) {
        if self.model_data.get(bone) != Some(&model_data) {
            self.model_data.insert(bone.to_string(), model_data);
        }
    }

    fn emit_sound(&mut self, sound: &SoundEffect) {
        self.sounds.push(sound.clone());
    }
}

/// Discrete queue state changes, drained with
/// [`AnimationController::drain_events`](crate::AnimationController::drain_events).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ControllerEvent {
    Queued {
        animation: String,
        priority: i32,
        transition_ticks: u32,
    },
    /// A queued entry with the same name was replaced.
    Replaced { animation: String },
    Removed { animation: String },
    TransitionFinished { animation: String },
    Looped { animation: String },
    /// A ONCE or HOLD animation played to its end and left the queue.
    Finished { animation: String },
    Cleared { removed: usize },
}
