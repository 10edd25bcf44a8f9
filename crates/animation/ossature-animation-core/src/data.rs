#![allow(dead_code)]
//! Animation data model: a named, immutable bundle of bone timelines.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::bone_timeline::BoneTimeline;
use crate::effects::{EffectsTimeline, SoundEffect};

/// What happens when an animation reaches its length.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Play once, then stop controlling bones.
    #[default]
    Once,
    /// Restart from the beginning.
    Loop,
    /// Play once; the final pose stays as the bones' remembered frame.
    Hold,
}

/// Loaded once, shared read-only by every queued instance.
#[derive(Clone, Debug)]
pub struct Animation {
    name: String,
    loop_mode: LoopMode,
    length_ticks: u32,
    tracks: HashMap<String, BoneTimeline>,
    effects: EffectsTimeline,
}

impl Animation {
    pub fn new(
        name: impl Into<String>,
        loop_mode: LoopMode,
        length_ticks: u32,
        tracks: HashMap<String, BoneTimeline>,
    ) -> Self {
        let name = name.into();
        if length_ticks == 0 {
            log::warn!("animation '{name}' has zero length");
        }
        Self {
            name,
            loop_mode,
            length_ticks,
            tracks,
            effects: EffectsTimeline::empty(),
        }
    }

    pub fn with_effects(mut self, effects: EffectsTimeline) -> Self {
        self.effects = effects;
        self
    }

    pub fn builder(name: impl Into<String>) -> AnimationBuilder {
        AnimationBuilder {
            name: name.into(),
            loop_mode: LoopMode::default(),
            length_ticks: 0,
            tracks: HashMap::new(),
            effects: EffectsTimeline::empty(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn length_ticks(&self) -> u32 {
        self.length_ticks
    }

    pub fn tracks(&self) -> &HashMap<String, BoneTimeline> {
        &self.tracks
    }

    pub fn track(&self, bone: &str) -> Option<&BoneTimeline> {
        self.tracks.get(bone)
    }

    pub fn animates(&self, bone: &str) -> bool {
        self.tracks.contains_key(bone)
    }

    pub fn effects(&self) -> &EffectsTimeline {
        &self.effects
    }
}

#[derive(Debug)]
pub struct AnimationBuilder {
    name: String,
    loop_mode: LoopMode,
    length_ticks: u32,
    tracks: HashMap<String, BoneTimeline>,
    effects: EffectsTimeline,
}

impl AnimationBuilder {
    pub fn loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    pub fn length(mut self, length_ticks: u32) -> Self {
        self.length_ticks = length_ticks;
        self
    }

    pub fn track(mut self, bone: impl Into<String>, timeline: BoneTimeline) -> Self {
        self.tracks.insert(bone.into(), timeline);
        self
    }

    pub fn effects(mut self, effects: EffectsTimeline) -> Self {
        self.effects = effects;
        self
    }

    pub fn sound(mut self, time: u32, sound: SoundEffect) -> Self {
        self.effects = self.effects.with_sound(time, sound);
        self
    }

    pub fn build(self) -> Animation {
        Animation::new(self.name, self.loop_mode, self.length_ticks, self.tracks).with_effects(self.effects)
    }
}
