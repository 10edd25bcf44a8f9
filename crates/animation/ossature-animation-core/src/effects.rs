//! Tick-keyed effects played alongside bone timelines.
//!
//! Effects are discrete: a sound keyed at time 7 fires on exactly the tick its
//! animation samples time 7, and nothing is interpolated.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A sound cue. `sound` is an adapter-defined identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundEffect {
    pub sound: String,
    #[serde(default = "unit")]
    pub volume: f32,
    #[serde(default = "unit")]
    pub pitch: f32,
}

fn unit() -> f32 {
    1.0
}

impl SoundEffect {
    pub fn new(sound: impl Into<String>) -> Self {
        Self {
            sound: sound.into(),
            volume: 1.0,
            pitch: 1.0,
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }
}

/// Sounds keyed by timeline tick. Shared by every playhead created from it.
#[derive(Clone, Debug, Default)]
pub struct EffectsTimeline {
    sounds: Arc<BTreeMap<u32, Vec<SoundEffect>>>,
}

impl EffectsTimeline {
    pub fn new(sounds: BTreeMap<u32, Vec<SoundEffect>>) -> Self {
        Self {
            sounds: Arc::new(sounds),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Add `sound` at `time`, after any sound already keyed there.
    pub fn with_sound(self, time: u32, sound: SoundEffect) -> Self {
        let mut sounds = Arc::unwrap_or_clone(self.sounds);
        sounds.entry(time).or_default().push(sound);
        Self::new(sounds)
    }

    pub fn sounds_at(&self, time: u32) -> &[SoundEffect] {
        self.sounds.get(&time).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ticks carrying at least one sound, ascending.
    pub fn times(&self) -> impl Iterator<Item = u32> + '_ {
        self.sounds.keys().copied()
    }

    pub fn end_time(&self) -> Option<u32> {
        self.sounds.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.values().all(Vec::is_empty)
    }

    pub fn playhead(&self) -> EffectsPlayhead {
        EffectsPlayhead {
            sounds: Arc::clone(&self.sounds),
            tick: 0,
        }
    }
}

/// Forward-only cursor over an [`EffectsTimeline`].
#[derive(Clone, Debug)]
pub struct EffectsPlayhead {
    sounds: Arc<BTreeMap<u32, Vec<SoundEffect>>>,
    tick: u32,
}

impl EffectsPlayhead {
    /// Sounds keyed at the current tick, then advance.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &[SoundEffect] {
        let time = self.tick;
        self.tick = self.tick.saturating_add(1);
        self.sounds.get(&time).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Next tick to be sampled.
    pub fn tick(&self) -> u32 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playhead_fires_sounds_on_their_tick_only() {
        let effects = EffectsTimeline::empty()
            .with_sound(2, SoundEffect::new("step"))
            .with_sound(2, SoundEffect::new("creak").with_pitch(0.5))
            .with_sound(4, SoundEffect::new("thud").with_volume(0.3));

        let mut ph = effects.playhead();
        let fired: Vec<Vec<String>> = (0..6)
            .map(|_| ph.next().iter().map(|s| s.sound.clone()).collect())
            .collect();
        assert_eq!(fired[0], Vec::<String>::new());
        assert_eq!(fired[2], vec!["step", "creak"]);
        assert_eq!(fired[4], vec!["thud"]);
        assert!(fired[5].is_empty());
        assert_eq!(ph.tick(), 6);
        assert_eq!(effects.end_time(), Some(4));
    }

    #[test]
    fn volume_and_pitch_default_to_one() {
        let sound: SoundEffect = serde_json::from_str(r#"{"sound":"bell"}"#).unwrap();
        assert_eq!(sound, SoundEffect::new("bell"));
        assert!(EffectsTimeline::empty().is_empty());
    }
}
