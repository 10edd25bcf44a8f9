//! Canonical animation JSON.
//!
//! ```json
//! {
//!   "name": "wave",
//!   "loop_mode": "loop",
//!   "length": 20,
//!   "bones": {
//!     "arm": {
//!       "rotation": [
//!         { "time": 0, "value": [0, 0, 0], "interpolation": "catmull_rom" },
//!         { "time": 10, "value": [0, 0, 90] }
//!       ]
//!     }
//!   },
//!   "effects": {
//!     "sounds": [ { "time": 10, "sound": "swish", "volume": 0.8 } ]
//!   }
//! }
//! ```
//!
//! Missing channels have no keyframes: position and rotation stay at zero,
//! scale at one.

use glam::Vec3;
use hashbrown::HashMap;
use serde::Deserialize;

use crate::bone_timeline::BoneTimeline;
use crate::data::{Animation, LoopMode};
use crate::effects::{EffectsTimeline, SoundEffect};
use crate::error::{AnimationError, Result};
use crate::interp::{BezierHandles, Interpolator};
use crate::timeline::{KeyFrame, Timeline};

/// Parse canonical animation JSON into an [`Animation`].
///
/// Two keyframes at the same time in one channel are rejected.
pub fn parse_animation_json(s: &str) -> Result<Animation> {
    let stored: StoredAnimation = serde_json::from_str(s)?;
    if stored.name.is_empty() {
        return Err(AnimationError::InvalidAnimation {
            reason: "animation name is empty".to_string(),
        });
    }

    let mut tracks = HashMap::with_capacity(stored.bones.len());
    for (bone, channels) in stored.bones {
        let timeline = BoneTimeline::new(
            to_timeline(&stored.name, &bone, "position", Vec3::ZERO, channels.position)?,
            to_timeline(&stored.name, &bone, "rotation", Vec3::ZERO, channels.rotation)?,
            to_timeline(&stored.name, &bone, "scale", Vec3::ONE, channels.scale)?,
        );
        if let Some(end) = timeline.end_time() {
            if end > stored.length {
                log::warn!(
                    "animation '{}' bone '{bone}' has keyframes past its length ({end} > {})",
                    stored.name,
                    stored.length
                );
            }
        }
        tracks.insert(bone, timeline);
    }

    let mut effects = EffectsTimeline::empty();
    for cue in stored.effects.sounds {
        if cue.time >= stored.length {
            log::warn!(
                "animation '{}' sound '{}' at tick {} is never reached (length {})",
                stored.name,
                cue.sound.sound,
                cue.time,
                stored.length
            );
        }
        effects = effects.with_sound(cue.time, cue.sound);
    }

    Ok(Animation::new(
        stored.name,
        stored.loop_mode,
        stored.length,
        tracks,
    )
    .with_effects(effects))
}

fn to_timeline(
    animation: &str,
    bone: &str,
    channel: &str,
    initial: Vec3,
    keyframes: Vec<StoredKeyFrame>,
) -> Result<Timeline<Vec3>> {
    let keyframes = keyframes
        .into_iter()
        .map(|k| KeyFrame {
            time: k.time,
            value: Vec3::from_array(k.value),
            interpolator: k.interpolation,
            bezier: k.bezier.map(|b| BezierHandles {
                left_time: Vec3::from_array(b.left_time),
                left_value: Vec3::from_array(b.left_value),
                right_time: Vec3::from_array(b.right_time),
                right_value: Vec3::from_array(b.right_value),
            }),
        })
        .collect();

    Timeline::new(initial, Interpolator::Linear, keyframes).inspect_err(|err| {
        log::debug!("rejecting '{animation}' {bone}.{channel}: {err}");
    })
}

#[derive(Debug, Deserialize)]
struct StoredAnimation {
    name: String,
    #[serde(default)]
    loop_mode: LoopMode,
    length: u32,
    #[serde(default)]
    bones: HashMap<String, StoredBone>,
    #[serde(default)]
    effects: StoredEffects,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredEffects {
    sounds: Vec<StoredSound>,
}

#[derive(Debug, Deserialize)]
struct StoredSound {
    time: u32,
    #[serde(flatten)]
    sound: SoundEffect,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredBone {
    position: Vec<StoredKeyFrame>,
    rotation: Vec<StoredKeyFrame>,
    scale: Vec<StoredKeyFrame>,
}

#[derive(Debug, Deserialize)]
struct StoredKeyFrame {
    time: u32,
    value: [f32; 3],
    #[serde(default)]
    interpolation: Option<Interpolator>,
    #[serde(default)]
    bezier: Option<StoredBezier>,
}

#[derive(Debug, Deserialize)]
struct StoredBezier {
    #[serde(default = "default_left_time")]
    left_time: [f32; 3],
    #[serde(default)]
    left_value: [f32; 3],
    #[serde(default = "default_right_time")]
    right_time: [f32; 3],
    #[serde(default)]
    right_value: [f32; 3],
}

fn default_left_time() -> [f32; 3] {
    [-0.1; 3]
}

fn default_right_time() -> [f32; 3] {
    [0.1; 3]
}
