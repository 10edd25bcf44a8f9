#![allow(dead_code)]
//! Ossature Animation Core (engine-agnostic)
//!
//! Tick-driven skeletal keyframe playback: per-channel timelines sampled by
//! forward-only playheads, bundled per bone into animations, and played by a
//! priority queue that synthesizes transitions and resolves which animation
//! controls each bone. World poses and tick-keyed sounds are pushed to a
//! [`BoneSink`] supplied by the adapter; this crate never touches a renderer
//! or the network.

pub mod bone_timeline;
pub mod config;
pub mod controller;
pub mod data;
pub mod effects;
pub mod error;
pub mod interp;
pub mod math;
pub mod outputs;
pub mod playhead;
pub mod priority;
pub mod registry;
pub mod skeleton;
pub mod stored_animation;
pub mod timeline;
pub mod transition;
pub mod value;

// Re-exports for consumers (adapters)
pub use bone_timeline::{BoneFrame, BonePlayhead, BoneTimeline};
pub use config::{ClearPolicy, ControllerConfig};
pub use controller::{AnimationController, QueuedAnimationInfo};
pub use data::{Animation, AnimationBuilder, LoopMode};
pub use effects::{EffectsPlayhead, EffectsTimeline, SoundEffect};
pub use error::{AnimationError, Result};
pub use interp::{BezierHandles, Interpolator};
pub use outputs::{BonePose, BoneSink, ControllerEvent, PoseBuffer};
pub use playhead::Playhead;
pub use priority::PriorityOrderedList;
pub use registry::AnimationRegistry;
pub use skeleton::{Bone, Skeleton};
pub use stored_animation::parse_animation_json;
pub use timeline::{KeyFrame, Timeline, TimelineBuilder};
pub use transition::synthesize_transition;
pub use value::Animatable;
