//! Synthesized transition clips.
//!
//! A transition is a short HOLD clip with one two-keyframe linear timeline per
//! channel, running from the pose a bone was last seen in to the frame the
//! incoming animation starts on.

use glam::Vec3;
use hashbrown::HashMap;

use crate::bone_timeline::{BoneFrame, BoneTimeline};
use crate::data::{Animation, LoopMode};
use crate::interp::Interpolator;
use crate::timeline::Timeline;

/// Build a clip of `ticks` ticks blending `remembered` frames into the first
/// frame of `target`.
///
/// Bones `target` animates start from their remembered frame, or rest when
/// none was recorded. With `blend_untracked`, remembered bones that `target`
/// does not animate blend back to rest as well.
pub fn synthesize_transition(
    name: &str,
    target: &Animation,
    remembered: &HashMap<String, BoneFrame>,
    ticks: u32,
    blend_untracked: bool,
) -> Animation {
    let mut tracks: HashMap<String, BoneTimeline> = HashMap::with_capacity(target.tracks().len());

    for (bone, timeline) in target.tracks() {
        let from = remembered.get(bone).copied().unwrap_or(BoneFrame::INITIAL);
        tracks.insert(bone.clone(), blend(from, timeline.first_frame(), ticks));
    }

    if blend_untracked {
        for (bone, frame) in remembered {
            if !tracks.contains_key(bone) {
                tracks.insert(bone.clone(), blend(*frame, BoneFrame::INITIAL, ticks));
            }
        }
    }

    log::trace!(
        "synthesized {ticks}-tick transition into '{}' over {} bones",
        target.name(),
        tracks.len()
    );
    Animation::new(name, LoopMode::Hold, ticks, tracks)
}

fn blend(from: BoneFrame, to: BoneFrame, ticks: u32) -> BoneTimeline {
    BoneTimeline::new(
        channel(from.position, to.position, ticks),
        channel(from.rotation, to.rotation, ticks),
        channel(from.scale, to.scale, ticks),
    )
}

fn channel(from: Vec3, to: Vec3, ticks: u32) -> Timeline<Vec3> {
    Timeline::builder(from)
        .default_interpolator(Interpolator::Linear)
        .keyframe(0, from)
        .keyframe(ticks, to)
        .build()
}
