#![allow(dead_code)]
//! Priority animation queue and per-tick bone resolution.
//!
//! Every [`AnimationController::tick`] does two passes:
//! 1. Advance every queued animation exactly once: finish transitions, loop or
//!    finish clips past their length, then sample each animated bone and
//!    collect the sounds keyed on the sampled time.
//! 2. Walk the skeleton root-to-leaf. Each bone takes its frame from the
//!    highest-priority queued animation that animates it (falling back to the
//!    remembered frame, then rest), and is composed with its parent's world
//!    transform before being pushed to the [`BoneSink`]. Collected sounds
//!    follow the poses.
//!
//! An animation of length `L` samples timeline times `0..L`, one per tick. On
//! the tick after its last sample a LOOP clip restarts at time 0, a ONCE clip
//! leaves the queue before bones are resolved, and a HOLD clip supplies its
//! last frame once more and then leaves.
//!
//! All state sits behind one mutex, so `queue` may be called from a different
//! thread than the tick driver.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::{Quat, Vec3};
use hashbrown::HashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::bone_timeline::{BoneFrame, BonePlayhead};
use crate::config::{ClearPolicy, ControllerConfig};
use crate::data::{Animation, LoopMode};
use crate::effects::{EffectsPlayhead, SoundEffect};
use crate::error::Result;
use crate::math::{body_rotation, euler_degrees_to_quat};
use crate::outputs::{BonePose, BoneSink, ControllerEvent};
use crate::priority::PriorityOrderedList;
use crate::registry::AnimationRegistry;
use crate::skeleton::{Bone, Skeleton};
use crate::transition::synthesize_transition;

/// Snapshot of one queued animation, in resolution order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedAnimationInfo {
    pub name: String,
    /// Clip currently sampled: the transition name while blending, else `name`.
    pub clip: String,
    pub priority: i32,
    /// Internal tick of the clip currently playing (transition or target).
    pub tick: u32,
    pub transitioned: bool,
}

#[derive(Debug)]
struct ActiveTrack {
    playhead: BonePlayhead,
    frame: BoneFrame,
}

#[derive(Debug)]
struct QueuedAnimation {
    animation: Arc<Animation>,
    transition: Option<Animation>,
    transition_ticks: u32,
    transitioned: bool,
    tick: u32,
    tracks: HashMap<String, ActiveTrack>,
    effects: EffectsPlayhead,
    /// Final transition frames of bones the target does not animate, held for
    /// the tick the transition finishes on.
    settling: HashMap<String, BoneFrame>,
    /// Played to its end; removed once this tick is resolved.
    finished: bool,
}

impl QueuedAnimation {
    fn new(animation: Arc<Animation>, transition: Option<Animation>, transition_ticks: u32) -> Self {
        let clip = transition.as_ref().unwrap_or(animation.as_ref());
        let tracks = start_tracks(clip);
        let effects = clip.effects().playhead();
        Self {
            transitioned: transition.is_none(),
            animation,
            transition,
            transition_ticks,
            tick: 1,
            tracks,
            effects,
            settling: HashMap::new(),
            finished: false,
        }
    }

    fn name(&self) -> &str {
        self.animation.name()
    }

    fn restart(&mut self) {
        self.tracks = start_tracks(&self.animation);
        self.effects = self.animation.effects().playhead();
        self.tick = 1;
    }

    /// Advance one tick, sampling every animated bone and collecting the
    /// sounds keyed on the sampled time.
    fn advance(&mut self, events: &mut Vec<ControllerEvent>, sounds: &mut Vec<SoundEffect>) {
        self.settling.clear();

        if !self.transitioned && self.tick > self.transition_ticks {
            log::trace!("transition into '{}' finished", self.name());
            let animation = Arc::clone(&self.animation);
            self.settling = self
                .tracks
                .drain()
                .filter(|(bone, _)| !animation.animates(bone))
                .map(|(bone, mut track)| (bone, track.playhead.next()))
                .collect();
            self.transitioned = true;
            self.transition = None;
            self.restart();
            events.push(ControllerEvent::TransitionFinished {
                animation: self.name().to_string(),
            });
        }

        if self.transitioned && self.tick > self.animation.length_ticks() {
            if self.animation.loop_mode() == LoopMode::Loop {
                log::trace!("'{}' looped", self.name());
                self.restart();
                events.push(ControllerEvent::Looped {
                    animation: self.name().to_string(),
                });
            } else {
                log::trace!("'{}' finished", self.name());
                self.finished = true;
                events.push(ControllerEvent::Finished {
                    animation: self.name().to_string(),
                });
                return;
            }
        }

        for track in self.tracks.values_mut() {
            track.frame = track.playhead.next();
        }
        sounds.extend_from_slice(self.effects.next());
        self.tick = self.tick.saturating_add(1);
    }

    fn frame(&self, bone: &str) -> Option<BoneFrame> {
        self.tracks
            .get(bone)
            .map(|t| t.frame)
            .or_else(|| self.settling.get(bone).copied())
    }

    fn info(&self, priority: i32) -> QueuedAnimationInfo {
        QueuedAnimationInfo {
            name: self.name().to_string(),
            clip: self
                .transition
                .as_ref()
                .map_or(self.name(), |t| t.name())
                .to_string(),
            priority,
            tick: self.tick,
            transitioned: self.transitioned,
        }
    }
}

fn start_tracks(clip: &Animation) -> HashMap<String, ActiveTrack> {
    clip.tracks()
        .iter()
        .map(|(bone, timeline)| {
            (
                bone.clone(),
                ActiveTrack {
                    playhead: timeline.create_playhead(),
                    frame: timeline.first_frame(),
                },
            )
        })
        .collect()
}

#[derive(Debug, Default)]
struct ControllerState {
    queue: PriorityOrderedList<String, QueuedAnimation>,
    remembered: HashMap<String, BoneFrame>,
    events: VecDeque<ControllerEvent>,
}

impl ControllerState {
    fn push_events(&mut self, cap: usize, new: impl IntoIterator<Item = ControllerEvent>) {
        for event in new {
            if cap == 0 {
                return;
            }
            if self.events.len() >= cap {
                if let Some(dropped) = self.events.pop_front() {
                    log::warn!("controller event buffer full ({cap}); dropping {dropped:?}");
                }
            }
            self.events.push_back(event);
        }
    }
}

/// Plays queued animations on one skeleton.
#[derive(Debug)]
pub struct AnimationController {
    config: ControllerConfig,
    skeleton: Arc<Skeleton>,
    state: Mutex<ControllerState>,
}

impl AnimationController {
    pub fn new(skeleton: impl Into<Arc<Skeleton>>) -> Self {
        Self::with_config(skeleton, ControllerConfig::default())
    }

    pub fn with_config(skeleton: impl Into<Arc<Skeleton>>, config: ControllerConfig) -> Self {
        Self {
            config,
            skeleton: skeleton.into(),
            state: Mutex::new(ControllerState::default()),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Queue `animation` at `priority`. With `transition_ticks > 0` the bones it
    /// animates first blend from their remembered frames into its first frame
    /// over that many ticks. Queuing a name that is already queued replaces
    /// that entry.
    pub fn queue(&self, animation: Arc<Animation>, priority: i32, transition_ticks: u32) {
        let mut state = self.state.lock();
        let transition = (transition_ticks > 0).then(|| {
            synthesize_transition(
                &self.config.transition_name,
                &animation,
                &state.remembered,
                transition_ticks,
                self.config.blend_untracked_bones,
            )
        });

        let name = animation.name().to_string();
        log::debug!("queue '{name}' priority={priority} transition_ticks={transition_ticks}");
        let entry = QueuedAnimation::new(animation, transition, transition_ticks);

        let mut events = vec![ControllerEvent::Queued {
            animation: name.clone(),
            priority,
            transition_ticks,
        }];
        if state.queue.insert_or_replace(name.clone(), entry, priority).is_some() {
            log::debug!("replaced queued animation '{name}'");
            events.push(ControllerEvent::Replaced { animation: name });
        }
        state.push_events(self.config.max_pending_events, events);
    }

    /// Resolve `name` through `registry` and queue it.
    pub fn queue_named(
        &self,
        registry: &AnimationRegistry,
        name: &str,
        priority: i32,
        transition_ticks: u32,
    ) -> Result<()> {
        let animation = registry.require(name)?;
        self.queue(animation, priority, transition_ticks);
        Ok(())
    }

    /// Remove the queued animation called `name`. Returns whether one was
    /// queued.
    pub fn remove(&self, name: &str) -> bool {
        let mut state = self.state.lock();
        if state.queue.remove(name).is_none() {
            return false;
        }
        log::debug!("removed queued animation '{name}'");
        state.push_events(
            self.config.max_pending_events,
            [ControllerEvent::Removed {
                animation: name.to_string(),
            }],
        );
        true
    }

    /// Drop every queued animation. Remembered frames are kept or dropped
    /// according to [`ControllerConfig::clear_policy`].
    pub fn clear_queue(&self) {
        let mut state = self.state.lock();
        let removed = state.queue.len();
        state.queue.clear();
        if self.config.clear_policy == ClearPolicy::ResetPose {
            state.remembered.clear();
        }
        log::debug!("cleared {removed} queued animations ({:?})", self.config.clear_policy);
        state.push_events(self.config.max_pending_events, [ControllerEvent::Cleared { removed }]);
    }

    /// Advance one tick with the model turned by `body_yaw` and `body_pitch`
    /// degrees, pushing every bone's world pose and every due sound to `sink`.
    pub fn tick<S: BoneSink + ?Sized>(&self, body_yaw: f32, body_pitch: f32, sink: &mut S) {
        self.tick_with(body_rotation(body_yaw, body_pitch), Vec3::ZERO, sink);
    }

    /// Advance one tick with an explicit root transform.
    pub fn tick_with<S: BoneSink + ?Sized>(
        &self,
        root_rotation: Quat,
        root_position: Vec3,
        sink: &mut S,
    ) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let mut events = Vec::new();
        let mut sounds = Vec::new();
        for entry in state.queue.values_mut() {
            entry.advance(&mut events, &mut sounds);
        }
        // ONCE clips stop controlling bones right away; HOLD clips keep their
        // last frame for this tick.
        state
            .queue
            .retain(|_, e| !(e.finished && e.animation.loop_mode() == LoopMode::Once));

        resolve_bones(
            &self.skeleton,
            &state.queue,
            &mut state.remembered,
            root_rotation,
            root_position,
            &mut *sink,
        );

        for sound in &sounds {
            sink.emit_sound(sound);
        }

        state.queue.retain(|_, e| !e.finished);
        state.push_events(self.config.max_pending_events, events);
    }

    /// Queued animations, highest priority first.
    pub fn queued(&self) -> Vec<QueuedAnimationInfo> {
        self.state
            .lock()
            .queue
            .iter()
            .map(|(_, entry, priority)| entry.info(priority))
            .collect()
    }

    pub fn is_queued(&self, name: &str) -> bool {
        self.state.lock().queue.contains_key(name)
    }

    pub fn queue_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Last frame emitted for `bone` by an animation.
    pub fn remembered_frame(&self, bone: &str) -> Option<BoneFrame> {
        self.state.lock().remembered.get(bone).copied()
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&self) -> Vec<ControllerEvent> {
        self.state.lock().events.drain(..).collect()
    }
}

fn resolve_bones<S: BoneSink + ?Sized>(
    skeleton: &Skeleton,
    queue: &PriorityOrderedList<String, QueuedAnimation>,
    remembered: &mut HashMap<String, BoneFrame>,
    root_rotation: Quat,
    root_position: Vec3,
    sink: &mut S,
) {
    let mut stack: Vec<(&Bone, Vec3, Quat, Vec3)> = skeleton
        .roots
        .iter()
        .rev()
        .map(|bone| (bone, root_position, root_rotation, Vec3::ONE))
        .collect();

    while let Some((bone, parent_position, parent_rotation, parent_scale)) = stack.pop() {
        let frame = match queue.values().find_map(|e| e.frame(&bone.name)) {
            Some(frame) => {
                match remembered.get_mut(bone.name.as_str()) {
                    Some(slot) => *slot = frame,
                    None => {
                        remembered.insert(bone.name.clone(), frame);
                    }
                }
                frame
            }
            None => remembered
                .get(bone.name.as_str())
                .copied()
                .unwrap_or(BoneFrame::INITIAL),
        };

        let local_position = frame.position + bone.offset;
        let local_rotation = euler_degrees_to_quat(bone.rotation) * euler_degrees_to_quat(frame.rotation);
        let scale = parent_scale * frame.scale;
        let rotation = parent_rotation * local_rotation;
        let position = parent_position + parent_rotation * (local_position * parent_scale);

        if let Some(model_data) = bone.model_data {
            sink.update_model_data(&bone.name, model_data);
        }
        sink.update_bone(
            &bone.name,
            &BonePose {
                position,
                rotation,
                scale,
            },
        );

        for child in bone.children.iter().rev() {
            stack.push((child, position, rotation, scale));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bone_timeline::BoneTimeline;
    use crate::outputs::PoseBuffer;
    use crate::timeline::Timeline;

    fn clip(name: &str, mode: LoopMode, length: u32, bone: &str, to: f32) -> Arc<Animation> {
        let positions = Timeline::builder(Vec3::ZERO)
            .keyframe(0, Vec3::ZERO)
            .keyframe(length, Vec3::new(to, 0.0, 0.0))
            .build();
        Arc::new(
            Animation::builder(name)
                .loop_mode(mode)
                .length(length)
                .track(
                    bone,
                    BoneTimeline::new(positions, Timeline::constant(Vec3::ZERO), Timeline::constant(Vec3::ONE)),
                )
                .build(),
        )
    }

    #[test]
    fn controller_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnimationController>();
    }

    #[test]
    fn advance_counts_ticks_per_entry_not_per_bone() {
        let skeleton = Skeleton::new(vec![Bone::new("a"), Bone::new("b")]);
        let mut anim = Animation::builder("both").loop_mode(LoopMode::Loop).length(10);
        for bone in ["a", "b"] {
            anim = anim.track(bone, BoneTimeline::empty());
        }
        let controller = AnimationController::new(skeleton);
        controller.queue(Arc::new(anim.build()), 0, 0);
        let mut sink = PoseBuffer::new();
        controller.tick(0.0, 0.0, &mut sink);
        controller.tick(0.0, 0.0, &mut sink);
        assert_eq!(controller.queued()[0].tick, 3);
        assert_eq!(sink.updates(), 4);
    }

    #[test]
    fn event_buffer_drops_oldest_when_full() {
        let config = ControllerConfig {
            max_pending_events: 2,
            ..ControllerConfig::default()
        };
        let controller = AnimationController::with_config(Skeleton::default(), config);
        controller.queue(clip("a", LoopMode::Once, 2, "x", 1.0), 0, 0);
        controller.queue(clip("b", LoopMode::Once, 2, "x", 1.0), 0, 0);
        controller.queue(clip("c", LoopMode::Once, 2, "x", 1.0), 0, 0);
        let events = controller.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], ControllerEvent::Queued { animation, .. } if animation == "c"));
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn hold_keeps_last_frame_for_the_finishing_tick() {
        let skeleton = Skeleton::new(vec![Bone::new("x")]);
        let controller = AnimationController::new(skeleton);
        controller.queue(clip("hold", LoopMode::Hold, 2, "x", 6.0), 0, 0);
        let mut sink = PoseBuffer::new();
        for _ in 0..2 {
            controller.tick(0.0, 0.0, &mut sink);
        }
        assert!(controller.is_queued("hold"));
        assert_eq!(controller.queued()[0].tick, 3);

        controller.tick(0.0, 0.0, &mut sink);
        assert!(!controller.is_queued("hold"));
        assert_eq!(sink.get("x").unwrap().position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn settling_frames_last_one_tick() {
        let mut remembered = HashMap::new();
        remembered.insert("head".to_string(), BoneFrame::new(Vec3::X, Vec3::ZERO, Vec3::ONE));
        let target = clip("wave", LoopMode::Loop, 4, "arm", 1.0);
        let transition = synthesize_transition("t", &target, &remembered, 1, true);
        let mut entry = QueuedAnimation::new(target, Some(transition), 1);

        let (mut events, mut sounds) = (Vec::new(), Vec::new());
        entry.advance(&mut events, &mut sounds);
        assert_eq!(entry.frame("head").map(|f| f.position), Some(Vec3::X));

        entry.advance(&mut events, &mut sounds);
        assert!(entry.transitioned);
        assert_eq!(entry.frame("head"), Some(BoneFrame::INITIAL));

        entry.advance(&mut events, &mut sounds);
        assert_eq!(entry.frame("head"), None);
        assert!(sounds.is_empty());
    }
}
