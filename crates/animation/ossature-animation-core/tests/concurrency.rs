use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use glam::Vec3;
use ossature_animation_core::{
    Animation, AnimationController, Bone, BoneTimeline, LoopMode, PoseBuffer, Skeleton, Timeline,
};

fn ramp(name: &str, to: f32) -> Arc<Animation> {
    let positions = Timeline::builder(Vec3::ZERO)
        .keyframe(0, Vec3::ZERO)
        .keyframe(8, Vec3::splat(to))
        .build();
    Arc::new(
        Animation::builder(name)
            .loop_mode(LoopMode::Loop)
            .length(8)
            .track(
                "arm",
                BoneTimeline::new(positions, Timeline::constant(Vec3::ZERO), Timeline::constant(Vec3::ONE)),
            )
            .build(),
    )
}

/// it should accept queue calls from another thread while ticking
#[test]
fn queue_from_other_thread_while_ticking() {
    let skeleton = Skeleton::new(vec![Bone::new("body").with_child(Bone::new("arm"))]);
    let controller = Arc::new(AnimationController::new(skeleton));
    let done = Arc::new(AtomicBool::new(false));

    let ticker = {
        let controller = Arc::clone(&controller);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut sink = PoseBuffer::new();
            let mut ticks = 0usize;
            while !done.load(Ordering::Acquire) || ticks < 100 {
                controller.tick(0.0, 0.0, &mut sink);
                ticks += 1;
            }
            (ticks, sink)
        })
    };

    let names = ["a", "b", "c", "d"];
    for round in 0..200 {
        let name = names[round % names.len()];
        controller.queue(ramp(name, round as f32), (round % 3) as i32, (round % 4) as u32);
        if round % 7 == 0 {
            controller.remove(names[(round + 1) % names.len()]);
        }
        if round % 50 == 49 {
            controller.clear_queue();
        }
    }
    done.store(true, Ordering::Release);

    let (ticks, sink) = ticker.join().expect("tick thread panicked");
    assert!(ticks >= 100);
    // every tick emits both bones
    assert_eq!(sink.updates(), ticks * 2);
    assert!(controller.queue_len() <= names.len());
    for info in controller.queued() {
        assert!(names.contains(&info.name.as_str()));
    }
}
