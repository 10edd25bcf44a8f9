use glam::Vec3;
use ossature_animation_core::{
    AnimationError, BezierHandles, BoneTimeline, Interpolator, KeyFrame, Playhead, Timeline,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn samples<T: ossature_animation_core::Animatable>(ph: &mut Playhead<T>, n: usize) -> Vec<T> {
    (0..n).map(|_| ph.next()).collect()
}

fn linear(keys: &[(u32, f32)]) -> Timeline<f32> {
    keys.iter()
        .fold(Timeline::builder(0.0f32), |b, (t, v)| b.keyframe(*t, *v))
        .build()
}

/// it should yield the initial value forever without keyframes
#[test]
fn empty_timeline_is_constant_initial() {
    let tl = Timeline::constant(Vec3::new(1.0, 2.0, 3.0));
    let mut ph = tl.playhead();
    for _ in 0..50 {
        assert_eq!(ph.next(), Vec3::new(1.0, 2.0, 3.0));
    }
}

/// it should ignore time for a single keyframe
#[test]
fn single_keyframe_is_constant_at_any_tick() {
    let tl = linear(&[(5, 7.0)]);
    let mut ph = tl.playhead();
    let values = samples(&mut ph, 1001);
    assert_eq!(values[0], 7.0);
    assert_eq!(values[5], 7.0);
    assert_eq!(values[1000], 7.0);
}

/// it should interpolate linearly and hit keyframes exactly
#[test]
fn linear_midpoint_and_exact_boundary() {
    let tl = linear(&[(0, 0.0), (10, 100.0)]);
    let mut ph = tl.playhead();
    let values = samples(&mut ph, 12);
    assert_eq!(values[5], 50.0);
    assert_eq!(values[10], 100.0);
    // holds after the last keyframe
    assert_eq!(values[11], 100.0);
}

/// it should hold the first value before the first authored keyframe
#[test]
fn implicit_leading_keyframe_holds_first_value() {
    let tl = linear(&[(5, 3.0), (10, 8.0)]);
    let mut ph = tl.playhead();
    let values = samples(&mut ph, 8);
    for v in &values[0..=5] {
        assert_eq!(*v, 3.0);
    }
    assert_eq!(values[6], 4.0);
    assert_eq!(values[7], 5.0);
}

/// it should not overshoot before the first keyframe with a curved default
#[test]
fn implicit_leading_keyframe_ignores_default_interpolator() {
    let tl = Timeline::builder(0.0f32)
        .default_interpolator(Interpolator::CatmullRom)
        .keyframe(4, 2.0)
        .keyframe(8, 10.0)
        .build();
    let mut ph = tl.playhead();
    let values = samples(&mut ph, 5);
    assert!(values.iter().all(|v| *v == 2.0), "{values:?}");
}

/// it should hold the segment start with step interpolation
#[test]
fn step_holds_until_next_keyframe() {
    let tl = Timeline::builder(0.0f32)
        .default_interpolator(Interpolator::Step)
        .keyframe(0, 1.0)
        .keyframe(4, 5.0)
        .keyframe(8, 9.0)
        .build();
    let mut ph = tl.playhead();
    assert_eq!(
        samples(&mut ph, 10),
        vec![1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 5.0, 9.0, 9.0]
    );
}

/// it should let a step keyframe override a linear default
#[test]
fn keyframe_interpolator_overrides_default() {
    let tl = Timeline::new(
        0.0f32,
        Interpolator::Linear,
        vec![
            KeyFrame::new(0, 0.0).with_interpolator(Interpolator::Step),
            KeyFrame::new(4, 4.0),
            KeyFrame::new(8, 0.0),
        ],
    )
    .unwrap();
    let mut ph = tl.playhead();
    let values = samples(&mut ph, 9);
    assert_eq!(&values[0..5], &[0.0, 0.0, 0.0, 0.0, 4.0]);
    // second segment is plain linear
    assert_eq!(&values[5..9], &[3.0, 2.0, 1.0, 0.0]);
}

/// it should pass through every keyframe with catmull-rom
#[test]
fn catmull_rom_passes_through_keyframes() {
    let tl = Timeline::builder(0.0f32)
        .default_interpolator(Interpolator::CatmullRom)
        .keyframe(0, 0.0)
        .keyframe(4, 10.0)
        .keyframe(8, 0.0)
        .keyframe(12, 10.0)
        .build();
    let mut ph = tl.playhead();
    let values = samples(&mut ph, 13);
    assert_eq!(values[4], 10.0);
    assert_eq!(values[8], 0.0);
    assert_eq!(values[12], 10.0);
    // smooth through the peak: ahead of the straight line on the way in
    assert!(values[3] > 7.5, "values[3]={}", values[3]);
}

/// it should ease with bezier handles per axis
#[test]
fn bezier_eases_each_axis() {
    let handles = BezierHandles {
        left_time: Vec3::splat(-2.0),
        left_value: Vec3::ZERO,
        right_time: Vec3::splat(2.0),
        right_value: Vec3::ZERO,
    };
    let tl = Timeline::new(
        Vec3::ZERO,
        Interpolator::Linear,
        vec![
            KeyFrame::new(0, Vec3::ZERO)
                .with_interpolator(Interpolator::Bezier)
                .with_bezier(handles),
            KeyFrame::new(10, Vec3::new(10.0, 20.0, -10.0)).with_bezier(handles),
        ],
    )
    .unwrap();
    let mut ph = tl.playhead();
    let values = samples(&mut ph, 11);
    // symmetric handles: midpoint on the straight line, slow start
    approx(values[5].x, 5.0, 1e-2);
    approx(values[5].y, 10.0, 1e-2);
    approx(values[5].z, -5.0, 1e-2);
    assert!(values[1].x < 1.0, "values[1]={}", values[1]);
    assert_eq!(values[10], Vec3::new(10.0, 20.0, -10.0));
}

/// it should reject duplicate keyframe times
#[test]
fn duplicate_keyframes_are_rejected_or_replaced() {
    let err = Timeline::new(
        0.0f32,
        Interpolator::Linear,
        vec![KeyFrame::new(2, 1.0), KeyFrame::new(2, 3.0)],
    )
    .unwrap_err();
    assert_eq!(err, AnimationError::DuplicateKeyFrame { time: 2 });

    let tl = Timeline::builder(0.0f32)
        .keyframe(0, 0.0)
        .keyframe(2, 1.0)
        .keyframe(2, 4.0)
        .build();
    assert_eq!(tl.len(), 2);
    let mut ph = tl.playhead();
    assert_eq!(samples(&mut ph, 3), vec![0.0, 2.0, 4.0]);
}

/// it should advance bone channels independently of their keyframe layout
#[test]
fn bone_playhead_samples_three_channels() {
    let bone = BoneTimeline::new(
        Timeline::builder(Vec3::ZERO)
            .keyframe(0, Vec3::ZERO)
            .keyframe(2, Vec3::new(2.0, 0.0, 0.0))
            .build(),
        Timeline::builder(Vec3::ZERO)
            .keyframe(0, Vec3::ZERO)
            .keyframe(4, Vec3::new(0.0, 40.0, 0.0))
            .build(),
        Timeline::constant(Vec3::ONE),
    );
    assert_eq!(bone.end_time(), Some(4));
    let mut ph = bone.create_playhead();
    ph.next();
    let frame = ph.next();
    assert_eq!(frame.position, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(frame.rotation, Vec3::new(0.0, 10.0, 0.0));
    assert_eq!(frame.scale, Vec3::ONE);
}
