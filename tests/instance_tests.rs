//! Skinned Instance Tests
//!
//! Tests for:
//! - Full frame pipeline (playback -> evaluation -> resolution -> skinning)
//! - Bind pose round trip at time zero
//! - Mutation isolation between instances sharing a template
//! - Reset and playback settings

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use anyhow::Context;
use glam::{Mat4, Quat, Vec3};

use sinew::animation::{
    AnimationChannel, AnimationClip, AnimationSettings, KeyframeTrack, SkinnedInstance,
};
use sinew::scene::{Node, SceneGraph, Skin, compute_global_transforms, compute_local_transforms};

const EPSILON: f32 = 1e-5;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn approx_mat4(a: Mat4, b: Mat4) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// hip -> knee -> ankle, each one unit above its parent.
fn leg_template() -> (Arc<SceneGraph>, Skin) {
    let graph = SceneGraph::from_nodes(vec![
        Node::new("hip").with_children([1]),
        Node::new("knee")
            .with_translation(Vec3::new(0.0, 1.0, 0.0))
            .with_children([2]),
        Node::new("ankle").with_translation(Vec3::new(0.0, 1.0, 0.0)),
    ])
    .unwrap();

    let joints = vec![0, 1, 2];
    let locals = compute_local_transforms(&graph, 0).unwrap();
    let globals = compute_global_transforms(&graph, &locals, 0, Mat4::IDENTITY).unwrap();
    let ibms = joints
        .iter()
        .map(|&joint| globals.get(joint).unwrap().inverse())
        .collect();

    (Arc::new(graph), Skin::new("leg", joints, ibms).unwrap())
}

/// Knee bends a quarter turn at t = 1 and straightens again at t = 2.
fn bend_clip() -> AnimationClip {
    let quarter = Quat::from_rotation_z(FRAC_PI_2);
    AnimationClip::new(
        "bend",
        vec![
            AnimationChannel::rotation(
                1,
                KeyframeTrack::new(
                    vec![0.0, 1.0, 2.0],
                    vec![Quat::IDENTITY, quarter, Quat::IDENTITY],
                )
                .unwrap(),
            ),
            AnimationChannel::translation(
                1,
                KeyframeTrack::new(
                    vec![0.0, 2.0],
                    vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
                )
                .unwrap(),
            ),
        ],
    )
}

// ============================================================================
// Frame pipeline
// ============================================================================

#[test]
fn time_zero_reproduces_bind_pose() -> anyhow::Result<()> {
    init_logging();
    let (template, skin) = leg_template();
    let mut instance = SkinnedInstance::new(template, &[skin])?;
    instance.play(&bend_clip());

    instance.evaluate_at(0.0)?;

    let bind = instance.skins()[0].bind_joint_matrices().to_vec();
    let current = instance.joint_matrices(0).context("skin 0")?;
    for (a, b) in current.iter().zip(&bind) {
        assert!(approx_mat4(*a, *b));
        assert!(approx_mat4(*a, Mat4::IDENTITY));
    }
    Ok(())
}

#[test]
fn bent_knee_moves_only_descendants() -> anyhow::Result<()> {
    init_logging();
    let (template, skin) = leg_template();
    let mut instance = SkinnedInstance::new(template, &[skin])?;
    instance.play(&bend_clip());

    let report = instance.evaluate_at(1.5)?;
    assert_eq!(report.applied, 2);

    let matrices = instance.joint_matrices(0).context("skin 0")?;
    // Hip and knee pivot stay put
    assert!(approx_mat4(matrices[0], Mat4::IDENTITY));
    let knee_pivot = matrices[1].transform_point3(Vec3::new(0.0, 1.0, 0.0));
    assert!(knee_pivot.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPSILON));
    // The ankle swings from (0, 2, 0) to (-1, 1, 0)
    let ankle = matrices[2].transform_point3(Vec3::new(0.0, 2.0, 0.0));
    assert!(ankle.abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), EPSILON), "got {ankle}");
    Ok(())
}

#[test]
fn update_advances_with_playback_speed() {
    let (template, skin) = leg_template();
    let settings = AnimationSettings {
        playback_speed: 2.0,
        ..Default::default()
    };
    let mut instance = SkinnedInstance::with_settings(template, &[skin], settings).unwrap();
    instance.play(&bend_clip());

    instance.update(0.6).unwrap();

    assert!((instance.actions()[0].time - 1.2).abs() < EPSILON);
    let (_, rotation, _) = instance.graph().get(1).unwrap().transform.to_trs();
    assert!(rotation.abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2), EPSILON));
}

#[test]
fn play_drops_channels_for_unknown_nodes() -> anyhow::Result<()> {
    init_logging();
    let (template, skin) = leg_template();
    let mut instance = SkinnedInstance::new(template, &[skin])?;
    let clip = AnimationClip::new(
        "stray",
        vec![AnimationChannel::scale(
            42,
            KeyframeTrack::new(vec![0.0, 1.0], vec![Vec3::ONE; 2])?,
        )],
    );

    let index = instance.play(&clip);
    let report = instance.update(0.1)?;

    assert!(instance.actions()[index].clip().is_empty());
    assert_eq!(report.skipped, 0);
    Ok(())
}

// ============================================================================
// Isolation
// ============================================================================

#[test]
fn instances_sharing_a_template_do_not_interfere() {
    let (template, skin) = leg_template();
    let clip = bend_clip();

    let mut animated = SkinnedInstance::new(Arc::clone(&template), &[skin.clone()]).unwrap();
    let mut idle = SkinnedInstance::new(Arc::clone(&template), &[skin]).unwrap();
    animated.play(&clip);

    animated.evaluate_at(1.0).unwrap();
    idle.update(1.0).unwrap();

    assert!(!approx_mat4(animated.joint_matrices(0).unwrap()[2], Mat4::IDENTITY));
    for matrix in idle.joint_matrices(0).unwrap() {
        assert!(approx_mat4(*matrix, Mat4::IDENTITY));
    }
    // The template keeps its bind pose
    let (_, rotation, _) = template.get(1).unwrap().transform.to_trs();
    assert_eq!(rotation, Quat::IDENTITY);
}

#[test]
fn independent_instances_update_in_parallel() {
    let (template, skin) = leg_template();
    let clip = bend_clip();
    let mut instances: Vec<_> = (0..4)
        .map(|_| {
            let mut instance =
                SkinnedInstance::new(Arc::clone(&template), std::slice::from_ref(&skin)).unwrap();
            instance.play(&clip);
            instance
        })
        .collect();

    std::thread::scope(|scope| {
        for (i, instance) in instances.iter_mut().enumerate() {
            scope.spawn(move || instance.evaluate_at(i as f32 * 0.5).unwrap());
        }
    });

    // t = 1.0 and t = 1.5 land in the bent interval, 0.0 and 0.5 do not
    let bent: Vec<bool> = instances
        .iter()
        .map(|instance| !approx_mat4(instance.joint_matrices(0).unwrap()[2], Mat4::IDENTITY))
        .collect();
    assert_eq!(bent, vec![false, false, true, true]);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_restores_bind_pose_and_rewinds() {
    let (template, skin) = leg_template();
    let mut instance = SkinnedInstance::new(template, &[skin]).unwrap();
    instance.play(&bend_clip());
    instance.update(1.2).unwrap();

    instance.reset_to_bind_pose();

    assert_eq!(instance.actions()[0].time, 0.0);
    for matrix in instance.joint_matrices(0).unwrap() {
        assert!(approx_mat4(*matrix, Mat4::IDENTITY));
    }
    let (_, rotation, _) = instance.graph().get(1).unwrap().transform.to_trs();
    assert_eq!(rotation, Quat::IDENTITY);
}
