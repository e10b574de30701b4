use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Mat4, Quat, Vec3};
use sinew::animation::{
    AnimationChannel, AnimationClip, KeyframeCursor, KeyframeTrack, SkinnedInstance,
    find_keyframe_index, find_keyframe_index_with_cursor,
};
use sinew::scene::{Node, SceneGraph, Skin, compute_global_transforms, compute_local_transforms};

const KEYFRAMES: usize = 120;

/// Single chain of `joints` bones with inverse bind matrices of the rest pose.
fn chain(joints: usize) -> (Arc<SceneGraph>, Skin) {
    let nodes = (0..joints)
        .map(|i| {
            let node = Node::new(format!("bone_{i}")).with_translation(Vec3::new(0.0, 0.1, 0.0));
            if i + 1 < joints {
                node.with_children([i + 1])
            } else {
                node
            }
        })
        .collect();
    let graph = SceneGraph::from_nodes(nodes).unwrap();

    let locals = compute_local_transforms(&graph, 0).unwrap();
    let globals = compute_global_transforms(&graph, &locals, 0, Mat4::IDENTITY).unwrap();
    let ibms = (0..joints)
        .map(|joint| globals.get(joint).unwrap().inverse())
        .collect();

    let skin = Skin::new("chain", (0..joints).collect(), ibms).unwrap();
    (Arc::new(graph), skin)
}

/// One rotation channel per joint, sampled at 30 fps.
fn wave_clip(joints: usize) -> AnimationClip {
    let times: Vec<f32> = (0..KEYFRAMES).map(|i| i as f32 / 30.0).collect();
    let channels = (0..joints)
        .map(|joint| {
            let values = times
                .iter()
                .map(|t| Quat::from_rotation_z((t * 4.0 + joint as f32 * 0.3).sin() * 0.2))
                .collect();
            AnimationChannel::rotation(joint, KeyframeTrack::new(times.clone(), values).unwrap())
        })
        .collect();
    AnimationClip::new("wave", channels)
}

fn keyframe_search(c: &mut Criterion) {
    let times: Vec<f32> = (0..KEYFRAMES).map(|i| i as f32 / 30.0).collect();
    let probes: Vec<f32> = (0..1000).map(|i| i as f32 / 250.0).collect();

    c.bench_function("keyframe_binary_search", |b| {
        b.iter(|| {
            for &t in &probes {
                black_box(find_keyframe_index(black_box(&times), t).unwrap());
            }
        });
    });

    c.bench_function("keyframe_cursor_scan", |b| {
        b.iter(|| {
            let mut cursor = KeyframeCursor::default();
            for &t in &probes {
                black_box(find_keyframe_index_with_cursor(black_box(&times), t, &mut cursor).unwrap());
            }
        });
    });
}

fn frame_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("skinned_frame");

    for joints in [16, 64, 256] {
        let (template, skin) = chain(joints);
        let clip = wave_clip(joints);
        let mut instance = SkinnedInstance::new(template, &[skin]).unwrap();
        instance.play(&clip);

        group.bench_with_input(BenchmarkId::from_parameter(joints), &joints, |b, _| {
            b.iter(|| {
                instance.update(black_box(1.0 / 60.0)).unwrap();
                black_box(instance.joint_matrices(0));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, keyframe_search, frame_update);
criterion_main!(benches);
