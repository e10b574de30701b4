//! Headless skin player.
//!
//! ```text
//! skin_player <model.glb> [frames] [speed] [animation]
//! ```
//!
//! Loads a skinned glTF model, plays one of its animations for `frames`
//! frames at 60 fps and prints the joint positions of the first skin.

use anyhow::{Context, bail};
use glam::{Mat4, Vec3};
use log::info;
use sinew::animation::AnimationSettings;
use sinew::assets::GltfLoader;

const FRAME_TIME: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: usize = 120;
const DEFAULT_SPEED: f32 = 2.0;

struct Args {
    path: String,
    frames: usize,
    speed: f32,
    animation: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut args = std::env::args().skip(1);
        let Some(path) = args.next() else {
            bail!("usage: skin_player <model.glb> [frames] [speed] [animation]");
        };
        let frames = match args.next() {
            Some(value) => value.parse().context("frames must be an integer")?,
            None => DEFAULT_FRAMES,
        };
        let speed = match args.next() {
            Some(value) => value.parse().context("speed must be a number")?,
            None => DEFAULT_SPEED,
        };

        Ok(Self {
            path,
            frames,
            speed,
            animation: args.next(),
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse()?;

    let asset = GltfLoader::load(&args.path)
        .with_context(|| format!("failed to load '{}'", args.path))?;
    println!(
        "Loaded {} nodes, {} skins, {} animations",
        asset.graph.len(),
        asset.skins.len(),
        asset.animations.len()
    );
    if asset.skins.is_empty() {
        bail!("'{}' has no skin", args.path);
    }

    let clip = match &args.animation {
        Some(name) => asset
            .find_animation(name)
            .with_context(|| format!("no animation named '{name}'"))?,
        None => asset
            .animations
            .first()
            .context("model has no animation")?,
    };
    println!("Playing '{}' ({:.2}s) at {}x", clip.name, clip.duration(), args.speed);

    let settings = AnimationSettings {
        playback_speed: args.speed,
        ..Default::default()
    };
    let mut instance = sinew::SkinnedInstance::with_settings(
        std::sync::Arc::clone(&asset.graph),
        &asset.skins,
        settings,
    )?;
    instance.play(clip);

    for frame in 0..args.frames {
        let report = instance.update(FRAME_TIME)?;
        if frame % 30 == 0 {
            info!(
                "frame {frame}: t = {:.3}s, {} channels applied",
                instance.actions()[0].time,
                report.applied
            );
        }
    }

    let skin = &instance.skins()[0];
    println!("Skin '{}' after {} frames:", skin.name(), args.frames);
    for (joint, (&node, matrix)) in skin.joints().iter().zip(skin.joint_matrices()).enumerate() {
        let name = instance.graph().get(node).map_or("?", |n| n.name());
        println!("  [{joint:3}] {name:<24} {}", joint_offset(*matrix, node, &instance));
    }

    Ok(())
}

/// Joint position in skeleton space: the skinning matrix applied to the
/// joint's bind-pose position.
fn joint_offset(matrix: Mat4, node: usize, instance: &sinew::SkinnedInstance) -> Vec3 {
    let bind = instance.skins()[0]
        .initial_global_transforms()
        .get(node)
        .map_or(Vec3::ZERO, |global| global.w_axis.truncate());
    matrix.transform_point3(bind)
}
