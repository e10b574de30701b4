//! Asset Loading Tests
//!
//! Tests for:
//! - glTF node hierarchy import (names, children, TRS)
//! - Skin import with inverse bind matrices
//! - Animation channel import and clip construction
//! - Instantiating an imported asset

#![cfg(feature = "gltf")]

use std::f32::consts::FRAC_PI_2;

use anyhow::Context;
use glam::{Mat4, Quat, Vec3};

use sinew::animation::{ChannelData, TargetPath};
use sinew::assets::{AssetError, GltfLoader};

const EPSILON: f32 = 1e-5;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two-joint leg with one skin and a "bend" clip (STEP rotation + LINEAR
/// translation on the knee). Buffer layout:
/// - 0..128: inverse bind matrices (identity, translate(0, -1, 0))
/// - 128..136: times [0, 1]
/// - 136..168: rotations [identity, quarter turn around Z]
/// - 168..192: translations [(0, 1, 0), (0, 3, 0)]
const LEG_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [
    { "name": "hip", "children": [1] },
    { "name": "knee", "translation": [0.0, 1.0, 0.0] }
  ],
  "skins": [{ "name": "leg", "joints": [0, 1], "inverseBindMatrices": 0 }],
  "animations": [{
    "name": "bend",
    "samplers": [
      { "input": 1, "output": 2, "interpolation": "STEP" },
      { "input": 1, "output": 3, "interpolation": "LINEAR" }
    ],
    "channels": [
      { "sampler": 0, "target": { "node": 1, "path": "rotation" } },
      { "sampler": 1, "target": { "node": 1, "path": "translation" } }
    ]
  }],
  "buffers": [{
    "byteLength": 192,
    "uri": "data:application/octet-stream;base64,AACAPwAAAAAAAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAAAAAACAPwAAgD8AAAAAAAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAIC/AAAAAAAAgD8AAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAPMENT/zBDU/AAAAAAAAgD8AAAAAAAAAAAAAQEAAAAAA"
  }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 128 },
    { "buffer": 0, "byteOffset": 128, "byteLength": 8 },
    { "buffer": 0, "byteOffset": 136, "byteLength": 32 },
    { "buffer": 0, "byteOffset": 168, "byteLength": 24 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 2, "type": "MAT4" },
    { "bufferView": 1, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.0] },
    { "bufferView": 2, "componentType": 5126, "count": 2, "type": "VEC4" },
    { "bufferView": 3, "componentType": 5126, "count": 2, "type": "VEC3" }
  ]
}"#;

// ============================================================================
// Import
// ============================================================================

#[test]
fn gltf_nodes_keep_indices_and_hierarchy() {
    let asset = GltfLoader::from_slice(LEG_GLTF.as_bytes()).unwrap();
    let graph = &asset.graph;

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.find_by_name("hip"), Some(0));
    assert_eq!(graph.find_by_name("knee"), Some(1));
    assert_eq!(graph.get(0).unwrap().children(), &[1]);
    assert_eq!(graph.get(1).unwrap().parent(), Some(0));

    let (translation, _, _) = graph.get(1).unwrap().transform.to_trs();
    assert!(translation.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPSILON));
}

#[test]
fn gltf_skin_reads_inverse_bind_matrices() -> anyhow::Result<()> {
    init_logging();
    let asset = GltfLoader::from_slice(LEG_GLTF.as_bytes())?;

    assert_eq!(asset.skins.len(), 1);
    let skin = &asset.skins[0];
    assert_eq!(skin.name, "leg");
    assert_eq!(skin.joints(), &[0, 1]);
    assert_eq!(skin.inverse_bind_matrices()[0], Mat4::IDENTITY);
    assert!(
        skin.inverse_bind_matrices()[1]
            .abs_diff_eq(Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0)), EPSILON)
    );
    Ok(())
}

#[test]
fn gltf_animation_becomes_clip() -> anyhow::Result<()> {
    init_logging();
    let asset = GltfLoader::from_slice(LEG_GLTF.as_bytes())?;

    let clip = asset.find_animation("bend").context("clip 'bend'")?;
    assert_eq!(clip.len(), 2);
    assert!((clip.duration() - 1.0).abs() < EPSILON);

    let rotation = &clip.channels()[0];
    assert_eq!(rotation.target_node, 1);
    assert_eq!(rotation.target_path(), TargetPath::Rotation);
    let ChannelData::Rotation(track) = &rotation.data else {
        panic!("expected a rotation track");
    };
    assert!(track.values()[1].abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2), 1e-4));

    assert_eq!(clip.channels()[1].target_path(), TargetPath::Translation);
    Ok(())
}

#[test]
fn imported_asset_instantiates_at_bind_pose() -> anyhow::Result<()> {
    init_logging();
    let asset = GltfLoader::from_slice(LEG_GLTF.as_bytes())?;
    let mut instance = asset.instantiate()?;
    instance.play(&asset.animations[0]);

    instance.evaluate_at(0.5)?;

    for matrix in instance.joint_matrices(0).context("skin 0")? {
        assert!(matrix.abs_diff_eq(Mat4::IDENTITY, EPSILON), "got {matrix}");
    }
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn malformed_document_is_reported() {
    let result = GltfLoader::from_slice(b"{ not json");

    assert!(matches!(result, Err(AssetError::Gltf(_))));
}

#[test]
fn missing_file_is_reported() {
    let result = GltfLoader::load("does/not/exist.gltf");

    assert!(result.is_err());
}
