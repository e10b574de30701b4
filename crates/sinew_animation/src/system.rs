//! Animation system.
//!
//! [`SkinnedInstance`] is one animated entity. It owns a working copy of a
//! shared template graph, the bound skin states and the playback actions,
//! and runs the whole per-frame pass:
//!
//! ```text
//! actions (time) -> evaluator -> resolver (locals, globals) -> skinning updater
//! ```
//!
//! Instances never share mutable state: the template is read-only behind an
//! `Arc`, so independent instances can be updated on different threads.
//! A single instance is updated sequentially.

use std::sync::Arc;

use glam::Mat4;
use sinew_core::Result;
use sinew_scene::{
    GlobalTransforms, SceneGraph, Skin, SkinState, TraversalScratch, bind_skin,
    compute_global_transforms_into, compute_local_transforms_into,
};

use crate::action::AnimationAction;
use crate::binder::Binder;
use crate::clip::AnimationClip;
use crate::evaluator::EvaluationReport;
use crate::settings::AnimationSettings;

#[derive(Debug, Clone)]
pub struct SkinnedInstance {
    template: Arc<SceneGraph>,
    graph: SceneGraph,
    skins: Vec<SkinState>,
    actions: Vec<AnimationAction>,
    settings: AnimationSettings,

    // Per-frame scratch buffers, reused across frames
    locals: Vec<Mat4>,
    globals: GlobalTransforms,
    scratch: TraversalScratch,
}

impl SkinnedInstance {
    pub fn new(template: Arc<SceneGraph>, skins: &[Skin]) -> Result<Self> {
        Self::with_settings(template, skins, AnimationSettings::default())
    }

    /// Clones the template into a private working graph and binds every skin
    /// against its bind pose.
    pub fn with_settings(
        template: Arc<SceneGraph>,
        skins: &[Skin],
        settings: AnimationSettings,
    ) -> Result<Self> {
        let graph = (*template).clone();
        let skins = skins
            .iter()
            .map(|skin| bind_skin(&graph, skin))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            template,
            graph,
            skins,
            actions: Vec::new(),
            settings,
            locals: Vec::new(),
            globals: GlobalTransforms::new(),
            scratch: TraversalScratch::new(),
        })
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Starts playing `clip` with the instance settings and returns the
    /// action index. Channels targeting missing nodes are dropped up front.
    pub fn play(&mut self, clip: &AnimationClip) -> usize {
        let clip = Arc::new(Binder::retain_valid(clip, &self.graph));
        self.add_action(AnimationAction::with_settings(clip, &self.settings))
    }

    pub fn add_action(&mut self, action: AnimationAction) -> usize {
        self.actions.push(action);
        self.actions.len() - 1
    }

    /// Advances every action by `dt` seconds and recomputes the skins.
    pub fn update(&mut self, dt: f32) -> Result<EvaluationReport> {
        let mut report = EvaluationReport::default();
        for action in &mut self.actions {
            action.update(dt);
            let applied = action.apply(&mut self.graph);
            report.applied += applied.applied;
            report.skipped += applied.skipped;
        }

        self.update_skins()?;
        Ok(report)
    }

    /// Evaluates every enabled action at the explicit `time`.
    pub fn evaluate_at(&mut self, time: f32) -> Result<EvaluationReport> {
        for action in &mut self.actions {
            action.seek(time);
        }
        self.update(0.0)
    }

    /// Resolves the working graph and rewrites the joint matrices of every
    /// skin.
    pub fn update_skins(&mut self) -> Result<()> {
        for skin in &mut self.skins {
            let root = skin.root();
            compute_local_transforms_into(&self.graph, root, &mut self.locals, &mut self.scratch)?;
            compute_global_transforms_into(
                &self.graph,
                &self.locals,
                root,
                Mat4::IDENTITY,
                &mut self.globals,
                &mut self.scratch,
            )?;
            skin.update(&self.globals)?;
        }
        Ok(())
    }

    /// Restores the template transforms, the bind-pose joint matrices and
    /// rewinds every action.
    pub fn reset_to_bind_pose(&mut self) {
        self.graph.reset_transforms_from(&self.template);
        for skin in &mut self.skins {
            skin.reset_to_bind_pose();
        }
        for action in &mut self.actions {
            action.reset();
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn template(&self) -> &Arc<SceneGraph> {
        &self.template
    }

    /// The working graph carrying this instance's animated transforms.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[must_use]
    pub fn skins(&self) -> &[SkinState] {
        &self.skins
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut [AnimationAction] {
        &mut self.actions
    }

    /// Joint matrices of skin `index`, in skin-declared joint order.
    #[must_use]
    pub fn joint_matrices(&self, index: usize) -> Option<&[Mat4]> {
        self.skins.get(index).map(SkinState::joint_matrices)
    }
}
