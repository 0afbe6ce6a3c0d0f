//! Animation stages, morph targets and particle time.
//!
//! Nothing is cached here: every call is relayed to the node's engine-side
//! state. Times and deltas always come from the caller.

use super::Horde;
use crate::boundary::EngineApi;
use crate::error::Result;
use crate::handle::{NodeHandle, ResourceHandle};
use crate::marshal;

impl<E: EngineApi> Horde<E> {
    /// Binds `animation` to `stage` of a model.
    ///
    /// `mask` names the node whose subtree the stage affects; empty affects
    /// every joint and mesh. Additive stages are added on top of the blend.
    /// Passed a Group node, the engine applies the stage to descendant models.
    pub fn setup_model_anim_stage(
        &mut self,
        model: NodeHandle,
        stage: i32,
        animation: ResourceHandle,
        mask: &str,
        additive: bool,
    ) -> Result<bool> {
        let engine = self.live("setup_model_anim_stage")?;
        let model = model.to_boundary("model")?;
        let stage = marshal::to_uint("stage", stage)?;
        let animation = animation.to_boundary("animation")?;
        let mask = marshal::to_c_string("mask", mask)?;
        Ok(engine.setup_model_anim_stage(model, stage, animation, &mask, additive))
    }

    /// Sets playback `time` (in frames) and blend `weight` of one stage.
    ///
    /// Needed once per active stage per frame. When weights sum past 1,
    /// lower stages take priority.
    pub fn set_model_anim_params(&mut self, model: NodeHandle, stage: i32, time: f32, weight: f32) -> Result<bool> {
        let engine = self.live("set_model_anim_params")?;
        let model = model.to_boundary("model")?;
        let stage = marshal::to_uint("stage", stage)?;
        Ok(engine.set_model_anim_params(model, stage, time, weight))
    }

    /// Sets the weight of a morph target; `target` empty addresses all.
    pub fn set_model_morpher(&mut self, model: NodeHandle, target: &str, weight: f32) -> Result<bool> {
        let engine = self.live("set_model_morpher")?;
        let model = model.to_boundary("model")?;
        let target = marshal::to_c_string("target", target)?;
        Ok(engine.set_model_morpher(model, &target, weight))
    }

    /// Advances the emitter's simulation by `delta_seconds`.
    pub fn advance_emitter_time(&mut self, emitter: NodeHandle, delta_seconds: f32) -> Result<bool> {
        let engine = self.live("advance_emitter_time")?;
        let emitter = emitter.to_boundary("emitter")?;
        Ok(engine.advance_emitter_time(emitter, delta_seconds))
    }
}
