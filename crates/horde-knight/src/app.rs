use std::path::Path;

use anyhow::{Context, Result, bail};
use glam::{Vec2, Vec3};

use horde_engine::logging::forward_engine_messages;
use horde_engine::{
    EngineApi, EngineOption, Horde, HordeConfig, LightParam, NodeHandle, Overlay, ResourceFlags,
    ResourceHandle, ResourcePaths, ResourceType, Transform, Utils, UtilsApi,
};

use crate::clock::FrameTime;

/// Control directive returned by the frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Engine configuration the knight scene expects.
pub fn knight_config(pipeline: &Path) -> HordeConfig {
    HordeConfig {
        resource_paths: ResourcePaths::new()
            .with(ResourceType::SceneGraph, "models")
            .with(ResourceType::Geometry, "models")
            .with(ResourceType::Animation, "models")
            .with(ResourceType::Material, "materials")
            .with(ResourceType::Code, "shaders")
            .with(ResourceType::Shader, "shaders")
            .with(ResourceType::Texture2D, "textures")
            .with(ResourceType::TextureCube, "textures")
            .with(ResourceType::Effect, "effects"),
        pipeline_config: Some(pipeline.to_path_buf()),
        options: vec![
            (EngineOption::LoadTextures, 1.0),
            (EngineOption::TexCompression, 0.0),
            (EngineOption::FastAnimation, 0.0),
            (EngineOption::AnisotropyFactor, 8.0),
            (EngineOption::ShadowMapSize, 2048.0),
        ],
        ..HordeConfig::default()
    }
}

#[derive(Debug, Clone)]
pub struct KnightSettings {
    pub content_dir: String,
    pub show_fps: bool,
    pub debug_view: bool,
    /// Blend weight of the first animation stage; the second gets the rest.
    pub weight: f32,
    pub frame_limit: Option<u64>,
}

impl Default for KnightSettings {
    fn default() -> Self {
        Self {
            content_dir: "content".to_owned(),
            show_fps: false,
            debug_view: false,
            weight: 1.0,
            frame_limit: None,
        }
    }
}

/// The knight scene: an animated model blending two clips, with a particle
/// system attached to its right hand.
pub struct KnightApp {
    settings: KnightSettings,

    font_mat: ResourceHandle,
    logo_mat: ResourceHandle,
    knight: NodeHandle,
    particle_sys: NodeHandle,

    viewer: Transform,
    anim_time: f32,
    fps_timer: f32,
    fps_text: String,
}

impl KnightApp {
    /// Loads resources and builds the scene. Engine paths and options must
    /// already be applied.
    pub fn setup<E: EngineApi, U: UtilsApi>(
        horde: &mut Horde<E>,
        utils: &mut Utils<U>,
        settings: KnightSettings,
    ) -> Result<Self> {
        let none = ResourceFlags::empty();
        let font_mat = horde.add_resource(ResourceType::Material, "font.material.xml", none)?;
        let logo_mat = horde.add_resource(ResourceType::Material, "logo.material.xml", none)?;
        let env_res = horde.add_resource(ResourceType::SceneGraph, "scene.scene.xml", none)?;
        let knight_res = horde.add_resource(ResourceType::SceneGraph, "knight.scene.xml", none)?;
        let order_anim = horde.add_resource(ResourceType::Animation, "knight_order.anim", none)?;
        let attack_anim = horde.add_resource(ResourceType::Animation, "knight_attack.anim", none)?;
        let particle_res = horde.add_resource(ResourceType::SceneGraph, "particleSys1.scene.xml", none)?;

        if !utils
            .load_resources_from_disk(&settings.content_dir)
            .context("loading knight resources")?
        {
            log::warn!("some resources in {} failed to load", settings.content_dir);
        }

        horde.add_nodes(NodeHandle::ROOT, env_res)?;

        let knight = horde.add_nodes(NodeHandle::ROOT, knight_res)?;
        if knight.is_none() {
            utils.dump_messages();
            bail!("knight.scene.xml could not be instantiated");
        }
        horde.set_node_transform(
            knight,
            &Transform::new(Vec3::ZERO, Vec3::new(0.0, 180.0, 0.0), Vec3::splat(0.1)),
        )?;
        horde.setup_model_anim_stage(knight, 0, order_anim, "", false)?;
        horde.setup_model_anim_stage(knight, 1, attack_anim, "", false)?;

        let hand = horde.node_child(knight, "Bip01_R_Hand", 0, true)?;
        if hand.is_none() {
            log::warn!("knight has no Bip01_R_Hand joint; particles attach to the root");
        }
        let particle_sys = horde.add_nodes(if hand.is_none() { NodeHandle::ROOT } else { hand }, particle_res)?;
        horde.set_node_transform(
            particle_sys,
            &Transform::new(Vec3::new(0.0, 40.0, 0.0), Vec3::new(90.0, 0.0, 0.0), Vec3::ONE),
        )?;

        let light = horde.add_light_node(
            NodeHandle::ROOT,
            "Light1",
            ResourceHandle::NONE,
            Some("LIGHTING"),
            Some("SHADOWMAP"),
        )?;
        horde.set_node_transform(
            light,
            &Transform::new(Vec3::new(0.0, 1.0, 15.0), Vec3::new(30.0, 0.0, 0.0), Vec3::ONE),
        )?;
        for (param, value) in [
            (LightParam::Radius, 30.0),
            (LightParam::Fov, 90.0),
            (LightParam::ShadowMapCount, 1.0),
            (LightParam::ShadowMapBias, 0.01),
            (LightParam::ColR, 1.0),
            (LightParam::ColG, 0.7),
            (LightParam::ColB, 0.7),
        ] {
            horde.set_light_param(light, param, value)?;
        }

        // hdrParams: exposure, bright-pass threshold, bright-pass offset.
        let hdr = horde.find_resource(ResourceType::Material, "postHDR.material.xml")?;
        if !horde.set_material_uniform(hdr, "hdrParams", 2.5, 0.6, 0.06, 0.0)? {
            log::debug!("postHDR material not available; HDR parameters left at defaults");
        }

        log::info!("knight scene ready ({knight}, particles {particle_sys})");

        Ok(Self {
            settings,
            font_mat,
            logo_mat,
            knight,
            particle_sys,
            viewer: Transform::new(Vec3::new(5.0, 3.0, 19.0), Vec3::new(7.0, 15.0, 0.0), Vec3::ONE),
            anim_time: 0.0,
            fps_timer: 0.0,
            fps_text: String::new(),
        })
    }

    /// Resizes the viewport and the default camera's frustum.
    pub fn resize<E: EngineApi>(&self, horde: &mut Horde<E>, width: i32, height: i32) -> Result<()> {
        horde.resize(0, 0, width, height)?;
        let aspect = width as f32 / height.max(1) as f32;
        horde.setup_camera_view(NodeHandle::DEFAULT_CAMERA, 45.0, aspect, 0.1, 1000.0)?;
        Ok(())
    }

    /// Advances the scene by `ft.dt` and renders one frame.
    pub fn frame<E: EngineApi, U: UtilsApi>(
        &mut self,
        horde: &mut Horde<E>,
        utils: &mut Utils<U>,
        ft: FrameTime,
    ) -> Result<AppControl> {
        let weight = self.settings.weight;
        self.anim_time += ft.dt;
        self.fps_timer += ft.dt;

        horde.set_option(EngineOption::DebugViewMode, if self.settings.debug_view { 1.0 } else { 0.0 })?;

        // Clips are authored at 24 frames per second.
        horde.set_model_anim_params(self.knight, 0, self.anim_time * 24.0, weight)?;
        horde.set_model_anim_params(self.knight, 1, self.anim_time * 24.0, 1.0 - weight)?;
        horde.advance_emitter_time(self.particle_sys, ft.dt)?;

        horde.set_node_transform(NodeHandle::DEFAULT_CAMERA, &self.viewer)?;

        if self.settings.show_fps {
            if self.fps_timer > 0.3 || self.fps_text.is_empty() {
                self.fps_text = format!("FPS: {:.2}", ft.fps());
                self.fps_timer = 0.0;
            }
            utils.show_text(&self.fps_text, 0.0, 0.95, 0.03, 0, self.font_mat)?;
            utils.show_text(&format!("Weight: {weight:.2}"), 0.0, 0.91, 0.03, 0, self.font_mat)?;
        }

        horde.show_overlay(&logo_overlay(), 7, self.logo_mat)?;
        horde.render()?;
        forward_engine_messages(horde)?;

        match self.settings.frame_limit {
            Some(limit) if ft.frame_index + 1 >= limit => Ok(AppControl::Exit),
            _ => Ok(AppControl::Continue),
        }
    }
}

/// Logo in the lower-right corner of the viewport.
fn logo_overlay() -> Overlay {
    Overlay::rect(Vec2::new(0.75, 0.0), Vec2::new(1.0, 0.2))
}
