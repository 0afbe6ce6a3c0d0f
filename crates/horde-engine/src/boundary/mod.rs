//! The native call surface.
//!
//! [`EngineApi`] and [`UtilsApi`] mirror the flat C ABI of the engine and its
//! utility library one method per exported function: unsigned 32-bit handles,
//! `c_int` enum codes, NUL-terminated strings and raw pointers to
//! engine-owned memory. Everything above this module talks to the engine only
//! through these traits, so a session can run against the real libraries
//! ([`native`]) or a substitute.
//!
//! Implementations must not add validation of their own; the façade has
//! already applied every local check by the time a method is called.

pub mod native;

use std::ffi::{CStr, c_void};
use std::os::raw::{c_char, c_int};

pub use native::{NativeConfig, NativeEngine, NativeUtils};

/// Out-parameters of `getMeshData`.
///
/// Pointers reference engine memory that is only valid until the next engine
/// call; they must be copied before the wrapper returns.
#[derive(Debug, Copy, Clone)]
pub struct RawMeshData {
    /// Number of `f32` values (three per vertex).
    pub vert_pos_count: u32,
    pub vert_pos_data: *const f32,
    pub index_count: u32,
    pub index_data: *const u32,
    pub index_offset: u32,
}

impl Default for RawMeshData {
    fn default() -> Self {
        Self {
            vert_pos_count: 0,
            vert_pos_data: std::ptr::null(),
            index_count: 0,
            index_data: std::ptr::null(),
            index_offset: 0,
        }
    }
}

/// Engine library entry points.
pub trait EngineApi {
    // --- Basic ---
    fn get_version_string(&mut self) -> *const c_char;
    fn init(&mut self) -> bool;
    fn release(&mut self);
    fn resize(&mut self, x: c_int, y: c_int, width: c_int, height: c_int);
    fn render(&mut self);
    fn clear(&mut self);
    fn load_pipeline_config(&mut self, filename: &CStr) -> bool;

    // --- General ---
    fn get_message(&mut self, level: &mut u32, time: &mut f32) -> *const c_char;
    fn get_active_camera(&mut self) -> u32;
    fn set_active_camera(&mut self, cam_node: u32) -> bool;
    fn get_option(&mut self, param: c_int) -> f32;
    fn set_option(&mut self, param: c_int, value: f32) -> bool;
    /// `corners` holds `x, y, u, v` for lower-left, lower-right, upper-right
    /// and upper-left, in that order.
    fn show_overlay(&mut self, corners: &[f32; 16], layer: u32, material: u32);

    // --- Resources ---
    fn get_resource_type(&mut self, res: u32) -> c_int;
    fn find_resource(&mut self, ty: c_int, name: &CStr) -> u32;
    fn add_resource(&mut self, ty: c_int, name: &CStr, flags: u32) -> u32;
    fn remove_resource(&mut self, res: u32) -> bool;
    /// `data` is the full transfer buffer (`size + 1` bytes, zero-terminated).
    fn load_resource(&mut self, name: &CStr, data: &[u8], size: u32) -> bool;
    fn unload_resource(&mut self, res: u32) -> bool;
    fn get_resource_data(&mut self, res: u32, param: c_int) -> *const c_void;
    /// `data` is the full transfer buffer (`size + 1` bytes, zero-terminated).
    fn update_resource_data(&mut self, res: u32, param: c_int, data: &[u8], size: u32) -> bool;
    fn query_unloaded_resource(&mut self) -> *const c_char;
    fn get_resource_path(&mut self, ty: c_int) -> *const c_char;
    fn set_resource_path(&mut self, ty: c_int, path: &CStr);
    fn release_unused_resources(&mut self);
    fn set_material_uniform(&mut self, mat_res: u32, name: &CStr, a: f32, b: f32, c: f32, d: f32) -> bool;

    // --- Scene graph ---
    fn get_node_type(&mut self, node: u32) -> c_int;
    fn get_node_name(&mut self, node: u32) -> *const c_char;
    fn set_node_name(&mut self, node: u32, name: &CStr) -> bool;
    fn get_node_parent(&mut self, node: u32) -> u32;
    fn get_node_child(&mut self, parent: u32, name: &CStr, index: u32, recursive: bool) -> u32;
    fn add_nodes(&mut self, parent: u32, res: u32) -> u32;
    fn remove_node(&mut self, node: u32) -> bool;
    fn set_node_activation(&mut self, node: u32, active: bool) -> bool;
    /// `out` receives `px, py, pz, rx, ry, rz, sx, sy, sz`.
    fn get_node_transform(&mut self, node: u32, out: &mut [f32; 9]) -> bool;
    fn set_node_transform(&mut self, node: u32, components: &[f32; 9]) -> bool;
    fn get_node_transform_matrices(
        &mut self,
        node: u32,
        rel_mat: &mut *const f32,
        abs_mat: &mut *const f32,
    ) -> bool;
    fn set_node_transform_matrix(&mut self, node: u32, mat4x4: &[f32; 16]) -> bool;
    /// `out` receives `min x, y, z, max x, y, z`.
    fn get_node_aabb(&mut self, node: u32, out: &mut [f32; 6]) -> bool;
    fn cast_ray(&mut self, node: u32, origin: [f32; 3], direction: [f32; 3]) -> u32;

    // --- Group ---
    fn add_group_node(&mut self, parent: u32, name: &CStr) -> u32;
    fn get_group_param(&mut self, node: u32, param: c_int) -> f32;
    fn set_group_param(&mut self, node: u32, param: c_int, value: f32) -> bool;

    // --- Model ---
    fn add_model_node(&mut self, parent: u32, name: &CStr, geo_res: u32) -> u32;
    fn setup_model_anim_stage(&mut self, node: u32, stage: u32, res: u32, anim_mask: &CStr, additive: bool) -> bool;
    fn set_model_anim_params(&mut self, node: u32, stage: u32, time: f32, weight: f32) -> bool;
    fn set_model_morpher(&mut self, node: u32, target: &CStr, weight: f32) -> bool;

    // --- Mesh ---
    #[allow(clippy::too_many_arguments)]
    fn add_mesh_node(
        &mut self,
        parent: u32,
        name: &CStr,
        mat_res: u32,
        batch_start: u32,
        batch_count: u32,
        vert_r_start: u32,
        vert_r_end: u32,
    ) -> u32;
    fn get_mesh_param(&mut self, node: u32, param: c_int) -> f32;
    fn set_mesh_param(&mut self, node: u32, param: c_int, value: f32) -> bool;
    fn get_mesh_data(&mut self, node: u32, out: &mut RawMeshData) -> bool;
    #[allow(clippy::too_many_arguments)]
    fn set_mesh_uniform(&mut self, node: u32, name: &CStr, a: f32, b: f32, c: f32, d: f32, recursive: bool) -> bool;

    // --- Joint ---
    fn add_joint_node(&mut self, parent: u32, name: &CStr, joint_index: u32) -> u32;

    // --- Light ---
    fn add_light_node(
        &mut self,
        parent: u32,
        name: &CStr,
        material_res: u32,
        lighting_context: Option<&CStr>,
        shadow_context: Option<&CStr>,
    ) -> u32;
    fn get_light_param(&mut self, node: u32, param: c_int) -> f32;
    fn set_light_param(&mut self, node: u32, param: c_int, value: f32) -> bool;
    fn set_light_contexts(&mut self, node: u32, lighting_context: &CStr, shadow_context: &CStr) -> bool;

    // --- Camera ---
    fn add_camera_node(&mut self, parent: u32, name: &CStr) -> u32;
    fn get_camera_param(&mut self, node: u32, param: c_int) -> f32;
    fn set_camera_param(&mut self, node: u32, param: c_int, value: f32) -> bool;
    fn setup_camera_view(&mut self, node: u32, fov: f32, aspect: f32, near_dist: f32, far_dist: f32) -> bool;
    fn calc_camera_projection_matrix(&mut self, node: u32, proj_mat: &mut [f32; 16]) -> bool;

    // --- Emitter ---
    fn add_emitter_node(
        &mut self,
        parent: u32,
        name: &CStr,
        mat_res: u32,
        effect_res: u32,
        max_particle_count: u32,
        respawn_count: c_int,
    ) -> u32;
    fn get_emitter_param(&mut self, node: u32, param: c_int) -> f32;
    fn set_emitter_param(&mut self, node: u32, param: c_int, value: f32) -> bool;
    fn advance_emitter_time(&mut self, node: u32, time_delta: f32) -> bool;
}

/// Utility library entry points.
pub trait UtilsApi {
    fn init_opengl(&mut self, device_context: c_int) -> bool;
    fn release_opengl(&mut self);
    fn swap_buffers(&mut self);
    fn load_resources_from_disk(&mut self, content_dir: &CStr) -> bool;
    fn dump_messages(&mut self) -> bool;
    fn show_text(&mut self, text: &CStr, x: f32, y: f32, size: f32, layer: u32, font_mat_res: u32);
    /// On success `out_data`/`out_size` describe an engine-allocated image.
    fn create_tga_image(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        bpp: u32,
        out_data: &mut *const u8,
        out_size: &mut u32,
    ) -> bool;
    fn pick_node(&mut self, nwx: f32, nwy: f32) -> u32;
}
