//! Boundary implementations backed by the engine's shared libraries.
//!
//! Every exported function is resolved once at load time, so a library that
//! lacks a symbol fails in `load` rather than in the middle of a frame.

use std::ffi::{CStr, c_void};
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

use libloading::Library;

use super::{EngineApi, RawMeshData, UtilsApi};
use crate::error::{Error, Result};

/// Locations of the native libraries.
#[derive(Debug, Clone)]
pub struct NativeConfig {
    pub engine_library: PathBuf,
    pub utils_library: PathBuf,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            engine_library: PathBuf::from(libloading::library_filename("Horde3D")),
            utils_library: PathBuf::from(libloading::library_filename("Horde3DUtils")),
        }
    }
}

/// Engine state is process-wide, so at most one `NativeEngine` may exist.
static ENGINE_LOADED: AtomicBool = AtomicBool::new(false);

macro_rules! symbol_table {
    (
        $table:ident {
            $( $field:ident = $sym:literal : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?; )+
        }
    ) => {
        struct $table {
            $( $field: unsafe extern "C" fn($($arg),*) $(-> $ret)?, )+
        }

        impl $table {
            /// # Safety
            /// The declared signatures must match the library's exports.
            unsafe fn resolve(lib: &Library) -> Result<Self> {
                Ok(Self {
                    $(
                        $field: unsafe {
                            *lib.get::<unsafe extern "C" fn($($arg),*) $(-> $ret)?>(
                                concat!($sym, "\0").as_bytes(),
                            )
                            .map_err(|e| Error::Library(format!("missing symbol `{}`: {e}", $sym)))?
                        },
                    )+
                })
            }
        }
    };
}

symbol_table! {
    EngineFns {
        get_version_string = "getVersionString": fn() -> *const c_char;
        init = "init": fn() -> bool;
        release = "release": fn();
        resize = "resize": fn(c_int, c_int, c_int, c_int);
        render = "render": fn();
        clear = "clear": fn();
        load_pipeline_config = "loadPipelineConfig": fn(*const c_char) -> bool;

        get_message = "getMessage": fn(*mut u32, *mut f32) -> *const c_char;
        get_active_camera = "getActiveCamera": fn() -> u32;
        set_active_camera = "setActiveCamera": fn(u32) -> bool;
        get_option = "getOption": fn(c_int) -> f32;
        set_option = "setOption": fn(c_int, f32) -> bool;
        show_overlay = "showOverlay": fn(
            f32, f32, f32, f32, f32, f32, f32, f32,
            f32, f32, f32, f32, f32, f32, f32, f32,
            u32, u32,
        );

        get_resource_type = "getResourceType": fn(u32) -> c_int;
        find_resource = "findResource": fn(c_int, *const c_char) -> u32;
        add_resource = "addResource": fn(c_int, *const c_char, u32) -> u32;
        remove_resource = "removeResource": fn(u32) -> bool;
        load_resource = "loadResource": fn(*const c_char, *const c_void, u32) -> bool;
        unload_resource = "unloadResource": fn(u32) -> bool;
        get_resource_data = "getResourceData": fn(u32, c_int) -> *const c_void;
        update_resource_data = "updateResourceData": fn(u32, c_int, *const c_void, u32) -> bool;
        query_unloaded_resource = "queryUnloadedResource": fn() -> *const c_char;
        get_resource_path = "getResourcePath": fn(c_int) -> *const c_char;
        set_resource_path = "setResourcePath": fn(c_int, *const c_char);
        release_unused_resources = "releaseUnusedResources": fn();
        set_material_uniform = "setMaterialUniform": fn(u32, *const c_char, f32, f32, f32, f32) -> bool;

        get_node_type = "getNodeType": fn(u32) -> c_int;
        get_node_name = "getNodeName": fn(u32) -> *const c_char;
        set_node_name = "setNodeName": fn(u32, *const c_char) -> bool;
        get_node_parent = "getNodeParent": fn(u32) -> u32;
        get_node_child = "getNodeChild": fn(u32, *const c_char, u32, bool) -> u32;
        add_nodes = "addNodes": fn(u32, u32) -> u32;
        remove_node = "removeNode": fn(u32) -> bool;
        set_node_activation = "setNodeActivation": fn(u32, bool) -> bool;
        get_node_transform = "getNodeTransform": fn(
            u32,
            *mut f32, *mut f32, *mut f32,
            *mut f32, *mut f32, *mut f32,
            *mut f32, *mut f32, *mut f32,
        ) -> bool;
        set_node_transform = "setNodeTransform": fn(
            u32, f32, f32, f32, f32, f32, f32, f32, f32, f32,
        ) -> bool;
        get_node_transform_matrices = "getNodeTransformMatrices": fn(u32, *mut *const f32, *mut *const f32) -> bool;
        set_node_transform_matrix = "setNodeTransformMatrix": fn(u32, *const f32) -> bool;
        get_node_aabb = "getNodeAABB": fn(
            u32, *mut f32, *mut f32, *mut f32, *mut f32, *mut f32, *mut f32,
        ) -> bool;
        cast_ray = "castRay": fn(u32, f32, f32, f32, f32, f32, f32) -> u32;

        add_group_node = "addGroupNode": fn(u32, *const c_char) -> u32;
        get_group_param = "getGroupParam": fn(u32, c_int) -> f32;
        set_group_param = "setGroupParam": fn(u32, c_int, f32) -> bool;

        add_model_node = "addModelNode": fn(u32, *const c_char, u32) -> u32;
        setup_model_anim_stage = "setupModelAnimStage": fn(u32, u32, u32, *const c_char, bool) -> bool;
        set_model_anim_params = "setModelAnimParams": fn(u32, u32, f32, f32) -> bool;
        set_model_morpher = "setModelMorpher": fn(u32, *const c_char, f32) -> bool;

        add_mesh_node = "addMeshNode": fn(u32, *const c_char, u32, u32, u32, u32, u32) -> u32;
        get_mesh_param = "getMeshParam": fn(u32, c_int) -> f32;
        set_mesh_param = "setMeshParam": fn(u32, c_int, f32) -> bool;
        get_mesh_data = "getMeshData": fn(
            u32, *mut u32, *mut *const f32, *mut u32, *mut *const u32, *mut u32,
        ) -> bool;
        set_mesh_uniform = "setMeshUniform": fn(u32, *const c_char, f32, f32, f32, f32, bool) -> bool;

        add_joint_node = "addJointNode": fn(u32, *const c_char, u32) -> u32;

        add_light_node = "addLightNode": fn(u32, *const c_char, u32, *const c_char, *const c_char) -> u32;
        get_light_param = "getLightParam": fn(u32, c_int) -> f32;
        set_light_param = "setLightParam": fn(u32, c_int, f32) -> bool;
        set_light_contexts = "setLightContexts": fn(u32, *const c_char, *const c_char) -> bool;

        add_camera_node = "addCameraNode": fn(u32, *const c_char) -> u32;
        get_camera_param = "getCameraParam": fn(u32, c_int) -> f32;
        set_camera_param = "setCameraParam": fn(u32, c_int, f32) -> bool;
        setup_camera_view = "setupCameraView": fn(u32, f32, f32, f32, f32) -> bool;
        calc_camera_projection_matrix = "calcCameraProjectionMatrix": fn(u32, *mut f32) -> bool;

        add_emitter_node = "addEmitterNode": fn(u32, *const c_char, u32, u32, u32, c_int) -> u32;
        get_emitter_param = "getEmitterParam": fn(u32, c_int) -> f32;
        set_emitter_param = "setEmitterParam": fn(u32, c_int, f32) -> bool;
        advance_emitter_time = "advanceEmitterTime": fn(u32, f32) -> bool;
    }
}

symbol_table! {
    UtilsFns {
        init_opengl = "initOpenGL": fn(c_int) -> bool;
        release_opengl = "releaseOpenGL": fn();
        swap_buffers = "swapBuffers": fn();
        load_resources_from_disk = "loadResourcesFromDisk": fn(*const c_char) -> bool;
        dump_messages = "dumpMessages": fn() -> bool;
        show_text = "showText": fn(*const c_char, f32, f32, f32, u32, u32);
        create_tga_image = "createTGAImage": fn(*const u8, u32, u32, u32, *mut *const u8, *mut u32) -> bool;
        pick_node = "pickNode": fn(f32, f32) -> u32;
    }
}

fn open(path: &Path) -> Result<Library> {
    log::debug!("loading native library {}", path.display());
    // SAFETY: loading runs the library's initializers; the engine libraries
    // have no initialization side effects beyond static construction.
    unsafe { Library::new(path) }
        .map_err(|e| Error::Library(format!("failed to load {}: {e}", path.display())))
}

fn opt_ptr(text: Option<&CStr>) -> *const c_char {
    text.map_or(ptr::null(), CStr::as_ptr)
}

/// [`EngineApi`] over the engine shared library.
///
/// Not `Send`: the engine and its GL context belong to the creating thread.
pub struct NativeEngine {
    fns: EngineFns,
    _lib: Library,
    _thread_bound: PhantomData<*mut ()>,
}

impl NativeEngine {
    /// Loads the engine library and resolves its exports.
    pub fn load(config: &NativeConfig) -> Result<Self> {
        if ENGINE_LOADED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::Library("the engine library is already loaded in this process".into()));
        }

        let loaded = open(&config.engine_library).and_then(|lib| {
            // SAFETY: signatures above follow the engine's exported C API.
            let fns = unsafe { EngineFns::resolve(&lib) }?;
            Ok(Self { fns, _lib: lib, _thread_bound: PhantomData })
        });

        if loaded.is_err() {
            ENGINE_LOADED.store(false, Ordering::Release);
        }
        loaded
    }
}

impl Drop for NativeEngine {
    fn drop(&mut self) {
        ENGINE_LOADED.store(false, Ordering::Release);
    }
}

// SAFETY (all methods): pointers passed are derived from live references for
// the duration of the call; the function table was resolved from `_lib`,
// which outlives it.
impl EngineApi for NativeEngine {
    fn get_version_string(&mut self) -> *const c_char {
        unsafe { (self.fns.get_version_string)() }
    }

    fn init(&mut self) -> bool {
        unsafe { (self.fns.init)() }
    }

    fn release(&mut self) {
        unsafe { (self.fns.release)() }
    }

    fn resize(&mut self, x: c_int, y: c_int, width: c_int, height: c_int) {
        unsafe { (self.fns.resize)(x, y, width, height) }
    }

    fn render(&mut self) {
        unsafe { (self.fns.render)() }
    }

    fn clear(&mut self) {
        unsafe { (self.fns.clear)() }
    }

    fn load_pipeline_config(&mut self, filename: &CStr) -> bool {
        unsafe { (self.fns.load_pipeline_config)(filename.as_ptr()) }
    }

    fn get_message(&mut self, level: &mut u32, time: &mut f32) -> *const c_char {
        unsafe { (self.fns.get_message)(level, time) }
    }

    fn get_active_camera(&mut self) -> u32 {
        unsafe { (self.fns.get_active_camera)() }
    }

    fn set_active_camera(&mut self, cam_node: u32) -> bool {
        unsafe { (self.fns.set_active_camera)(cam_node) }
    }

    fn get_option(&mut self, param: c_int) -> f32 {
        unsafe { (self.fns.get_option)(param) }
    }

    fn set_option(&mut self, param: c_int, value: f32) -> bool {
        unsafe { (self.fns.set_option)(param, value) }
    }

    fn show_overlay(&mut self, c: &[f32; 16], layer: u32, material: u32) {
        unsafe {
            (self.fns.show_overlay)(
                c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7],
                c[8], c[9], c[10], c[11], c[12], c[13], c[14], c[15],
                layer, material,
            )
        }
    }

    fn get_resource_type(&mut self, res: u32) -> c_int {
        unsafe { (self.fns.get_resource_type)(res) }
    }

    fn find_resource(&mut self, ty: c_int, name: &CStr) -> u32 {
        unsafe { (self.fns.find_resource)(ty, name.as_ptr()) }
    }

    fn add_resource(&mut self, ty: c_int, name: &CStr, flags: u32) -> u32 {
        unsafe { (self.fns.add_resource)(ty, name.as_ptr(), flags) }
    }

    fn remove_resource(&mut self, res: u32) -> bool {
        unsafe { (self.fns.remove_resource)(res) }
    }

    fn load_resource(&mut self, name: &CStr, data: &[u8], size: u32) -> bool {
        unsafe { (self.fns.load_resource)(name.as_ptr(), data.as_ptr().cast(), size) }
    }

    fn unload_resource(&mut self, res: u32) -> bool {
        unsafe { (self.fns.unload_resource)(res) }
    }

    fn get_resource_data(&mut self, res: u32, param: c_int) -> *const c_void {
        unsafe { (self.fns.get_resource_data)(res, param) }
    }

    fn update_resource_data(&mut self, res: u32, param: c_int, data: &[u8], size: u32) -> bool {
        unsafe { (self.fns.update_resource_data)(res, param, data.as_ptr().cast(), size) }
    }

    fn query_unloaded_resource(&mut self) -> *const c_char {
        unsafe { (self.fns.query_unloaded_resource)() }
    }

    fn get_resource_path(&mut self, ty: c_int) -> *const c_char {
        unsafe { (self.fns.get_resource_path)(ty) }
    }

    fn set_resource_path(&mut self, ty: c_int, path: &CStr) {
        unsafe { (self.fns.set_resource_path)(ty, path.as_ptr()) }
    }

    fn release_unused_resources(&mut self) {
        unsafe { (self.fns.release_unused_resources)() }
    }

    fn set_material_uniform(&mut self, mat_res: u32, name: &CStr, a: f32, b: f32, c: f32, d: f32) -> bool {
        unsafe { (self.fns.set_material_uniform)(mat_res, name.as_ptr(), a, b, c, d) }
    }

    fn get_node_type(&mut self, node: u32) -> c_int {
        unsafe { (self.fns.get_node_type)(node) }
    }

    fn get_node_name(&mut self, node: u32) -> *const c_char {
        unsafe { (self.fns.get_node_name)(node) }
    }

    fn set_node_name(&mut self, node: u32, name: &CStr) -> bool {
        unsafe { (self.fns.set_node_name)(node, name.as_ptr()) }
    }

    fn get_node_parent(&mut self, node: u32) -> u32 {
        unsafe { (self.fns.get_node_parent)(node) }
    }

    fn get_node_child(&mut self, parent: u32, name: &CStr, index: u32, recursive: bool) -> u32 {
        unsafe { (self.fns.get_node_child)(parent, name.as_ptr(), index, recursive) }
    }

    fn add_nodes(&mut self, parent: u32, res: u32) -> u32 {
        unsafe { (self.fns.add_nodes)(parent, res) }
    }

    fn remove_node(&mut self, node: u32) -> bool {
        unsafe { (self.fns.remove_node)(node) }
    }

    fn set_node_activation(&mut self, node: u32, active: bool) -> bool {
        unsafe { (self.fns.set_node_activation)(node, active) }
    }

    fn get_node_transform(&mut self, node: u32, out: &mut [f32; 9]) -> bool {
        let [px, py, pz, rx, ry, rz, sx, sy, sz] = out;
        unsafe { (self.fns.get_node_transform)(node, px, py, pz, rx, ry, rz, sx, sy, sz) }
    }

    fn set_node_transform(&mut self, node: u32, t: &[f32; 9]) -> bool {
        unsafe { (self.fns.set_node_transform)(node, t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7], t[8]) }
    }

    fn get_node_transform_matrices(&mut self, node: u32, rel_mat: &mut *const f32, abs_mat: &mut *const f32) -> bool {
        unsafe { (self.fns.get_node_transform_matrices)(node, rel_mat, abs_mat) }
    }

    fn set_node_transform_matrix(&mut self, node: u32, mat4x4: &[f32; 16]) -> bool {
        unsafe { (self.fns.set_node_transform_matrix)(node, mat4x4.as_ptr()) }
    }

    fn get_node_aabb(&mut self, node: u32, out: &mut [f32; 6]) -> bool {
        let [min_x, min_y, min_z, max_x, max_y, max_z] = out;
        unsafe { (self.fns.get_node_aabb)(node, min_x, min_y, min_z, max_x, max_y, max_z) }
    }

    fn cast_ray(&mut self, node: u32, o: [f32; 3], d: [f32; 3]) -> u32 {
        unsafe { (self.fns.cast_ray)(node, o[0], o[1], o[2], d[0], d[1], d[2]) }
    }

    fn add_group_node(&mut self, parent: u32, name: &CStr) -> u32 {
        unsafe { (self.fns.add_group_node)(parent, name.as_ptr()) }
    }

    fn get_group_param(&mut self, node: u32, param: c_int) -> f32 {
        unsafe { (self.fns.get_group_param)(node, param) }
    }

    fn set_group_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        unsafe { (self.fns.set_group_param)(node, param, value) }
    }

    fn add_model_node(&mut self, parent: u32, name: &CStr, geo_res: u32) -> u32 {
        unsafe { (self.fns.add_model_node)(parent, name.as_ptr(), geo_res) }
    }

    fn setup_model_anim_stage(&mut self, node: u32, stage: u32, res: u32, anim_mask: &CStr, additive: bool) -> bool {
        unsafe { (self.fns.setup_model_anim_stage)(node, stage, res, anim_mask.as_ptr(), additive) }
    }

    fn set_model_anim_params(&mut self, node: u32, stage: u32, time: f32, weight: f32) -> bool {
        unsafe { (self.fns.set_model_anim_params)(node, stage, time, weight) }
    }

    fn set_model_morpher(&mut self, node: u32, target: &CStr, weight: f32) -> bool {
        unsafe { (self.fns.set_model_morpher)(node, target.as_ptr(), weight) }
    }

    fn add_mesh_node(
        &mut self,
        parent: u32,
        name: &CStr,
        mat_res: u32,
        batch_start: u32,
        batch_count: u32,
        vert_r_start: u32,
        vert_r_end: u32,
    ) -> u32 {
        unsafe {
            (self.fns.add_mesh_node)(parent, name.as_ptr(), mat_res, batch_start, batch_count, vert_r_start, vert_r_end)
        }
    }

    fn get_mesh_param(&mut self, node: u32, param: c_int) -> f32 {
        unsafe { (self.fns.get_mesh_param)(node, param) }
    }

    fn set_mesh_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        unsafe { (self.fns.set_mesh_param)(node, param, value) }
    }

    fn get_mesh_data(&mut self, node: u32, out: &mut RawMeshData) -> bool {
        unsafe {
            (self.fns.get_mesh_data)(
                node,
                &mut out.vert_pos_count,
                &mut out.vert_pos_data,
                &mut out.index_count,
                &mut out.index_data,
                &mut out.index_offset,
            )
        }
    }

    fn set_mesh_uniform(&mut self, node: u32, name: &CStr, a: f32, b: f32, c: f32, d: f32, recursive: bool) -> bool {
        unsafe { (self.fns.set_mesh_uniform)(node, name.as_ptr(), a, b, c, d, recursive) }
    }

    fn add_joint_node(&mut self, parent: u32, name: &CStr, joint_index: u32) -> u32 {
        unsafe { (self.fns.add_joint_node)(parent, name.as_ptr(), joint_index) }
    }

    fn add_light_node(
        &mut self,
        parent: u32,
        name: &CStr,
        material_res: u32,
        lighting_context: Option<&CStr>,
        shadow_context: Option<&CStr>,
    ) -> u32 {
        unsafe {
            (self.fns.add_light_node)(
                parent,
                name.as_ptr(),
                material_res,
                opt_ptr(lighting_context),
                opt_ptr(shadow_context),
            )
        }
    }

    fn get_light_param(&mut self, node: u32, param: c_int) -> f32 {
        unsafe { (self.fns.get_light_param)(node, param) }
    }

    fn set_light_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        unsafe { (self.fns.set_light_param)(node, param, value) }
    }

    fn set_light_contexts(&mut self, node: u32, lighting_context: &CStr, shadow_context: &CStr) -> bool {
        unsafe { (self.fns.set_light_contexts)(node, lighting_context.as_ptr(), shadow_context.as_ptr()) }
    }

    fn add_camera_node(&mut self, parent: u32, name: &CStr) -> u32 {
        unsafe { (self.fns.add_camera_node)(parent, name.as_ptr()) }
    }

    fn get_camera_param(&mut self, node: u32, param: c_int) -> f32 {
        unsafe { (self.fns.get_camera_param)(node, param) }
    }

    fn set_camera_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        unsafe { (self.fns.set_camera_param)(node, param, value) }
    }

    fn setup_camera_view(&mut self, node: u32, fov: f32, aspect: f32, near_dist: f32, far_dist: f32) -> bool {
        unsafe { (self.fns.setup_camera_view)(node, fov, aspect, near_dist, far_dist) }
    }

    fn calc_camera_projection_matrix(&mut self, node: u32, proj_mat: &mut [f32; 16]) -> bool {
        unsafe { (self.fns.calc_camera_projection_matrix)(node, proj_mat.as_mut_ptr()) }
    }

    fn add_emitter_node(
        &mut self,
        parent: u32,
        name: &CStr,
        mat_res: u32,
        effect_res: u32,
        max_particle_count: u32,
        respawn_count: c_int,
    ) -> u32 {
        unsafe {
            (self.fns.add_emitter_node)(parent, name.as_ptr(), mat_res, effect_res, max_particle_count, respawn_count)
        }
    }

    fn get_emitter_param(&mut self, node: u32, param: c_int) -> f32 {
        unsafe { (self.fns.get_emitter_param)(node, param) }
    }

    fn set_emitter_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        unsafe { (self.fns.set_emitter_param)(node, param, value) }
    }

    fn advance_emitter_time(&mut self, node: u32, time_delta: f32) -> bool {
        unsafe { (self.fns.advance_emitter_time)(node, time_delta) }
    }
}

/// [`UtilsApi`] over the utility shared library.
pub struct NativeUtils {
    fns: UtilsFns,
    _lib: Library,
    _thread_bound: PhantomData<*mut ()>,
}

impl NativeUtils {
    pub fn load(config: &NativeConfig) -> Result<Self> {
        let lib = open(&config.utils_library)?;
        // SAFETY: signatures above follow the utility library's exported C API.
        let fns = unsafe { UtilsFns::resolve(&lib) }?;
        Ok(Self { fns, _lib: lib, _thread_bound: PhantomData })
    }
}

impl UtilsApi for NativeUtils {
    fn init_opengl(&mut self, device_context: c_int) -> bool {
        unsafe { (self.fns.init_opengl)(device_context) }
    }

    fn release_opengl(&mut self) {
        unsafe { (self.fns.release_opengl)() }
    }

    fn swap_buffers(&mut self) {
        unsafe { (self.fns.swap_buffers)() }
    }

    fn load_resources_from_disk(&mut self, content_dir: &CStr) -> bool {
        unsafe { (self.fns.load_resources_from_disk)(content_dir.as_ptr()) }
    }

    fn dump_messages(&mut self) -> bool {
        unsafe { (self.fns.dump_messages)() }
    }

    fn show_text(&mut self, text: &CStr, x: f32, y: f32, size: f32, layer: u32, font_mat_res: u32) {
        unsafe { (self.fns.show_text)(text.as_ptr(), x, y, size, layer, font_mat_res) }
    }

    fn create_tga_image(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        bpp: u32,
        out_data: &mut *const u8,
        out_size: &mut u32,
    ) -> bool {
        unsafe { (self.fns.create_tga_image)(pixels.as_ptr(), width, height, bpp, out_data, out_size) }
    }

    fn pick_node(&mut self, nwx: f32, nwy: f32) -> u32 {
        unsafe { (self.fns.pick_node)(nwx, nwy) }
    }
}
