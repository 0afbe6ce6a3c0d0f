use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ffi::{CStr, CString, c_void};
use std::os::raw::{c_char, c_int};
use std::ptr;

use crate::boundary::{EngineApi, RawMeshData, UtilsApi};

/// One recorded boundary call.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Call {
    pub op: &'static str,
    pub handles: Vec<u32>,
    pub ints: Vec<i64>,
    pub floats: Vec<f32>,
    pub texts: Vec<Option<String>>,
    pub bytes: Vec<u8>,
}

impl Call {
    fn new(op: &'static str) -> Self {
        Self { op, ..Self::default() }
    }

    fn handles(mut self, h: &[u32]) -> Self {
        self.handles.extend_from_slice(h);
        self
    }

    fn ints(mut self, i: &[i64]) -> Self {
        self.ints.extend_from_slice(i);
        self
    }

    fn floats(mut self, f: &[f32]) -> Self {
        self.floats.extend_from_slice(f);
        self
    }

    fn text(mut self, t: &CStr) -> Self {
        self.texts.push(Some(t.to_string_lossy().into_owned()));
        self
    }

    fn opt_text(mut self, t: Option<&CStr>) -> Self {
        self.texts.push(t.map(|t| t.to_string_lossy().into_owned()));
        self
    }

    fn bytes(mut self, b: &[u8]) -> Self {
        self.bytes.extend_from_slice(b);
        self
    }
}

/// Recording engine with programmable answers.
///
/// Boolean results come from `accepted` when it is set (the first handle
/// argument must be in it), otherwise from `bool_result`.
#[derive(Debug)]
pub(crate) struct MockEngine {
    pub calls: Vec<Call>,

    pub version: CString,
    pub init_result: bool,
    pub bool_result: bool,
    pub accepted: Option<BTreeSet<u32>>,
    pub handle_result: u32,
    pub float_result: f32,
    pub int_result: c_int,
    pub text_result: Option<CString>,

    pub messages: VecDeque<(String, u32, f32)>,
    pub transform: [f32; 9],
    pub matrices: Option<([f32; 16], [f32; 16])>,
    pub aabb: [f32; 6],
    pub mesh: Option<(Vec<f32>, Vec<u32>, u32)>,
    pub projection: [f32; 16],
    pub resource_blob: Vec<u8>,
    pub activation: BTreeMap<u32, bool>,

    pub current_message: CString,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            version: CString::new(super::MOCK_VERSION).unwrap_or_default(),
            init_result: true,
            bool_result: true,
            accepted: None,
            handle_result: 0,
            float_result: 0.0,
            int_result: 0,
            text_result: None,
            messages: VecDeque::new(),
            transform: [0.0; 9],
            matrices: None,
            aabb: [0.0; 6],
            mesh: None,
            projection: [0.0; 16],
            resource_blob: Vec::new(),
            activation: BTreeMap::new(),
            current_message: CString::default(),
        }
    }
}

impl MockEngine {
    pub fn accept(mut self, handles: &[u32]) -> Self {
        self.accepted = Some(handles.iter().copied().collect());
        self
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.calls.iter().map(|c| c.op).collect()
    }

    pub fn last(&self) -> &Call {
        self.calls.last().expect("no boundary call recorded")
    }

    fn push(&mut self, call: Call) {
        self.calls.push(call);
    }

    fn answer(&self, handle: u32) -> bool {
        match &self.accepted {
            Some(set) => set.contains(&handle),
            None => self.bool_result,
        }
    }

    fn text_ptr(&self) -> *const c_char {
        self.text_result.as_ref().map_or(ptr::null(), |t| t.as_ptr())
    }
}

impl EngineApi for MockEngine {
    fn get_version_string(&mut self) -> *const c_char {
        self.push(Call::new("getVersionString"));
        self.version.as_ptr()
    }

    fn init(&mut self) -> bool {
        self.push(Call::new("init"));
        self.init_result
    }

    fn release(&mut self) {
        self.push(Call::new("release"));
    }

    fn resize(&mut self, x: c_int, y: c_int, width: c_int, height: c_int) {
        self.push(Call::new("resize").ints(&[x.into(), y.into(), width.into(), height.into()]));
    }

    fn render(&mut self) {
        self.push(Call::new("render"));
    }

    fn clear(&mut self) {
        self.push(Call::new("clear"));
    }

    fn load_pipeline_config(&mut self, filename: &CStr) -> bool {
        self.push(Call::new("loadPipelineConfig").text(filename));
        self.bool_result
    }

    fn get_message(&mut self, level: &mut u32, time: &mut f32) -> *const c_char {
        self.push(Call::new("getMessage"));
        let (text, lvl, t) = self.messages.pop_front().unwrap_or_default();
        *level = lvl;
        *time = t;
        self.current_message = CString::new(text).unwrap_or_default();
        self.current_message.as_ptr()
    }

    fn get_active_camera(&mut self) -> u32 {
        self.push(Call::new("getActiveCamera"));
        self.handle_result
    }

    fn set_active_camera(&mut self, cam_node: u32) -> bool {
        self.push(Call::new("setActiveCamera").handles(&[cam_node]));
        self.answer(cam_node)
    }

    fn get_option(&mut self, param: c_int) -> f32 {
        self.push(Call::new("getOption").ints(&[param.into()]));
        self.float_result
    }

    fn set_option(&mut self, param: c_int, value: f32) -> bool {
        self.push(Call::new("setOption").ints(&[param.into()]).floats(&[value]));
        self.bool_result
    }

    fn show_overlay(&mut self, corners: &[f32; 16], layer: u32, material: u32) {
        self.push(Call::new("showOverlay").handles(&[layer, material]).floats(corners));
    }

    fn get_resource_type(&mut self, res: u32) -> c_int {
        self.push(Call::new("getResourceType").handles(&[res]));
        self.int_result
    }

    fn find_resource(&mut self, ty: c_int, name: &CStr) -> u32 {
        self.push(Call::new("findResource").ints(&[ty.into()]).text(name));
        self.handle_result
    }

    fn add_resource(&mut self, ty: c_int, name: &CStr, flags: u32) -> u32 {
        self.push(Call::new("addResource").ints(&[ty.into(), flags.into()]).text(name));
        self.handle_result
    }

    fn remove_resource(&mut self, res: u32) -> bool {
        self.push(Call::new("removeResource").handles(&[res]));
        self.answer(res)
    }

    fn load_resource(&mut self, name: &CStr, data: &[u8], size: u32) -> bool {
        self.push(Call::new("loadResource").ints(&[size.into()]).text(name).bytes(data));
        self.bool_result
    }

    fn unload_resource(&mut self, res: u32) -> bool {
        self.push(Call::new("unloadResource").handles(&[res]));
        self.answer(res)
    }

    fn get_resource_data(&mut self, res: u32, param: c_int) -> *const c_void {
        self.push(Call::new("getResourceData").handles(&[res]).ints(&[param.into()]));
        if self.resource_blob.is_empty() {
            ptr::null()
        } else {
            self.resource_blob.as_ptr().cast()
        }
    }

    fn update_resource_data(&mut self, res: u32, param: c_int, data: &[u8], size: u32) -> bool {
        self.push(
            Call::new("updateResourceData")
                .handles(&[res])
                .ints(&[param.into(), size.into()])
                .bytes(data),
        );
        self.answer(res)
    }

    fn query_unloaded_resource(&mut self) -> *const c_char {
        self.push(Call::new("queryUnloadedResource"));
        self.text_ptr()
    }

    fn get_resource_path(&mut self, ty: c_int) -> *const c_char {
        self.push(Call::new("getResourcePath").ints(&[ty.into()]));
        self.text_ptr()
    }

    fn set_resource_path(&mut self, ty: c_int, path: &CStr) {
        self.push(Call::new("setResourcePath").ints(&[ty.into()]).text(path));
    }

    fn release_unused_resources(&mut self) {
        self.push(Call::new("releaseUnusedResources"));
    }

    fn set_material_uniform(&mut self, mat_res: u32, name: &CStr, a: f32, b: f32, c: f32, d: f32) -> bool {
        self.push(Call::new("setMaterialUniform").handles(&[mat_res]).text(name).floats(&[a, b, c, d]));
        self.answer(mat_res)
    }

    fn get_node_type(&mut self, node: u32) -> c_int {
        self.push(Call::new("getNodeType").handles(&[node]));
        self.int_result
    }

    fn get_node_name(&mut self, node: u32) -> *const c_char {
        self.push(Call::new("getNodeName").handles(&[node]));
        self.text_ptr()
    }

    fn set_node_name(&mut self, node: u32, name: &CStr) -> bool {
        self.push(Call::new("setNodeName").handles(&[node]).text(name));
        self.answer(node)
    }

    fn get_node_parent(&mut self, node: u32) -> u32 {
        self.push(Call::new("getNodeParent").handles(&[node]));
        self.handle_result
    }

    fn get_node_child(&mut self, parent: u32, name: &CStr, index: u32, recursive: bool) -> u32 {
        self.push(
            Call::new("getNodeChild")
                .handles(&[parent])
                .ints(&[index.into(), recursive.into()])
                .text(name),
        );
        self.handle_result
    }

    fn add_nodes(&mut self, parent: u32, res: u32) -> u32 {
        self.push(Call::new("addNodes").handles(&[parent, res]));
        self.handle_result
    }

    fn remove_node(&mut self, node: u32) -> bool {
        self.push(Call::new("removeNode").handles(&[node]));
        self.answer(node)
    }

    fn set_node_activation(&mut self, node: u32, active: bool) -> bool {
        self.push(Call::new("setNodeActivation").handles(&[node]).ints(&[active.into()]));
        let ok = self.answer(node);
        if ok {
            self.activation.insert(node, active);
        }
        ok
    }

    fn get_node_transform(&mut self, node: u32, out: &mut [f32; 9]) -> bool {
        self.push(Call::new("getNodeTransform").handles(&[node]));
        let ok = self.answer(node);
        if ok {
            *out = self.transform;
        }
        ok
    }

    fn set_node_transform(&mut self, node: u32, components: &[f32; 9]) -> bool {
        self.push(Call::new("setNodeTransform").handles(&[node]).floats(components));
        let ok = self.answer(node);
        if ok {
            self.transform = *components;
        }
        ok
    }

    fn get_node_transform_matrices(
        &mut self,
        node: u32,
        rel_mat: &mut *const f32,
        abs_mat: &mut *const f32,
    ) -> bool {
        self.push(Call::new("getNodeTransformMatrices").handles(&[node]));
        match (&self.matrices, self.answer(node)) {
            (Some((rel, abs)), true) => {
                *rel_mat = rel.as_ptr();
                *abs_mat = abs.as_ptr();
                true
            }
            _ => false,
        }
    }

    fn set_node_transform_matrix(&mut self, node: u32, mat4x4: &[f32; 16]) -> bool {
        self.push(Call::new("setNodeTransformMatrix").handles(&[node]).floats(mat4x4));
        self.answer(node)
    }

    fn get_node_aabb(&mut self, node: u32, out: &mut [f32; 6]) -> bool {
        self.push(Call::new("getNodeAABB").handles(&[node]));
        let ok = self.answer(node);
        if ok {
            *out = self.aabb;
        }
        ok
    }

    fn cast_ray(&mut self, node: u32, origin: [f32; 3], direction: [f32; 3]) -> u32 {
        self.push(Call::new("castRay").handles(&[node]).floats(&origin).floats(&direction));
        self.handle_result
    }

    fn add_group_node(&mut self, parent: u32, name: &CStr) -> u32 {
        self.push(Call::new("addGroupNode").handles(&[parent]).text(name));
        self.handle_result
    }

    fn get_group_param(&mut self, node: u32, param: c_int) -> f32 {
        self.push(Call::new("getGroupParam").handles(&[node]).ints(&[param.into()]));
        self.float_result
    }

    fn set_group_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        self.push(Call::new("setGroupParam").handles(&[node]).ints(&[param.into()]).floats(&[value]));
        self.answer(node)
    }

    fn add_model_node(&mut self, parent: u32, name: &CStr, geo_res: u32) -> u32 {
        self.push(Call::new("addModelNode").handles(&[parent, geo_res]).text(name));
        self.handle_result
    }

    fn setup_model_anim_stage(&mut self, node: u32, stage: u32, res: u32, anim_mask: &CStr, additive: bool) -> bool {
        self.push(
            Call::new("setupModelAnimStage")
                .handles(&[node, res])
                .ints(&[stage.into(), additive.into()])
                .text(anim_mask),
        );
        self.answer(node)
    }

    fn set_model_anim_params(&mut self, node: u32, stage: u32, time: f32, weight: f32) -> bool {
        self.push(
            Call::new("setModelAnimParams")
                .handles(&[node])
                .ints(&[stage.into()])
                .floats(&[time, weight]),
        );
        self.answer(node)
    }

    fn set_model_morpher(&mut self, node: u32, target: &CStr, weight: f32) -> bool {
        self.push(Call::new("setModelMorpher").handles(&[node]).text(target).floats(&[weight]));
        self.answer(node)
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
        self.push(
            Call::new("addMeshNode")
                .handles(&[parent, mat_res])
                .ints(&[batch_start.into(), batch_count.into(), vert_r_start.into(), vert_r_end.into()])
                .text(name),
        );
        self.handle_result
    }

    fn get_mesh_param(&mut self, node: u32, param: c_int) -> f32 {
        self.push(Call::new("getMeshParam").handles(&[node]).ints(&[param.into()]));
        self.float_result
    }

    fn set_mesh_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        self.push(Call::new("setMeshParam").handles(&[node]).ints(&[param.into()]).floats(&[value]));
        self.answer(node)
    }

    fn get_mesh_data(&mut self, node: u32, out: &mut RawMeshData) -> bool {
        self.push(Call::new("getMeshData").handles(&[node]));
        match (&self.mesh, self.answer(node)) {
            (Some((verts, indices, offset)), true) => {
                out.vert_pos_count = verts.len() as u32;
                out.vert_pos_data = verts.as_ptr();
                out.index_count = indices.len() as u32;
                out.index_data = indices.as_ptr();
                out.index_offset = *offset;
                true
            }
            _ => {
                // Leave garbage behind, as a native failure might.
                out.vert_pos_count = 99;
                out.index_count = 99;
                false
            }
        }
    }

    fn set_mesh_uniform(&mut self, node: u32, name: &CStr, a: f32, b: f32, c: f32, d: f32, recursive: bool) -> bool {
        self.push(
            Call::new("setMeshUniform")
                .handles(&[node])
                .ints(&[recursive.into()])
                .text(name)
                .floats(&[a, b, c, d]),
        );
        self.answer(node)
    }

    fn add_joint_node(&mut self, parent: u32, name: &CStr, joint_index: u32) -> u32 {
        self.push(Call::new("addJointNode").handles(&[parent]).ints(&[joint_index.into()]).text(name));
        self.handle_result
    }

    fn add_light_node(
        &mut self,
        parent: u32,
        name: &CStr,
        material_res: u32,
        lighting_context: Option<&CStr>,
        shadow_context: Option<&CStr>,
    ) -> u32 {
        self.push(
            Call::new("addLightNode")
                .handles(&[parent, material_res])
                .text(name)
                .opt_text(lighting_context)
                .opt_text(shadow_context),
        );
        self.handle_result
    }

    fn get_light_param(&mut self, node: u32, param: c_int) -> f32 {
        self.push(Call::new("getLightParam").handles(&[node]).ints(&[param.into()]));
        self.float_result
    }

    fn set_light_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        self.push(Call::new("setLightParam").handles(&[node]).ints(&[param.into()]).floats(&[value]));
        self.answer(node)
    }

    fn set_light_contexts(&mut self, node: u32, lighting_context: &CStr, shadow_context: &CStr) -> bool {
        self.push(
            Call::new("setLightContexts")
                .handles(&[node])
                .text(lighting_context)
                .text(shadow_context),
        );
        self.answer(node)
    }

    fn add_camera_node(&mut self, parent: u32, name: &CStr) -> u32 {
        self.push(Call::new("addCameraNode").handles(&[parent]).text(name));
        self.handle_result
    }

    fn get_camera_param(&mut self, node: u32, param: c_int) -> f32 {
        self.push(Call::new("getCameraParam").handles(&[node]).ints(&[param.into()]));
        self.float_result
    }

    fn set_camera_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        self.push(Call::new("setCameraParam").handles(&[node]).ints(&[param.into()]).floats(&[value]));
        self.answer(node)
    }

    fn setup_camera_view(&mut self, node: u32, fov: f32, aspect: f32, near_dist: f32, far_dist: f32) -> bool {
        self.push(Call::new("setupCameraView").handles(&[node]).floats(&[fov, aspect, near_dist, far_dist]));
        self.answer(node)
    }

    fn calc_camera_projection_matrix(&mut self, node: u32, proj_mat: &mut [f32; 16]) -> bool {
        self.push(Call::new("calcCameraProjectionMatrix").handles(&[node]));
        let ok = self.answer(node);
        if ok {
            *proj_mat = self.projection;
        }
        ok
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
        self.push(
            Call::new("addEmitterNode")
                .handles(&[parent, mat_res, effect_res])
                .ints(&[max_particle_count.into(), respawn_count.into()])
                .text(name),
        );
        self.handle_result
    }

    fn get_emitter_param(&mut self, node: u32, param: c_int) -> f32 {
        self.push(Call::new("getEmitterParam").handles(&[node]).ints(&[param.into()]));
        self.float_result
    }

    fn set_emitter_param(&mut self, node: u32, param: c_int, value: f32) -> bool {
        self.push(Call::new("setEmitterParam").handles(&[node]).ints(&[param.into()]).floats(&[value]));
        self.answer(node)
    }

    fn advance_emitter_time(&mut self, node: u32, time_delta: f32) -> bool {
        self.push(Call::new("advanceEmitterTime").handles(&[node]).floats(&[time_delta]));
        self.answer(node)
    }
}

/// Recording utility library.
#[derive(Debug)]
pub(crate) struct MockUtils {
    pub calls: Vec<Call>,
    pub bool_result: bool,
    pub pick_result: u32,
    pub tga: Option<Vec<u8>>,
}

impl Default for MockUtils {
    fn default() -> Self {
        Self { calls: Vec::new(), bool_result: true, pick_result: 0, tga: None }
    }
}

impl UtilsApi for MockUtils {
    fn init_opengl(&mut self, device_context: c_int) -> bool {
        self.calls.push(Call::new("initOpenGL").ints(&[device_context.into()]));
        self.bool_result
    }

    fn release_opengl(&mut self) {
        self.calls.push(Call::new("releaseOpenGL"));
    }

    fn swap_buffers(&mut self) {
        self.calls.push(Call::new("swapBuffers"));
    }

    fn load_resources_from_disk(&mut self, content_dir: &CStr) -> bool {
        self.calls.push(Call::new("loadResourcesFromDisk").text(content_dir));
        self.bool_result
    }

    fn dump_messages(&mut self) -> bool {
        self.calls.push(Call::new("dumpMessages"));
        self.bool_result
    }

    fn show_text(&mut self, text: &CStr, x: f32, y: f32, size: f32, layer: u32, font_mat_res: u32) {
        self.calls.push(
            Call::new("showText")
                .handles(&[layer, font_mat_res])
                .text(text)
                .floats(&[x, y, size]),
        );
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
        self.calls.push(
            Call::new("createTGAImage")
                .ints(&[width.into(), height.into(), bpp.into()])
                .bytes(pixels),
        );
        match &self.tga {
            Some(image) => {
                *out_data = image.as_ptr();
                *out_size = image.len() as u32;
                true
            }
            None => false,
        }
    }

    fn pick_node(&mut self, nwx: f32, nwy: f32) -> u32 {
        self.calls.push(Call::new("pickNode").floats(&[nwx, nwy]));
        self.pick_result
    }
}
