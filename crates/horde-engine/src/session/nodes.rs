//! Creation and parameters of specific node types.
//!
//! Parameter setters are not filtered by node type here. Passed a Group
//! node, the engine applies the value to every matching descendant.

use glam::Mat4;

use super::Horde;
use crate::boundary::{EngineApi, RawMeshData};
use crate::error::Result;
use crate::handle::{NodeHandle, ResourceHandle};
use crate::marshal;
use crate::math::MeshData;
use crate::params::{CameraParam, EmitterParam, GroupParam, LightParam, MeshParam};

impl<E: EngineApi> Horde<E> {
    // --- Group ---

    pub fn add_group_node(&mut self, parent: NodeHandle, name: &str) -> Result<NodeHandle> {
        let engine = self.live("add_group_node")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        Ok(NodeHandle::from_boundary(engine.add_group_node(parent, &name)))
    }

    pub fn group_param(&mut self, node: NodeHandle, param: GroupParam) -> Result<f32> {
        let engine = self.live("group_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.get_group_param(node, param.raw()))
    }

    pub fn set_group_param(&mut self, node: NodeHandle, param: GroupParam, value: f32) -> Result<bool> {
        let engine = self.live("set_group_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.set_group_param(node, param.raw(), value))
    }

    // --- Model ---

    pub fn add_model_node(&mut self, parent: NodeHandle, name: &str, geometry: ResourceHandle) -> Result<NodeHandle> {
        let engine = self.live("add_model_node")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        let geometry = geometry.to_boundary("geometry")?;
        Ok(NodeHandle::from_boundary(engine.add_model_node(parent, &name, geometry)))
    }

    // --- Mesh ---

    #[allow(clippy::too_many_arguments)]
    pub fn add_mesh_node(
        &mut self,
        parent: NodeHandle,
        name: &str,
        material: ResourceHandle,
        batch_start: i32,
        batch_count: i32,
        vert_r_start: i32,
        vert_r_end: i32,
    ) -> Result<NodeHandle> {
        let engine = self.live("add_mesh_node")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        let material = material.to_boundary("material")?;
        let batch_start = marshal::to_uint("batch_start", batch_start)?;
        let batch_count = marshal::to_uint("batch_count", batch_count)?;
        let vert_r_start = marshal::to_uint("vert_r_start", vert_r_start)?;
        let vert_r_end = marshal::to_uint("vert_r_end", vert_r_end)?;
        let node = engine.add_mesh_node(parent, &name, material, batch_start, batch_count, vert_r_start, vert_r_end);
        Ok(NodeHandle::from_boundary(node))
    }

    pub fn mesh_param(&mut self, node: NodeHandle, param: MeshParam) -> Result<f32> {
        let engine = self.live("mesh_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.get_mesh_param(node, param.raw()))
    }

    pub fn set_mesh_param(&mut self, node: NodeHandle, param: MeshParam, value: f32) -> Result<bool> {
        let engine = self.live("set_mesh_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.set_mesh_param(node, param.raw(), value))
    }

    /// Copies the geometry referenced by a mesh node.
    ///
    /// `None` when the engine reports failure; nothing partial is returned.
    pub fn mesh_data(&mut self, node: NodeHandle) -> Result<Option<MeshData>> {
        let engine = self.live("mesh_data")?;
        let node = node.to_boundary("node")?;
        let mut raw = RawMeshData::default();
        if !engine.get_mesh_data(node, &mut raw) {
            return Ok(None);
        }
        // SAFETY: on success the engine guarantees the counts describe the
        // buffers, which stay valid until the next engine call.
        let (vertex_positions, indices) = unsafe {
            (
                marshal::copy_borrowed(raw.vert_pos_data, raw.vert_pos_count),
                marshal::copy_borrowed(raw.index_data, raw.index_count),
            )
        };
        Ok(Some(MeshData { vertex_positions, indices, index_offset: raw.index_offset }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_mesh_uniform(
        &mut self,
        node: NodeHandle,
        name: &str,
        a: f32,
        b: f32,
        c: f32,
        d: f32,
        recursive: bool,
    ) -> Result<bool> {
        let engine = self.live("set_mesh_uniform")?;
        let node = node.to_boundary("node")?;
        let name = marshal::to_c_string("name", name)?;
        Ok(engine.set_mesh_uniform(node, &name, a, b, c, d, recursive))
    }

    // --- Joint ---

    pub fn add_joint_node(&mut self, parent: NodeHandle, name: &str, joint_index: i32) -> Result<NodeHandle> {
        let engine = self.live("add_joint_node")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        let joint_index = marshal::to_uint("joint_index", joint_index)?;
        Ok(NodeHandle::from_boundary(engine.add_joint_node(parent, &name, joint_index)))
    }

    // --- Light ---

    /// Adds a light. `material` may be `NONE`; absent contexts reach the
    /// engine as null.
    pub fn add_light_node(
        &mut self,
        parent: NodeHandle,
        name: &str,
        material: ResourceHandle,
        lighting_context: Option<&str>,
        shadow_context: Option<&str>,
    ) -> Result<NodeHandle> {
        let engine = self.live("add_light_node")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        let material = material.to_boundary("material")?;
        let lighting = marshal::to_c_string_opt("lighting_context", lighting_context)?;
        let shadow = marshal::to_c_string_opt("shadow_context", shadow_context)?;
        let node = engine.add_light_node(parent, &name, material, lighting.as_deref(), shadow.as_deref());
        Ok(NodeHandle::from_boundary(node))
    }

    pub fn light_param(&mut self, node: NodeHandle, param: LightParam) -> Result<f32> {
        let engine = self.live("light_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.get_light_param(node, param.raw()))
    }

    pub fn set_light_param(&mut self, node: NodeHandle, param: LightParam, value: f32) -> Result<bool> {
        let engine = self.live("set_light_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.set_light_param(node, param.raw(), value))
    }

    pub fn set_light_contexts(&mut self, node: NodeHandle, lighting_context: &str, shadow_context: &str) -> Result<bool> {
        let engine = self.live("set_light_contexts")?;
        let node = node.to_boundary("node")?;
        let lighting = marshal::to_c_string("lighting_context", lighting_context)?;
        let shadow = marshal::to_c_string("shadow_context", shadow_context)?;
        Ok(engine.set_light_contexts(node, &lighting, &shadow))
    }

    // --- Camera ---

    pub fn add_camera_node(&mut self, parent: NodeHandle, name: &str) -> Result<NodeHandle> {
        let engine = self.live("add_camera_node")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        Ok(NodeHandle::from_boundary(engine.add_camera_node(parent, &name)))
    }

    pub fn camera_param(&mut self, node: NodeHandle, param: CameraParam) -> Result<f32> {
        let engine = self.live("camera_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.get_camera_param(node, param.raw()))
    }

    pub fn set_camera_param(&mut self, node: NodeHandle, param: CameraParam, value: f32) -> Result<bool> {
        let engine = self.live("set_camera_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.set_camera_param(node, param.raw(), value))
    }

    /// Sets a symmetric perspective frustum; `fov` is vertical, in degrees.
    pub fn setup_camera_view(&mut self, node: NodeHandle, fov: f32, aspect: f32, near: f32, far: f32) -> Result<bool> {
        let engine = self.live("setup_camera_view")?;
        let node = node.to_boundary("node")?;
        Ok(engine.setup_camera_view(node, fov, aspect, near, far))
    }

    /// Writes the camera's projection matrix (column-major) into `proj_mat`.
    pub fn calc_camera_projection_matrix(&mut self, node: NodeHandle, proj_mat: &mut [f32]) -> Result<bool> {
        let engine = self.live("calc_camera_projection_matrix")?;
        let node = node.to_boundary("node")?;
        let proj_mat = marshal::array::check_matrix_mut("proj_mat", proj_mat)?;
        Ok(engine.calc_camera_projection_matrix(node, proj_mat))
    }

    /// [`calc_camera_projection_matrix`](Self::calc_camera_projection_matrix)
    /// into a `Mat4`.
    pub fn camera_projection(&mut self, node: NodeHandle) -> Result<Option<Mat4>> {
        let mut out = [0.0; marshal::MATRIX_LEN];
        let ok = self.calc_camera_projection_matrix(node, &mut out)?;
        Ok(ok.then(|| Mat4::from_cols_array(&out)))
    }

    // --- Emitter ---

    /// Adds a particle emitter. A negative `respawn_count` respawns forever.
    #[allow(clippy::too_many_arguments)]
    pub fn add_emitter_node(
        &mut self,
        parent: NodeHandle,
        name: &str,
        material: ResourceHandle,
        effect: ResourceHandle,
        max_particle_count: i32,
        respawn_count: i32,
    ) -> Result<NodeHandle> {
        let engine = self.live("add_emitter_node")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        let material = material.to_boundary("material")?;
        let effect = effect.to_boundary("effect")?;
        let max_particle_count = marshal::to_uint("max_particle_count", max_particle_count)?;
        let node = engine.add_emitter_node(parent, &name, material, effect, max_particle_count, respawn_count);
        Ok(NodeHandle::from_boundary(node))
    }

    pub fn emitter_param(&mut self, node: NodeHandle, param: EmitterParam) -> Result<f32> {
        let engine = self.live("emitter_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.get_emitter_param(node, param.raw()))
    }

    pub fn set_emitter_param(&mut self, node: NodeHandle, param: EmitterParam, value: f32) -> Result<bool> {
        let engine = self.live("set_emitter_param")?;
        let node = node.to_boundary("node")?;
        Ok(engine.set_emitter_param(node, param.raw(), value))
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use crate::Error;
    use crate::handle::{NodeHandle, ResourceHandle};
    use crate::params::{CameraParam, EmitterParam, GroupParam, LightParam, MeshParam};
    use crate::testing::{MockEngine, ready_session, ready_with};

    #[test]
    fn mesh_data_copies_exact_counts() {
        let mut mock = MockEngine::default();
        let verts: Vec<f32> = (0..9).map(|i| i as f32).collect();
        mock.mesh = Some((verts.clone(), vec![0, 1, 2], 4));
        let mut horde = ready_with(mock);

        let data = horde.mesh_data(NodeHandle::from_raw(6)).unwrap().unwrap();
        // The engine-side buffers may vanish after the call.
        horde.engine_mut().mesh = None;

        assert_eq!(data.vertex_positions, verts);
        assert_eq!(data.indices, [0, 1, 2]);
        assert_eq!(data.index_offset, 4);
        assert_eq!(data.vertex_count(), 3);
    }

    #[test]
    fn mesh_data_failure_returns_nothing() {
        let mut horde = ready_session();
        assert_eq!(horde.mesh_data(NodeHandle::from_raw(6)), Ok(None));
    }

    #[test]
    fn light_allows_no_material_and_absent_contexts() {
        let mut horde = ready_with(MockEngine { handle_result: 30, ..MockEngine::default() });

        let light = horde
            .add_light_node(NodeHandle::ROOT, "Light1", ResourceHandle::NONE, Some("LIGHTING"), None)
            .unwrap();
        assert_eq!(light.raw(), 30);

        let call = horde.engine().last();
        assert_eq!(call.handles, [1, 0]);
        assert_eq!(call.texts, [Some("Light1".to_owned()), Some("LIGHTING".to_owned()), None]);
    }

    #[test]
    fn light_context_with_nul_rejected() {
        let mut horde = ready_session();
        assert_eq!(
            horde.add_light_node(NodeHandle::ROOT, "L", ResourceHandle::NONE, None, Some("SHADOW\0MAP")),
            Err(Error::NullArgument { param: "shadow_context" })
        );
        assert_eq!(
            horde.set_light_contexts(NodeHandle::from_raw(3), "LIGHT\0ING", "SHADOWMAP"),
            Err(Error::NullArgument { param: "lighting_context" })
        );
        assert!(matches!(
            horde.add_light_node(NodeHandle::ROOT, "L", ResourceHandle::from_raw(-1), None, None),
            Err(Error::OutOfRange { param: "material", .. })
        ));
        assert!(horde.engine().calls.is_empty());
    }

    #[test]
    fn group_node_accepted_for_typed_setters() {
        // The engine recurses from a group into matching descendants, so
        // nothing is filtered on this side.
        let mut horde = ready_session();
        let group = NodeHandle::from_raw(8);

        assert_eq!(horde.set_light_param(group, LightParam::Radius, 30.0), Ok(true));
        assert_eq!(horde.set_mesh_param(group, MeshParam::MaterialRes, 3.0), Ok(true));
        assert_eq!(horde.set_camera_param(group, CameraParam::FarPlane, 1000.0), Ok(true));
        assert_eq!(horde.set_emitter_param(group, EmitterParam::EmissionRate, 50.0), Ok(true));
        assert_eq!(horde.set_group_param(group, GroupParam::MaxDist, 200.0), Ok(true));
        assert_eq!(
            horde.engine().ops(),
            ["setLightParam", "setMeshParam", "setCameraParam", "setEmitterParam", "setGroupParam"]
        );
        assert!(horde.engine().calls.iter().all(|c| c.handles == [8]));
    }

    #[test]
    fn light_param_codes() {
        let mut horde = ready_session();
        horde.engine_mut().float_result = 0.01;
        let light = NodeHandle::from_raw(3);
        assert_eq!(horde.light_param(light, LightParam::ShadowMapBias), Ok(0.01));
        assert_eq!(horde.engine().last().ints, [8]);
    }

    #[test]
    fn projection_matrix_length_checked() {
        let mut horde = ready_session();
        let cam = NodeHandle::from_raw(2);

        let mut short = [0.0; 12];
        assert_eq!(
            horde.calc_camera_projection_matrix(cam, &mut short),
            Err(Error::LengthMismatch { param: "proj_mat", expected: 16, actual: 12 })
        );
        assert!(horde.engine().calls.is_empty());

        let persp = Mat4::perspective_rh_gl(1.0, 1.5, 0.1, 1000.0);
        horde.engine_mut().projection = persp.to_cols_array();
        let mut out = vec![0.0; 16];
        assert_eq!(horde.calc_camera_projection_matrix(cam, &mut out), Ok(true));
        assert_eq!(out, persp.to_cols_array());
        assert_eq!(horde.camera_projection(cam), Ok(Some(persp)));
    }

    #[test]
    fn mesh_node_counts_validated() {
        let mut horde = ready_session();
        let mat = ResourceHandle::from_raw(3);
        assert!(matches!(
            horde.add_mesh_node(NodeHandle::ROOT, "m", mat, 0, -6, 0, 10),
            Err(Error::OutOfRange { param: "batch_count", value: -6 })
        ));
        assert!(horde.engine().calls.is_empty());

        horde.add_mesh_node(NodeHandle::ROOT, "m", mat, 0, 6, 0, 10).unwrap();
        assert_eq!(horde.engine().last().ints, [0, 6, 0, 10]);
    }

    #[test]
    fn emitter_respawn_forwarded_signed() {
        let mut horde = ready_session();
        let mat = ResourceHandle::from_raw(11);
        let effect = ResourceHandle::from_raw(12);

        horde.add_emitter_node(NodeHandle::ROOT, "smoke", mat, effect, 200, -1).unwrap();
        let call = horde.engine().last();
        assert_eq!(call.handles, [1, 11, 12]);
        assert_eq!(call.ints, [200, -1]);

        assert!(matches!(
            horde.add_emitter_node(NodeHandle::ROOT, "smoke", mat, effect, -1, 0),
            Err(Error::OutOfRange { param: "max_particle_count", .. })
        ));
    }

    #[test]
    fn joint_and_camera_creation() {
        let mut horde = ready_with(MockEngine { handle_result: 40, ..MockEngine::default() });
        assert_eq!(horde.add_joint_node(NodeHandle::from_raw(9), "Bip01", 3).map(|n| n.raw()), Ok(40));
        assert_eq!(horde.engine().last().ints, [3]);
        assert!(matches!(
            horde.add_joint_node(NodeHandle::from_raw(9), "Bip01", -3),
            Err(Error::OutOfRange { param: "joint_index", .. })
        ));
        assert_eq!(horde.add_camera_node(NodeHandle::ROOT, "cam").map(|n| n.raw()), Ok(40));
    }

    #[test]
    fn mesh_uniform_recursive_flag() {
        let mut horde = ready_session();
        horde
            .set_mesh_uniform(NodeHandle::from_raw(5), "tint", 1.0, 0.5, 0.5, 1.0, true)
            .unwrap();
        let call = horde.engine().last();
        assert_eq!(call.ints, [1]);
        assert_eq!(call.floats, [1.0, 0.5, 0.5, 1.0]);
    }
}
