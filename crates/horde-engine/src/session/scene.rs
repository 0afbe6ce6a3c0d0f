use std::ptr;

use glam::Vec3;

use super::Horde;
use crate::boundary::EngineApi;
use crate::error::Result;
use crate::handle::{NodeHandle, ResourceHandle};
use crate::marshal;
use crate::math::{Aabb, NodeMatrices, Transform};
use crate::params::SceneNodeType;

impl<E: EngineApi> Horde<E> {
    pub fn node_type(&mut self, node: NodeHandle) -> Result<SceneNodeType> {
        let engine = self.live("node_type")?;
        let node = node.to_boundary("node")?;
        Ok(SceneNodeType::from_raw(engine.get_node_type(node)))
    }

    /// Empty if the node does not exist.
    pub fn node_name(&mut self, node: NodeHandle) -> Result<String> {
        let engine = self.live("node_name")?;
        let node = node.to_boundary("node")?;
        let ptr = engine.get_node_name(node);
        // SAFETY: engine string, copied before the next call.
        Ok(unsafe { marshal::from_c_ptr(ptr) })
    }

    pub fn set_node_name(&mut self, node: NodeHandle, name: &str) -> Result<bool> {
        let engine = self.live("set_node_name")?;
        let node = node.to_boundary("node")?;
        let name = marshal::to_c_string("name", name)?;
        Ok(engine.set_node_name(node, &name))
    }

    pub fn node_parent(&mut self, node: NodeHandle) -> Result<NodeHandle> {
        let engine = self.live("node_parent")?;
        let node = node.to_boundary("node")?;
        Ok(NodeHandle::from_boundary(engine.get_node_parent(node)))
    }

    /// The `index`-th child of `parent` called `name`.
    ///
    /// An empty name matches every child. With `recursive` the whole subtree
    /// is searched.
    pub fn node_child(&mut self, parent: NodeHandle, name: &str, index: i32, recursive: bool) -> Result<NodeHandle> {
        let engine = self.live("node_child")?;
        let parent = parent.to_boundary("parent")?;
        let name = marshal::to_c_string("name", name)?;
        let index = marshal::to_uint("index", index)?;
        Ok(NodeHandle::from_boundary(engine.get_node_child(parent, &name, index, recursive)))
    }

    /// Instantiates a scene-graph resource below `parent`.
    pub fn add_nodes(&mut self, parent: NodeHandle, scene: ResourceHandle) -> Result<NodeHandle> {
        let engine = self.live("add_nodes")?;
        let parent = parent.to_boundary("parent")?;
        let scene = scene.to_boundary("scene")?;
        Ok(NodeHandle::from_boundary(engine.add_nodes(parent, scene)))
    }

    /// Removes `node` and its subtree.
    pub fn remove_node(&mut self, node: NodeHandle) -> Result<bool> {
        let engine = self.live("remove_node")?;
        let node = node.to_boundary("node")?;
        Ok(engine.remove_node(node))
    }

    /// Inactive nodes and their subtrees are skipped when rendering.
    pub fn set_node_activation(&mut self, node: NodeHandle, active: bool) -> Result<bool> {
        let engine = self.live("set_node_activation")?;
        let node = node.to_boundary("node")?;
        Ok(engine.set_node_activation(node, active))
    }

    pub fn node_transform(&mut self, node: NodeHandle) -> Result<Option<Transform>> {
        let engine = self.live("node_transform")?;
        let node = node.to_boundary("node")?;
        let mut out = [0.0; 9];
        Ok(engine
            .get_node_transform(node, &mut out)
            .then(|| Transform::from_components(out)))
    }

    pub fn set_node_transform(&mut self, node: NodeHandle, transform: &Transform) -> Result<bool> {
        self.set_node_transform_components(node, transform.to_components())
    }

    /// `tx, ty, tz, rx, ry, rz, sx, sy, sz` with rotation in degrees.
    pub fn set_node_transform_components(&mut self, node: NodeHandle, components: [f32; 9]) -> Result<bool> {
        let engine = self.live("set_node_transform")?;
        let node = node.to_boundary("node")?;
        Ok(engine.set_node_transform(node, &components))
    }

    /// Copies of the node's relative and absolute matrices.
    pub fn node_transform_matrices(&mut self, node: NodeHandle) -> Result<Option<NodeMatrices>> {
        let engine = self.live("node_transform_matrices")?;
        let node = node.to_boundary("node")?;
        let mut rel = ptr::null();
        let mut abs = ptr::null();
        if !engine.get_node_transform_matrices(node, &mut rel, &mut abs) {
            return Ok(None);
        }
        // SAFETY: on success both point at 16 engine floats, valid until the
        // next engine call.
        let matrices = unsafe { marshal::read_matrix(rel).zip(marshal::read_matrix(abs)) };
        Ok(matrices.map(|(relative, absolute)| NodeMatrices { relative, absolute }))
    }

    /// Sets the relative transformation from a column-major 4x4 matrix.
    pub fn set_node_transform_matrix(&mut self, node: NodeHandle, mat4x4: &[f32]) -> Result<bool> {
        let engine = self.live("set_node_transform_matrix")?;
        let node = node.to_boundary("node")?;
        let mat4x4 = marshal::check_matrix("mat4x4", mat4x4)?;
        Ok(engine.set_node_transform_matrix(node, mat4x4))
    }

    pub fn node_aabb(&mut self, node: NodeHandle) -> Result<Option<Aabb>> {
        let engine = self.live("node_aabb")?;
        let node = node.to_boundary("node")?;
        let mut out = [0.0; 6];
        Ok(engine.get_node_aabb(node, &mut out).then(|| Aabb::from_components(out)))
    }

    /// Nearest node below `node` hit by the ray, or `NONE`.
    pub fn cast_ray(&mut self, node: NodeHandle, origin: Vec3, direction: Vec3) -> Result<NodeHandle> {
        let engine = self.live("cast_ray")?;
        let node = node.to_boundary("node")?;
        let hit = engine.cast_ray(node, origin.to_array(), direction.to_array());
        Ok(NodeHandle::from_boundary(hit))
    }
}
