//! Value types exchanged with the scene graph.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Placement of a node relative to its parent.
///
/// Rotation is in Euler degrees, applied by the engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { translation, rotation, scale }
    }

    /// `tx, ty, tz, rx, ry, rz, sx, sy, sz`.
    pub fn to_components(&self) -> [f32; 9] {
        let t = self.translation;
        let r = self.rotation;
        let s = self.scale;
        [t.x, t.y, t.z, r.x, r.y, r.z, s.x, s.y, s.z]
    }

    pub fn from_components(c: [f32; 9]) -> Self {
        Self {
            translation: Vec3::new(c[0], c[1], c[2]),
            rotation: Vec3::new(c[3], c[4], c[5]),
            scale: Vec3::new(c[6], c[7], c[8]),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Relative and absolute transformation matrices of a node, copied out of
/// the engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeMatrices {
    pub relative: Mat4,
    pub absolute: Mat4,
}

/// World-space bounding box.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_components(c: [f32; 6]) -> Self {
        Self {
            min: Vec3::new(c[0], c[1], c[2]),
            max: Vec3::new(c[3], c[4], c[5]),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Geometry owned by a mesh node, copied out of the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Three floats per vertex.
    pub vertex_positions: Vec<f32>,
    pub indices: Vec<u32>,
    /// Subtract from each index to address `vertex_positions`.
    pub index_offset: u32,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertex_positions.len() / 3
    }
}

/// One corner of a screen overlay.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

impl OverlayVertex {
    pub fn new(pos: Vec2, uv: Vec2) -> Self {
        Self { x: pos.x, y: pos.y, u: uv.x, v: uv.y }
    }
}

/// Screen-space quad, corners counter-clockwise from lower-left.
///
/// Positions are normalized to `[0, 1]` across the viewport.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Overlay {
    pub corners: [OverlayVertex; 4],
}

impl Overlay {
    pub fn new(corners: [OverlayVertex; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned quad covering `min..max` with the full texture.
    pub fn rect(min: Vec2, max: Vec2) -> Self {
        Self::new([
            OverlayVertex::new(min, Vec2::new(0.0, 0.0)),
            OverlayVertex::new(Vec2::new(max.x, min.y), Vec2::new(1.0, 0.0)),
            OverlayVertex::new(max, Vec2::new(1.0, 1.0)),
            OverlayVertex::new(Vec2::new(min.x, max.y), Vec2::new(0.0, 1.0)),
        ])
    }

    pub(crate) fn to_floats(&self) -> [f32; 16] {
        bytemuck::cast(self.corners)
    }
}
