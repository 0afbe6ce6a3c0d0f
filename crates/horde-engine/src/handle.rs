//! Typed handles over the engine's flat integer identifiers.
//!
//! The engine hands out unsigned 32-bit identifiers. On this side they are
//! signed so that a corrupted or uninitialized value shows up as negative and
//! is rejected before it reaches the boundary.

use std::fmt;

use crate::error::Result;
use crate::marshal;

/// Identifies a loaded or pending engine resource. `0` means "none".
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(i32);

/// Identifies a live scene-graph node. `0` means "none".
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(i32);

impl ResourceHandle {
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Converts to the boundary's unsigned representation.
    pub(crate) fn to_boundary(self, param: &'static str) -> Result<u32> {
        marshal::to_uint(param, self.0)
    }

    /// Wraps an identifier produced by the boundary.
    pub(crate) fn from_boundary(raw: u32) -> Self {
        Self(marshal::from_uint(raw))
    }
}

impl NodeHandle {
    pub const NONE: Self = Self(0);
    /// Root of the scene graph. Always present.
    pub const ROOT: Self = Self(1);
    /// Camera created by the engine at startup.
    pub const DEFAULT_CAMERA: Self = Self(2);

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub(crate) fn to_boundary(self, param: &'static str) -> Result<u32> {
        marshal::to_uint(param, self.0)
    }

    pub(crate) fn from_boundary(raw: u32) -> Self {
        Self(marshal::from_uint(raw))
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "res#{}", self.0)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
