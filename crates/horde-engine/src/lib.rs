//! Horde3D engine binding.
//!
//! The engine owns every resource and scene node; this crate hands out typed
//! handles to them, validates arguments before they cross into native code,
//! and copies engine-owned buffers out as soon as a call returns.
//!
//! Entry point is [`Horde`], a session over an [`EngineApi`] implementation
//! (normally [`NativeEngine`]). [`Utils`] wraps the utility library.

pub mod boundary;
pub mod error;
pub mod handle;
pub mod logging;
pub mod marshal;
pub mod math;
pub mod params;
pub mod session;
pub mod utils;

#[cfg(test)]
mod testing;

pub use boundary::{EngineApi, NativeConfig, NativeEngine, NativeUtils, UtilsApi};
pub use error::{Error, Result};
pub use handle::{NodeHandle, ResourceHandle};
pub use math::{Aabb, MeshData, NodeMatrices, Overlay, OverlayVertex, Transform};
pub use params::{
    CameraParam, EmitterParam, EngineOption, GroupParam, LightParam, MeshParam, ResourceData, ResourceFlags,
    ResourceType, SceneNodeType,
};
pub use session::{ENGINE_VERSION, EngineState, Horde, HordeConfig, Message, ResourcePaths};
pub use utils::Utils;
