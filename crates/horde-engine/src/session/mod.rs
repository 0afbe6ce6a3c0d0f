//! The engine session.
//!
//! [`Horde`] owns a boundary implementation and the lifecycle state of the
//! engine behind it. Every public operation checks the state, validates its
//! inputs, marshals and calls the boundary, and relays the result unchanged.
//!
//! Operation groups live in submodules:
//! - `general`: messages, active camera, options, overlays
//! - `resource`: the resource pool
//! - `scene`: generic scene-graph operations
//! - `nodes`: per-node-type creation and parameters
//! - `anim`: animation stages, morph targets, emitter time
//! - `config`: startup configuration

pub mod anim;
pub mod config;
pub mod general;
pub mod nodes;
pub mod resource;
pub mod scene;

use std::fmt;
use std::path::Path;

pub use config::{ENGINE_VERSION, HordeConfig, ResourcePaths};
pub use general::Message;

use crate::boundary::EngineApi;
use crate::error::{Error, Result};
use crate::marshal;

/// Lifecycle of an engine session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EngineState {
    Uninitialized,
    Ready,
    /// `clear()` was called; every handle issued before is undefined.
    Cleared,
    /// Terminal.
    Released,
}

impl EngineState {
    /// Whether node and resource operations are accepted.
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Ready | Self::Cleared)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Cleared => "cleared",
            Self::Released => "released",
        })
    }
}

/// A session with one engine instance.
///
/// Calls run synchronously in program order; `&mut self` on every operation
/// keeps them serialized.
pub struct Horde<E: EngineApi> {
    engine: E,
    state: EngineState,
    expected_version: String,
    /// Version string that failed the compatibility check, if any.
    incompatible: Option<String>,
}

impl<E: EngineApi> Horde<E> {
    /// Wraps `engine`, expecting [`ENGINE_VERSION`].
    pub fn new(engine: E) -> Self {
        Self::expecting(engine, ENGINE_VERSION)
    }

    /// Wraps `engine`, expecting the version named by `config`.
    pub fn with_config(engine: E, config: &HordeConfig) -> Self {
        Self::expecting(engine, config.expected_version.clone())
    }

    fn expecting(engine: E, expected_version: impl Into<String>) -> Self {
        Self {
            engine,
            state: EngineState::Uninitialized,
            expected_version: expected_version.into(),
            incompatible: None,
        }
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn expected_version(&self) -> &str {
        &self.expected_version
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Grants boundary access when the session accepts `op`.
    pub(crate) fn live(&mut self, op: &'static str) -> Result<&mut E> {
        if self.state.is_live() {
            Ok(&mut self.engine)
        } else {
            log::trace!("rejected `{op}`: engine is {}", self.state);
            Err(Error::InvalidState { op, state: self.state })
        }
    }

    // --- Basic ---

    /// Version string reported by the loaded engine.
    pub fn version_string(&mut self) -> String {
        // SAFETY: the engine returns a static NUL-terminated string or null.
        unsafe { marshal::from_c_ptr(self.engine.get_version_string()) }
    }

    /// Initializes the engine.
    ///
    /// The engine version is checked first; a mismatch is fatal for this
    /// session and the engine's own initialization never runs. `Ok(false)`
    /// means the engine refused to initialize and the session stays
    /// uninitialized.
    pub fn init(&mut self) -> Result<bool> {
        if self.state != EngineState::Uninitialized {
            return Err(Error::InvalidState { op: "init", state: self.state });
        }

        if let Some(found) = &self.incompatible {
            return Err(Error::Incompatible {
                expected: self.expected_version.clone(),
                found: found.clone(),
            });
        }

        let found = self.version_string();
        if found != self.expected_version {
            log::warn!(
                "engine version `{found}` does not match expected `{}`",
                self.expected_version
            );
            self.incompatible = Some(found.clone());
            return Err(Error::Incompatible { expected: self.expected_version.clone(), found });
        }

        if !self.engine.init() {
            log::debug!("engine init refused");
            return Ok(false);
        }

        self.state = EngineState::Ready;
        log::debug!("engine initialized ({found})");
        Ok(true)
    }

    /// Releases the engine. No further engine calls are valid afterwards.
    pub fn release(&mut self) -> Result<()> {
        match self.state {
            EngineState::Released => {
                return Err(Error::InvalidState { op: "release", state: self.state });
            }
            EngineState::Uninitialized => {}
            EngineState::Ready | EngineState::Cleared => self.engine.release(),
        }
        self.state = EngineState::Released;
        log::debug!("engine released");
        Ok(())
    }

    pub fn resize(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        self.live("resize")?.resize(x, y, width, height);
        Ok(())
    }

    pub fn render(&mut self) -> Result<()> {
        self.live("render")?.render();
        Ok(())
    }

    /// Removes every resource and scene node.
    ///
    /// Not fully stable inside the engine: handles issued before the call are
    /// undefined afterwards and using them may destabilize the process.
    pub fn clear(&mut self) -> Result<()> {
        self.live("clear")?.clear();
        self.state = EngineState::Cleared;
        log::warn!("engine cleared; all previously issued handles are invalid");
        Ok(())
    }

    /// Loads the render pipeline configuration.
    ///
    /// A missing file returns `Ok(false)` without reaching the engine.
    pub fn load_pipeline_config(&mut self, filename: impl AsRef<Path>) -> Result<bool> {
        let path = filename.as_ref();
        let engine = self.live("load_pipeline_config")?;
        let c_path = marshal::to_c_string("filename", &path.to_string_lossy())?;
        if !path.is_file() {
            log::debug!("pipeline config {} not found", path.display());
            return Ok(false);
        }
        Ok(engine.load_pipeline_config(&c_path))
    }
}

impl<E: EngineApi> Drop for Horde<E> {
    fn drop(&mut self) {
        if self.state.is_live() {
            self.engine.release();
            self.state = EngineState::Released;
            log::debug!("engine released on drop");
        }
    }
}
