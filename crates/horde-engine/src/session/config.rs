use std::path::PathBuf;

use super::Horde;
use crate::boundary::EngineApi;
use crate::error::Result;
use crate::params::{EngineOption, ResourceType};

/// Engine build this binding is written against.
pub const ENGINE_VERSION: &str = "1.0.0 Beta1";

/// Search path per resource type.
///
/// Paths are concatenated with resource names by the engine; no separator is
/// inserted, so paths must not end with one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePaths {
    entries: Vec<(ResourceType, String)>,
}

impl ResourcePaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same path for every resource type.
    pub fn uniform(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            entries: ResourceType::CONCRETE.iter().map(|&ty| (ty, path.clone())).collect(),
        }
    }

    /// Sets (or replaces) the path for `ty`.
    pub fn with(mut self, ty: ResourceType, path: impl Into<String>) -> Self {
        let path = path.into();
        match self.entries.iter_mut().find(|(t, _)| *t == ty) {
            Some(entry) => entry.1 = path,
            None => self.entries.push((ty, path)),
        }
        self
    }

    pub fn get(&self, ty: ResourceType) -> Option<&str> {
        self.entries.iter().find(|(t, _)| *t == ty).map(|(_, p)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, &str)> {
        self.entries.iter().map(|(t, p)| (*t, p.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Startup configuration for a session.
#[derive(Debug, Clone)]
pub struct HordeConfig {
    /// Version string `init` requires the engine to report.
    pub expected_version: String,
    pub resource_paths: ResourcePaths,
    /// Pipeline loaded by [`Horde::apply_config`], if any.
    pub pipeline_config: Option<PathBuf>,
    /// Options applied in order.
    pub options: Vec<(EngineOption, f32)>,
}

impl Default for HordeConfig {
    fn default() -> Self {
        Self {
            expected_version: ENGINE_VERSION.to_owned(),
            resource_paths: ResourcePaths::default(),
            pipeline_config: None,
            options: Vec::new(),
        }
    }
}

impl<E: EngineApi> Horde<E> {
    /// Applies resource paths, then the pipeline, then options.
    ///
    /// Stops at the first step the engine refuses and returns `Ok(false)`.
    pub fn apply_config(&mut self, config: &HordeConfig) -> Result<bool> {
        for (ty, path) in config.resource_paths.iter() {
            self.set_resource_path(ty, path)?;
        }

        if let Some(pipeline) = &config.pipeline_config {
            if !self.load_pipeline_config(pipeline)? {
                log::debug!("pipeline {} was not loaded", pipeline.display());
                return Ok(false);
            }
        }

        for &(option, value) in &config.options {
            if !self.set_option(option, value)? {
                log::debug!("option {option:?} = {value} refused");
                return Ok(false);
            }
        }

        Ok(true)
    }
}
