//! YAML settings for the package tooling used during generation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "PROJGEN_CONFIG";

/// Settings file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "projgen.yaml";

/// Version range written for express in generated server manifests
pub const DEFAULT_EXPRESS_VERSION: &str = "^4.17.1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Program (plus leading args) used to run scaffolding packages, e.g. `npx`
    pub runner: Vec<String>,

    /// Command used to install dependencies in a generated server
    pub install: Vec<String>,

    /// Version string for the express dependency
    pub express_version: String,

    /// Skip the node/npm availability check before generating
    pub skip_runtime_check: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            runner: vec!["npx".to_string()],
            install: vec!["npm".to_string(), "install".to_string()],
            express_version: DEFAULT_EXPRESS_VERSION.to_string(),
            skip_runtime_check: false,
        }
    }
}

impl Settings {
    /// Load settings using the `--config` flag, then `PROJGEN_CONFIG`, then
    /// `projgen.yaml` in `cwd`
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(explicit, env_path.as_deref(), cwd)
    }

    fn load_from(explicit: Option<&Path>, env_path: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit.or(env_path) {
            return Self::from_file(path);
        }

        let implicit = cwd.join(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            return Self::from_file(&implicit);
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map of defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings =
            serde_yaml::from_str(content).context("Failed to parse settings YAML")?;

        if settings.runner.is_empty() {
            anyhow::bail!("`runner` must name a program");
        }
        if settings.install.is_empty() {
            anyhow::bail!("`install` must name a program");
        }

        Ok(settings)
    }
}
