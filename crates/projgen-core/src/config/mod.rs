//! Generator settings
//!
//! Settings come from a YAML file (explicit path, `PROJGEN_CONFIG`, or
//! `projgen.yaml` in the working directory) and fall back to npm/npx defaults.

pub mod settings;

pub use settings::{Settings, CONFIG_ENV, DEFAULT_CONFIG_FILE};
