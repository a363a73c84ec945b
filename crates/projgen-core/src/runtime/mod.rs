//! Runtime detection and external process execution
//!
//! This module provides:
//! - Detection of node/npm/npx and the Node.js version each framework needs
//! - The process runner used for scaffolding generators and installers

pub mod check;
pub mod process;

pub use check::{check_runtimes, check_tool, node_version_warning, RuntimeInfo};
pub use process::{spawn_detached, CommandOutput, ExternalCommand, ProcessRunner, SystemRunner};
