//! Literal project templates and their emission
//!
//! This module provides:
//! - Fixed file contents for the Vanilla, Node.js and MERN server recipes
//! - The package.json model written next to generated servers
//! - The emitter that creates a project directory and writes files into it

pub mod emitter;
pub mod manifest;
pub mod recipes;

pub use emitter::{emit, write_files};
pub use manifest::{ProjectManifest, Scripts};
pub use recipes::{TemplateFile, TemplateSet};
