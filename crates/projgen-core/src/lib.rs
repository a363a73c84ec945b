//! Project Generator Core - library behind the `projgen` CLI
//!
//! Asks for a framework and a project name, then either hands the project to
//! the framework's own generator (Next.js, React.js, React Native) or writes a
//! small starter from literal templates (Vanilla, Node.js, MERN).
//!
//! # Architecture
//!
//! - **Prompts** - the `Prompter` trait; the cliclack implementation lives in `tui`
//! - **Templates** - literal file contents, package.json model, emitter
//! - **Runtime** - child-process runner and node/npm detection
//! - **Dispatch** - maps a `FrameworkChoice` to a `Strategy` and runs it
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and the `run` entry point
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use projgen_core::{Dispatcher, FrameworkChoice, ProjectName, Settings, SystemRunner};
//! use std::sync::Arc;
//!
//! let dispatcher = Dispatcher::new(".", Settings::default(), Arc::new(SystemRunner::new()));
//! let name = ProjectName::parse("site")?;
//! let generation = dispatcher
//!     .generate(FrameworkChoice::Vanilla, &name, &mut my_prompter)
//!     .await?;
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod project;
pub mod prompt;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::Settings;
pub use dispatch::{Completion, Dispatcher, Generation, Scaffolder, Strategy};
pub use error::{GenerateError, ValidationError};
pub use project::{FrameworkChoice, PackageSelection, ProjectName, ServerPackage};
pub use prompt::Prompter;
pub use runtime::{ExternalCommand, ProcessRunner, SystemRunner};

#[cfg(feature = "tui")]
pub use tui::run;
