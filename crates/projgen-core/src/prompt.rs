//! The questions asked during a run

use crate::error::ValidationError;
use crate::project::{FrameworkChoice, PackageSelection, ProjectName};
use std::io;

/// Source of the user's answers
///
/// Every method blocks until the question is answered. Choice questions are
/// closed sets, so only the project name can be invalid.
pub trait Prompter {
    fn select_framework(&mut self) -> io::Result<FrameworkChoice>;

    /// `framework` is the label shown in the question
    fn project_name(&mut self, framework: &str) -> io::Result<ProjectName>;

    /// Extra packages for the MERN server
    fn server_packages(&mut self) -> io::Result<PackageSelection>;
}

/// Keep asking until the answer is a valid project name
///
/// Each rejected answer is handed to `report` before the next question.
pub fn read_project_name<F, R>(mut ask: F, mut report: R) -> io::Result<ProjectName>
where
    F: FnMut() -> io::Result<String>,
    R: FnMut(&ValidationError) -> io::Result<()>,
{
    loop {
        match ProjectName::parse(ask()?) {
            Ok(name) => return Ok(name),
            Err(e) => report(&e)?,
        }
    }
}
