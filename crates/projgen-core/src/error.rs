//! Error taxonomy for project generation

use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input, recovered by asking again
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Project name cannot be empty!")]
    EmptyProjectName,
}

/// Errors that abort a generation recipe
///
/// Nothing is rolled back when one of these is returned: files written before
/// the failing step stay on disk.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("Failed to serialize package.json: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("{action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}{}", describe_exit(.code), describe_stderr(.stderr))]
    ExitStatus {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl GenerateError {
    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        GenerateError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from an external process rather than the filesystem
    pub fn is_process_error(&self) -> bool {
        matches!(
            self,
            GenerateError::Spawn { .. } | GenerateError::ExitStatus { .. }
        )
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err: GenerateError = ValidationError::EmptyProjectName.into();
        assert_eq!(err.to_string(), "Project name cannot be empty!");
    }

    #[test]
    fn test_filesystem_error_names_path() {
        let err = GenerateError::filesystem(
            "Failed to create directory",
            "/tmp/demo",
            std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        );
        let message = err.to_string();
        assert!(message.starts_with("Failed to create directory /tmp/demo"));
        assert!(!err.is_process_error());
    }

    #[test]
    fn test_exit_status_message() {
        let err = GenerateError::ExitStatus {
            command: "npm install".to_string(),
            code: Some(1),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`npm install` exited with exit code 1");
        assert!(err.is_process_error());

        let killed = GenerateError::ExitStatus {
            command: "npx create-react-app client".to_string(),
            code: None,
            stderr: "npm ERR! aborted\n".to_string(),
        };
        let message = killed.to_string();
        assert!(message.contains("terminated by signal"));
        assert!(message.ends_with("\nnpm ERR! aborted"));
    }
}
