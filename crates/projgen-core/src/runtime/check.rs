//! Detection of the Node.js tooling each framework needs

use crate::config::Settings;
use crate::project::FrameworkChoice;
use anyhow::Result;
use semver::{Version, VersionReq};
use std::process::Command;

/// Where to send users who are missing Node.js
pub const NODE_DOWNLOAD_URL: &str = "https://nodejs.org";

/// Runtime detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    pub fn missing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            available: false,
        }
    }
}

/// Check whether `program --version` runs successfully
pub fn check_tool(program: &str) -> RuntimeInfo {
    let output = if cfg!(target_os = "windows") {
        Command::new("cmd")
            .args(["/C", program, "--version"])
            .output()
    } else {
        Command::new(program).arg("--version").output()
    };

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: program.to_string(),
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo::missing(program),
    }
}

/// Programs that must be on PATH for `choice` to generate
pub fn required_tools(choice: FrameworkChoice, settings: &Settings) -> Vec<String> {
    let runner = settings.runner.first().cloned();
    let installer = settings.install.first().cloned();

    let tools: Vec<Option<String>> = match choice {
        FrameworkChoice::Vanilla => return Vec::new(),
        FrameworkChoice::NextJs | FrameworkChoice::ReactJs | FrameworkChoice::ReactNative => {
            vec![Some("node".to_string()), runner]
        }
        FrameworkChoice::NodeJs => vec![Some("node".to_string()), installer],
        FrameworkChoice::MernStack => vec![Some("node".to_string()), installer, runner],
    };

    let mut unique: Vec<String> = Vec::new();
    for tool in tools.into_iter().flatten() {
        if !unique.contains(&tool) {
            unique.push(tool);
        }
    }
    unique
}

/// Oldest Node.js the framework's generator supports
pub fn minimum_node_version(choice: FrameworkChoice) -> Option<VersionReq> {
    let req = match choice {
        FrameworkChoice::Vanilla => return None,
        FrameworkChoice::NextJs => ">=18.18.0",
        FrameworkChoice::ReactNative => ">=18.0.0",
        FrameworkChoice::ReactJs | FrameworkChoice::MernStack => ">=14.0.0",
        FrameworkChoice::NodeJs => ">=12.0.0",
    };
    VersionReq::parse(req).ok()
}

/// Parse a `node --version` style string such as `v20.11.1`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Warning text when the installed Node.js is older than the framework needs.
/// Unparseable versions produce no warning.
pub fn node_version_warning(choice: FrameworkChoice, node_version: &str) -> Option<String> {
    let req = minimum_node_version(choice)?;
    let version = parse_version(node_version)?;

    if req.matches(&version) {
        None
    } else {
        Some(format!(
            "{} expects Node.js {} but {} is installed",
            choice, req, node_version.trim()
        ))
    }
}

/// Check the tools `choice` needs, failing with the list of missing ones
pub fn check_runtimes(choice: FrameworkChoice, settings: &Settings) -> Result<Vec<RuntimeInfo>> {
    check_runtimes_with(choice, settings, check_tool)
}

pub(crate) fn check_runtimes_with<P>(
    choice: FrameworkChoice,
    settings: &Settings,
    probe: P,
) -> Result<Vec<RuntimeInfo>>
where
    P: Fn(&str) -> RuntimeInfo,
{
    let mut results = Vec::new();
    let mut missing = Vec::new();

    for tool in required_tools(choice, settings) {
        let info = probe(&tool);
        if info.available {
            results.push(info);
        } else if tool == "node" {
            missing.push(format!("Node.js (install from {})", NODE_DOWNLOAD_URL));
        } else {
            missing.push(tool);
        }
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required tools:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}
