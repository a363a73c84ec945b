//! package.json model for generated servers

use crate::project::{PackageSelection, ProjectName, ServerPackage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry point written by the server recipes
pub const SERVER_ENTRY: &str = "server.js";

/// Version requested for every package picked from the catalog
pub const SELECTED_PACKAGE_VERSION: &str = "latest";

/// npm run scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripts {
    pub start: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<String>,
}

/// The subset of package.json the generator writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub name: String,
    pub version: String,
    pub main: String,
    pub scripts: Scripts,
    pub dependencies: BTreeMap<String, String>,
}

impl ProjectManifest {
    /// Manifest for the standalone Node.js server: express plus nodemon-based `dev`
    pub fn node_server(name: &ProjectName, express_version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            main: SERVER_ENTRY.to_string(),
            scripts: Scripts {
                start: plain_run(),
                dev: Some(reload_run()),
            },
            dependencies: BTreeMap::from([("express".to_string(), express_version.to_string())]),
        }
    }

    /// Manifest for the MERN `server` directory
    ///
    /// `dev` only uses nodemon when it was selected, since nothing else
    /// installs it.
    pub fn mern_server(
        name: &ProjectName,
        selection: &PackageSelection,
        express_version: &str,
    ) -> Self {
        let mut dependencies =
            BTreeMap::from([("express".to_string(), express_version.to_string())]);
        for package in selection {
            dependencies.insert(
                package.name().to_string(),
                SELECTED_PACKAGE_VERSION.to_string(),
            );
        }

        let dev = if selection.contains(&ServerPackage::Nodemon) {
            reload_run()
        } else {
            plain_run()
        };

        Self {
            name: format!("{}-server", name),
            version: "1.0.0".to_string(),
            main: SERVER_ENTRY.to_string(),
            scripts: Scripts {
                start: plain_run(),
                dev: Some(dev),
            },
            dependencies,
        }
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn plain_run() -> String {
    format!("node {}", SERVER_ENTRY)
}

fn reload_run() -> String {
    format!("nodemon {}", SERVER_ENTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ProjectName {
        ProjectName::parse(s).unwrap()
    }

    #[test]
    fn test_node_server_manifest() {
        let manifest = ProjectManifest::node_server(&name("demo"), "^4.17.1");
        assert_eq!(manifest.name, "demo");
        assert_eq!(manifest.main, "server.js");
        assert_eq!(manifest.scripts.start, "node server.js");
        assert_eq!(manifest.scripts.dev.as_deref(), Some("nodemon server.js"));
        assert_eq!(
            manifest.dependencies,
            BTreeMap::from([("express".to_string(), "^4.17.1".to_string())])
        );
    }

    #[test]
    fn test_mern_manifest_contains_exactly_selection() {
        let selection = PackageSelection::from([ServerPackage::Mongoose, ServerPackage::Dotenv]);
        let manifest = ProjectManifest::mern_server(&name("shop"), &selection, "^4.17.1");

        assert_eq!(manifest.name, "shop-server");
        assert_eq!(
            manifest.dependencies,
            BTreeMap::from([
                ("express".to_string(), "^4.17.1".to_string()),
                ("mongoose".to_string(), "latest".to_string()),
                ("dotenv".to_string(), "latest".to_string()),
            ])
        );
        // nodemon not selected, so dev falls back to plain node
        assert_eq!(manifest.scripts.dev.as_deref(), Some("node server.js"));
    }

    #[test]
    fn test_mern_dev_uses_nodemon_when_selected() {
        let selection = PackageSelection::from([ServerPackage::Nodemon]);
        let manifest = ProjectManifest::mern_server(&name("shop"), &selection, "^4.17.1");
        assert_eq!(manifest.scripts.dev.as_deref(), Some("nodemon server.js"));
        assert_eq!(manifest.dependencies["nodemon"], "latest");
    }

    #[test]
    fn test_json_layout() {
        let manifest = ProjectManifest::node_server(&name("demo"), "^4.17.1");
        let json = manifest.to_json().unwrap();

        assert!(json.starts_with("{\n  \"name\": \"demo\","));
        assert!(json.contains("\n    \"start\": \"node server.js\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dependencies"]["express"], "^4.17.1");

        let parsed: ProjectManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn test_dev_script_omitted_when_absent() {
        let mut manifest = ProjectManifest::node_server(&name("demo"), "^4.17.1");
        manifest.scripts.dev = None;
        let json = manifest.to_json().unwrap();
        assert!(!json.contains("\"dev\""));

        let parsed: ProjectManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.scripts.dev, None);
    }
}
