//! Framework choices, project names and the server package catalog

use crate::error::ValidationError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Frameworks the generator knows how to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameworkChoice {
    NextJs,
    ReactJs,
    MernStack,
    ReactNative,
    Vanilla,
    NodeJs,
}

impl FrameworkChoice {
    /// All choices, in the order they are offered to the user
    pub const ALL: [FrameworkChoice; 6] = [
        FrameworkChoice::NextJs,
        FrameworkChoice::ReactJs,
        FrameworkChoice::MernStack,
        FrameworkChoice::ReactNative,
        FrameworkChoice::Vanilla,
        FrameworkChoice::NodeJs,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FrameworkChoice::NextJs => "Next.js",
            FrameworkChoice::ReactJs => "React.js",
            FrameworkChoice::MernStack => "MERN Stack",
            FrameworkChoice::ReactNative => "React Native",
            FrameworkChoice::Vanilla => "Vanilla",
            FrameworkChoice::NodeJs => "Node.js",
        }
    }

    /// Short description shown next to the choice in the select prompt
    pub fn hint(&self) -> &'static str {
        match self {
            FrameworkChoice::NextJs => "create-next-app",
            FrameworkChoice::ReactJs => "create-react-app",
            FrameworkChoice::MernStack => "Express server + React client",
            FrameworkChoice::ReactNative => "create-expo-app, blank template",
            FrameworkChoice::Vanilla => "HTML, CSS and JavaScript",
            FrameworkChoice::NodeJs => "Express server",
        }
    }

    /// Commands the user runs once the project exists
    pub fn next_steps(&self, name: &ProjectName) -> Vec<String> {
        match self {
            FrameworkChoice::NextJs => vec![format!("cd {}", name), "npm run dev".to_string()],
            FrameworkChoice::ReactJs => vec![format!("cd {}", name), "npm start".to_string()],
            FrameworkChoice::ReactNative => {
                vec![format!("cd {}", name), "npx expo start".to_string()]
            }
            FrameworkChoice::Vanilla => vec![
                format!("cd {}", name),
                "Open index.html in your browser".to_string(),
            ],
            FrameworkChoice::NodeJs => vec![
                format!("cd {}", name),
                "npm start (or npm run dev for auto-reload)".to_string(),
            ],
            FrameworkChoice::MernStack => vec![
                format!("cd {}/server && npm run dev", name),
                format!("cd {}/client && npm start", name),
            ],
        }
    }
}

impl fmt::Display for FrameworkChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A framework label that matched none of the known choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFramework(pub String);

impl fmt::Display for UnknownFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown framework: {}", self.0)
    }
}

impl std::error::Error for UnknownFramework {}

impl FromStr for FrameworkChoice {
    type Err = UnknownFramework;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "next.js" | "nextjs" | "next" => Ok(FrameworkChoice::NextJs),
            "react.js" | "reactjs" | "react" => Ok(FrameworkChoice::ReactJs),
            "mern stack" | "mern" => Ok(FrameworkChoice::MernStack),
            "react native" | "react-native" | "expo" => Ok(FrameworkChoice::ReactNative),
            "vanilla" => Ok(FrameworkChoice::Vanilla),
            "node.js" | "nodejs" | "node" => Ok(FrameworkChoice::NodeJs),
            _ => Err(UnknownFramework(s.to_string())),
        }
    }
}

/// Non-empty project name, used verbatim as a directory name and inside
/// generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        if input.is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(ProjectName(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Optional packages offered for the MERN server
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServerPackage {
    Nodemon,
    Mongoose,
    Dotenv,
    Cors,
    Bcrypt,
}

impl ServerPackage {
    pub const CATALOG: [ServerPackage; 5] = [
        ServerPackage::Nodemon,
        ServerPackage::Mongoose,
        ServerPackage::Dotenv,
        ServerPackage::Cors,
        ServerPackage::Bcrypt,
    ];

    /// npm package name
    pub fn name(&self) -> &'static str {
        match self {
            ServerPackage::Nodemon => "nodemon",
            ServerPackage::Mongoose => "mongoose",
            ServerPackage::Dotenv => "dotenv",
            ServerPackage::Cors => "cors",
            ServerPackage::Bcrypt => "bcrypt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::CATALOG
            .into_iter()
            .find(|pkg| pkg.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ServerPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of catalog packages picked by the user
pub type PackageSelection = BTreeSet<ServerPackage>;
