//! Literal file contents for the locally generated project types

use crate::project::ProjectName;
use std::path::PathBuf;

/// Greeting returned by the standalone Node.js server
pub const NODE_SERVER_GREETING: &str = "Welcome to the Node.js server!";

/// Greeting returned by the MERN stack server
pub const MERN_SERVER_GREETING: &str = "Welcome to the MERN Stack server!";

/// Port the generated servers listen on unless `PORT` is set
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Subdirectory holding the MERN server
pub const MERN_SERVER_DIR: &str = "server";

/// Subdirectory the MERN client generator creates
pub const MERN_CLIENT_DIR: &str = "client";

/// A file to write, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub content: String,
}

impl TemplateFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Directories and files making up one emission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    /// Empty subdirectories to create, relative to the project root
    pub directories: Vec<PathBuf>,
    pub files: Vec<TemplateFile>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.push(path.into());
        self
    }

    pub fn file(mut self, file: TemplateFile) -> Self {
        self.files.push(file);
        self
    }
}

/// index.html, style.css and app.js
pub fn vanilla(name: &ProjectName) -> TemplateSet {
    TemplateSet::new()
        .file(TemplateFile::new("index.html", vanilla_html(name)))
        .file(TemplateFile::new("style.css", VANILLA_CSS))
        .file(TemplateFile::new(
            "app.js",
            format!("console.log('Welcome to {}!');", name),
        ))
}

/// Express server at the project root
pub fn node_server() -> TemplateSet {
    TemplateSet::new().file(TemplateFile::new("server.js", server_module(NODE_SERVER_GREETING)))
}

/// Express server under `server/`
pub fn mern_server() -> TemplateSet {
    TemplateSet::new()
        .directory(MERN_SERVER_DIR)
        .file(TemplateFile::new(
            PathBuf::from(MERN_SERVER_DIR).join("server.js"),
            server_module(MERN_SERVER_GREETING),
        ))
}

fn vanilla_html(name: &ProjectName) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{name}</title>
  <link rel="stylesheet" href="style.css">
</head>
<body>
  <h1>Welcome to {name}!</h1>
  <script src="app.js"></script>
</body>
</html>"#
    )
}

const VANILLA_CSS: &str = r#"body {
  font-family: Arial, sans-serif;
  text-align: center;
  padding: 50px;
}
h1 {
  color: #333;
}"#;

fn server_module(greeting: &str) -> String {
    format!(
        r#"const express = require('express');
const app = express();
const port = process.env.PORT || {port};

app.get('/', (req, res) => {{
  res.send('{greeting}');
}});

app.listen(port, () => {{
  console.log(`Server is running on http://localhost:${{port}}`);
}});"#,
        port = DEFAULT_SERVER_PORT,
        greeting = greeting
    )
}
