//! Mapping a framework choice to a generation strategy and running it
//!
//! Next.js, React.js and React Native are handed to their own generators,
//! which run in the background and report when they exit. Vanilla, Node.js
//! and MERN are built locally from literal templates; their steps run in
//! order and the first failure stops the recipe without undoing earlier
//! steps.

use crate::config::Settings;
use crate::error::GenerateError;
use crate::project::{FrameworkChoice, PackageSelection, ProjectName};
use crate::prompt::Prompter;
use crate::runtime::process::{spawn_detached, ExternalCommand, ProcessRunner};
use crate::templates::manifest::ProjectManifest;
use crate::templates::recipes::{self, TemplateFile, MERN_CLIENT_DIR, MERN_SERVER_DIR};
use crate::templates::{emit, write_files};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// External project generators the tool delegates to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaffolder {
    CreateNextApp,
    CreateReactApp,
    CreateExpoApp,
}

impl Scaffolder {
    /// Arguments after the runner (e.g. `npx`) for generating into `target`
    pub fn args(&self, target: &str) -> Vec<String> {
        let args: &[&str] = match self {
            Scaffolder::CreateNextApp => &["create-next-app@latest"],
            Scaffolder::CreateReactApp => &["create-react-app"],
            Scaffolder::CreateExpoApp => &["create-expo-app", "--template", "blank"],
        };
        args.iter()
            .map(|a| a.to_string())
            .chain(std::iter::once(target.to_string()))
            .collect()
    }
}

/// How a framework is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Hand the whole project to an external generator
    Delegate(Scaffolder),
    /// Static HTML, CSS and JavaScript files only
    Vanilla,
    /// Express server written locally, then `npm install`
    NodeServer,
    /// Express server in `server/`, `npm install`, then a React client generator
    MernStack,
}

impl Strategy {
    pub fn for_choice(choice: FrameworkChoice) -> Self {
        match choice {
            FrameworkChoice::NextJs => Strategy::Delegate(Scaffolder::CreateNextApp),
            FrameworkChoice::ReactJs => Strategy::Delegate(Scaffolder::CreateReactApp),
            FrameworkChoice::ReactNative => Strategy::Delegate(Scaffolder::CreateExpoApp),
            FrameworkChoice::Vanilla => Strategy::Vanilla,
            FrameworkChoice::NodeJs => Strategy::NodeServer,
            FrameworkChoice::MernStack => Strategy::MernStack,
        }
    }
}

/// Result of a background generator, delivered when it exits
#[derive(Debug)]
pub enum Completion {
    Succeeded { warnings: Option<String> },
    Failed(GenerateError),
}

impl Completion {
    pub fn is_success(&self) -> bool {
        matches!(self, Completion::Succeeded { .. })
    }
}

/// What a dispatch left behind
#[derive(Debug)]
pub struct Generation {
    pub project_dir: PathBuf,
    /// Files written by local templates (not by external generators)
    pub files_written: usize,
    /// Background generator still running, if any
    pub pending: Option<JoinHandle<Completion>>,
}

/// Runs the strategy for a framework choice in `base_dir`
pub struct Dispatcher {
    base_dir: PathBuf,
    settings: Settings,
    runner: Arc<dyn ProcessRunner>,
}

impl Dispatcher {
    pub fn new(base_dir: impl Into<PathBuf>, settings: Settings, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            base_dir: base_dir.into(),
            settings,
            runner,
        }
    }

    /// Dispatch on a framework label. Unknown labels report "Invalid choice!"
    /// and generate nothing.
    pub async fn generate_label(
        &self,
        label: &str,
        name: &ProjectName,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<Generation>, GenerateError> {
        match label.parse::<FrameworkChoice>() {
            Ok(choice) => self.generate(choice, name, prompter).await.map(Some),
            Err(_) => {
                println!("{}", "Invalid choice!".red());
                Ok(None)
            }
        }
    }

    pub async fn generate(
        &self,
        choice: FrameworkChoice,
        name: &ProjectName,
        prompter: &mut dyn Prompter,
    ) -> Result<Generation, GenerateError> {
        match Strategy::for_choice(choice) {
            Strategy::Delegate(scaffolder) => Ok(self.delegate(choice, scaffolder, name)),
            Strategy::Vanilla => self.vanilla(name).await,
            Strategy::NodeServer => self.node_server(name).await,
            Strategy::MernStack => self.mern_stack(name, prompter).await,
        }
    }

    fn project_dir(&self, name: &ProjectName) -> PathBuf {
        self.base_dir.join(name.as_str())
    }

    fn delegate(&self, choice: FrameworkChoice, scaffolder: Scaffolder, name: &ProjectName) -> Generation {
        println!(
            "{}",
            format!("\nGenerating project: {} with {}...\n", name, choice).green()
        );

        let project_dir = self.project_dir(name);
        let command = ExternalCommand::from_argv(
            &self.settings.runner,
            scaffolder.args(name.as_str()),
            &self.base_dir,
        );
        let name = name.clone();

        let handle = spawn_detached(self.runner.clone(), command, move |result| match result {
            Err(e) => {
                eprintln!("{}", format!("Error: {}", e).red());
                Completion::Failed(e)
            }
            Ok(output) => {
                let warnings = output.warnings().map(str::to_string);
                if let Some(warnings) = &warnings {
                    println!("{}", format!("Warnings: {}", warnings).yellow());
                }
                println!("{}", format!("\n{}", output.stdout).blue());
                print_success(
                    &format!("Project {} created successfully!", name),
                    &choice.next_steps(&name),
                );
                Completion::Succeeded { warnings }
            }
        });

        Generation {
            project_dir,
            files_written: 0,
            pending: Some(handle),
        }
    }

    async fn vanilla(&self, name: &ProjectName) -> Result<Generation, GenerateError> {
        println!(
            "{}",
            format!("Creating Vanilla JavaScript project: {}\n", name).green()
        );

        let project_dir = self.project_dir(name);
        let written = emit(&project_dir, &recipes::vanilla(name)).await?;

        print_success(
            &format!("Vanilla project {} created successfully!", name),
            &FrameworkChoice::Vanilla.next_steps(name),
        );

        Ok(Generation {
            project_dir,
            files_written: written.len(),
            pending: None,
        })
    }

    async fn node_server(&self, name: &ProjectName) -> Result<Generation, GenerateError> {
        println!("{}", format!("Creating Node.js project: {}\n", name).green());

        let project_dir = self.project_dir(name);
        let manifest = ProjectManifest::node_server(name, &self.settings.express_version);
        let set = recipes::node_server().file(TemplateFile::new("package.json", manifest.to_json()?));
        let written = emit(&project_dir, &set).await?;

        println!("{}", "\nInstalling dependencies...\n".green());
        self.install(&project_dir).await?;

        print_success(
            &format!("Node.js project {} created successfully!", name),
            &FrameworkChoice::NodeJs.next_steps(name),
        );

        Ok(Generation {
            project_dir,
            files_written: written.len(),
            pending: None,
        })
    }

    async fn mern_stack(
        &self,
        name: &ProjectName,
        prompter: &mut dyn Prompter,
    ) -> Result<Generation, GenerateError> {
        println!("{}", format!("Creating MERN Stack project: {}\n", name).green());

        let project_dir = self.project_dir(name);
        let mut written = emit(&project_dir, &recipes::mern_server()).await?;

        let selection = prompter.server_packages()?;
        let manifest =
            ProjectManifest::mern_server(name, &selection, &self.settings.express_version);
        let manifest_file = TemplateFile::new(
            PathBuf::from(MERN_SERVER_DIR).join("package.json"),
            manifest.to_json()?,
        );
        written.extend(write_files(&project_dir, &[manifest_file]).await?);

        println!("{}", "\nInstalling server dependencies...\n".green());
        self.install(&project_dir.join(MERN_SERVER_DIR)).await?;

        println!("{}", "\nCreating React frontend...\n".green());
        let handle = self.spawn_client(name, selection, &project_dir);

        Ok(Generation {
            project_dir,
            files_written: written.len(),
            pending: Some(handle),
        })
    }

    fn spawn_client(
        &self,
        name: &ProjectName,
        selection: PackageSelection,
        project_dir: &Path,
    ) -> JoinHandle<Completion> {
        let command = ExternalCommand::from_argv(
            &self.settings.runner,
            Scaffolder::CreateReactApp.args(MERN_CLIENT_DIR),
            project_dir,
        );
        let name = name.clone();

        spawn_detached(self.runner.clone(), command, move |result| match result {
            Err(e) => {
                eprintln!("{}", format!("Error creating React app: {}", e).red());
                Completion::Failed(e)
            }
            Ok(output) => {
                let warnings = output.warnings().map(str::to_string);
                if let Some(warnings) = &warnings {
                    println!("{}", format!("Warnings: {}", warnings).yellow());
                }
                println!("{}", format!("\n{}", output.stdout).blue());
                print_success(
                    &format!("MERN Stack project {} created successfully!", name),
                    &FrameworkChoice::MernStack.next_steps(&name),
                );
                println!(
                    "{}",
                    format!("Navigate to your project with: cd {}", name).yellow()
                );
                if !selection.is_empty() {
                    println!(
                        "{}",
                        "\nAll selected packages have been installed!".bold().cyan()
                    );
                }
                Completion::Succeeded { warnings }
            }
        })
    }

    async fn install(&self, dir: &Path) -> Result<(), GenerateError> {
        let command = ExternalCommand::from_argv(&self.settings.install, Vec::<String>::new(), dir);
        self.runner.run_inherited(&command).await
    }
}

fn print_success(headline: &str, steps: &[String]) {
    println!();
    println!("{}", headline.bold().green());
    println!();
    println!("  Next steps");
    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ServerPackage;
    use crate::prompt::testing::ScriptedPrompter;
    use crate::runtime::process::testing::{Mode, RecordingRunner};
    use tempfile::TempDir;

    fn name(s: &str) -> ProjectName {
        ProjectName::parse(s).unwrap()
    }

    fn dispatcher(root: &TempDir, runner: &Arc<RecordingRunner>) -> Dispatcher {
        Dispatcher::new(root.path(), Settings::default(), runner.clone())
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_every_choice_has_one_strategy() {
        let table = [
            (FrameworkChoice::NextJs, Strategy::Delegate(Scaffolder::CreateNextApp)),
            (FrameworkChoice::ReactJs, Strategy::Delegate(Scaffolder::CreateReactApp)),
            (FrameworkChoice::ReactNative, Strategy::Delegate(Scaffolder::CreateExpoApp)),
            (FrameworkChoice::Vanilla, Strategy::Vanilla),
            (FrameworkChoice::NodeJs, Strategy::NodeServer),
            (FrameworkChoice::MernStack, Strategy::MernStack),
        ];
        assert_eq!(table.len(), FrameworkChoice::ALL.len());
        for (choice, expected) in table {
            assert_eq!(Strategy::for_choice(choice), expected, "{:?}", choice);
        }
    }

    #[test]
    fn test_scaffolder_args() {
        assert_eq!(
            Scaffolder::CreateNextApp.args("demo"),
            vec!["create-next-app@latest", "demo"]
        );
        assert_eq!(
            Scaffolder::CreateExpoApp.args("demo"),
            vec!["create-expo-app", "--template", "blank", "demo"]
        );
    }

    #[tokio::test]
    async fn test_next_js_is_delegated() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate(FrameworkChoice::NextJs, &name("demo"), &mut prompter)
            .await
            .unwrap();

        assert_eq!(generation.files_written, 0);
        let completion = generation.pending.unwrap().await.unwrap();
        assert!(completion.is_success());

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Mode::Captured);
        assert_eq!(calls[0].1.command_line(), "npx create-next-app@latest demo");
        assert_eq!(calls[0].1.cwd, root.path());
        // The generator owns the directory; nothing is written locally
        assert!(!root.path().join("demo").exists());
    }

    #[tokio::test]
    async fn test_react_native_uses_blank_template() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate(FrameworkChoice::ReactNative, &name("app"), &mut prompter)
            .await
            .unwrap();
        generation.pending.unwrap().await.unwrap();

        assert_eq!(
            runner.calls()[0].1.command_line(),
            "npx create-expo-app --template blank app"
        );
    }

    #[tokio::test]
    async fn test_delegated_failure_is_reported_not_raised() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new().with_result(
            "npx create-react-app demo",
            1,
            "",
            "npm ERR! code E404",
        ));
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate(FrameworkChoice::ReactJs, &name("demo"), &mut prompter)
            .await
            .unwrap();

        match generation.pending.unwrap().await.unwrap() {
            Completion::Failed(e) => assert!(e.to_string().contains("E404")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delegated_stderr_is_a_warning() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new().with_result(
            "npx create-react-app demo",
            0,
            "Happy hacking!",
            "npm WARN deprecated",
        ));
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate(FrameworkChoice::ReactJs, &name("demo"), &mut prompter)
            .await
            .unwrap();

        match generation.pending.unwrap().await.unwrap() {
            Completion::Succeeded { warnings } => {
                assert_eq!(warnings.as_deref(), Some("npm WARN deprecated"))
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_vanilla_writes_three_files_and_runs_nothing() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate(FrameworkChoice::Vanilla, &name("site"), &mut prompter)
            .await
            .unwrap();

        assert_eq!(generation.files_written, 3);
        assert!(generation.pending.is_none());
        assert!(runner.calls().is_empty());

        let dir = root.path().join("site");
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 3);
        assert!(std::fs::read_to_string(dir.join("app.js"))
            .unwrap()
            .contains("site"));
    }

    #[tokio::test]
    async fn test_node_server_recipe() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate(FrameworkChoice::NodeJs, &name("demo"), &mut prompter)
            .await
            .unwrap();

        let dir = root.path().join("demo");
        assert_eq!(generation.project_dir, dir);
        assert_eq!(generation.files_written, 2);

        let server = std::fs::read_to_string(dir.join("server.js")).unwrap();
        assert!(server.contains("process.env.PORT || 5000"));

        let manifest = read_json(&dir.join("package.json"));
        assert_eq!(manifest["dependencies"]["express"], "^4.17.1");
        assert_eq!(manifest["scripts"]["start"], "node server.js");
        assert_eq!(manifest["scripts"]["dev"], "nodemon server.js");

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Mode::Inherited);
        assert_eq!(calls[0].1.command_line(), "npm install");
        assert_eq!(calls[0].1.cwd, dir);
        assert_eq!(prompter.package_prompts, 0);
    }

    #[tokio::test]
    async fn test_existing_directory_aborts_before_install() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("demo")).unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default();

        let err = dispatcher(&root, &runner)
            .generate(FrameworkChoice::NodeJs, &name("demo"), &mut prompter)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Filesystem { .. }));
        assert!(runner.calls().is_empty());
        assert!(!root.path().join("demo").join("server.js").exists());
    }

    #[tokio::test]
    async fn test_mern_stack_recipe() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default()
            .with_packages(PackageSelection::from([ServerPackage::Mongoose, ServerPackage::Dotenv]));

        let generation = dispatcher(&root, &runner)
            .generate(FrameworkChoice::MernStack, &name("shop"), &mut prompter)
            .await
            .unwrap();
        let completion = generation.pending.unwrap().await.unwrap();
        assert!(completion.is_success());
        assert_eq!(prompter.package_prompts, 1);

        let server_dir = root.path().join("shop").join("server");
        assert!(server_dir.join("server.js").is_file());

        let manifest = read_json(&server_dir.join("package.json"));
        assert_eq!(manifest["name"], "shop-server");
        let deps = manifest["dependencies"].as_object().unwrap();
        assert_eq!(deps.len(), 3);
        assert_eq!(deps["express"], "^4.17.1");
        assert_eq!(deps["mongoose"], "latest");
        assert_eq!(deps["dotenv"], "latest");
        assert_eq!(manifest["scripts"]["dev"], "node server.js");

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, Mode::Inherited);
        assert_eq!(calls[0].1.command_line(), "npm install");
        assert_eq!(calls[0].1.cwd, server_dir);
        assert_eq!(calls[1].0, Mode::Captured);
        assert_eq!(calls[1].1.command_line(), "npx create-react-app client");
        assert_eq!(calls[1].1.cwd, root.path().join("shop"));
    }

    #[tokio::test]
    async fn test_mern_install_failure_skips_client() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new().with_result("npm install", 1, "", ""));
        let mut prompter = ScriptedPrompter::default();

        let err = dispatcher(&root, &runner)
            .generate(FrameworkChoice::MernStack, &name("shop"), &mut prompter)
            .await
            .unwrap_err();

        assert!(err.is_process_error());
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Mode::Inherited);
        // Earlier steps stay on disk
        assert!(root.path().join("shop/server/package.json").is_file());
    }

    #[tokio::test]
    async fn test_custom_runner_and_installer() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let settings = Settings {
            runner: vec!["pnpm".to_string(), "dlx".to_string()],
            install: vec!["pnpm".to_string(), "install".to_string()],
            express_version: "^5.0.0".to_string(),
            ..Settings::default()
        };
        let mut prompter = ScriptedPrompter::default()
            .with_packages(PackageSelection::from([ServerPackage::Nodemon]));

        let generation = Dispatcher::new(root.path(), settings, runner.clone())
            .generate(FrameworkChoice::MernStack, &name("shop"), &mut prompter)
            .await
            .unwrap();
        generation.pending.unwrap().await.unwrap();

        let manifest = read_json(&root.path().join("shop/server/package.json"));
        assert_eq!(manifest["dependencies"]["express"], "^5.0.0");
        assert_eq!(manifest["scripts"]["dev"], "nodemon server.js");

        let lines: Vec<String> = runner.calls().iter().map(|(_, c)| c.command_line()).collect();
        assert_eq!(lines, vec!["pnpm install", "pnpm dlx create-react-app client"]);
    }

    #[tokio::test]
    async fn test_unknown_label_does_nothing() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate_label("Svelte", &name("demo"), &mut prompter)
            .await
            .unwrap();

        assert!(generation.is_none());
        assert!(runner.calls().is_empty());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_label_dispatch_matches_enum() {
        let root = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        let mut prompter = ScriptedPrompter::default();

        let generation = dispatcher(&root, &runner)
            .generate_label("Vanilla", &name("site"), &mut prompter)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(generation.files_written, 3);
    }
}
