//! Charm-style CLI prompts using cliclack

use crate::config::Settings;
use crate::dispatch::{Completion, Dispatcher, Generation};
use crate::error::{GenerateError, ValidationError};
use crate::project::{FrameworkChoice, PackageSelection, ProjectName, ServerPackage};
use crate::prompt::{read_project_name, Prompter};
use crate::runtime::check::{self, NODE_DOWNLOAD_URL};
use crate::runtime::SystemRunner;
use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Framework label, answers the framework question
    pub framework: Option<String>,

    /// Project name, answers the name question when non-empty
    pub name: Option<String>,

    /// MERN server packages, answers the package question
    pub packages: Option<Vec<String>>,

    /// Settings file to use instead of the default lookup
    pub config: Option<PathBuf>,

    /// Skip the node/npm availability check
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// The framework as answered, which may be a label nobody recognizes
enum FrameworkAnswer {
    Known(FrameworkChoice),
    Unknown(String),
}

impl FrameworkAnswer {
    fn label(&self) -> String {
        match self {
            FrameworkAnswer::Known(choice) => choice.display_name().to_string(),
            FrameworkAnswer::Unknown(label) => label.clone(),
        }
    }
}

/// Prompter backed by cliclack, answering from CLI flags where given
pub struct ClackPrompter {
    name: Option<ProjectName>,
    packages: Option<Vec<String>>,
}

impl ClackPrompter {
    /// Fails only when `--yes` leaves no way to replace an invalid `--name`
    pub fn new(args: &CreateArgs) -> Result<Self, GenerateError> {
        Ok(Self {
            name: preset_name(args.name.as_deref(), args.yes)?,
            packages: args.packages.clone(),
        })
    }
}

/// Resolve `--name`. An invalid preset is an error under `--yes`, otherwise
/// it is reported and the question is asked instead.
fn preset_name(name: Option<&str>, yes: bool) -> Result<Option<ProjectName>, GenerateError> {
    match name.map(ProjectName::parse) {
        None => Ok(None),
        Some(Ok(name)) => Ok(Some(name)),
        Some(Err(e)) if yes => Err(e.into()),
        Some(Err(e)) => {
            cliclack::log::warning(e.to_string())?;
            Ok(None)
        }
    }
}

/// The one rule for typed names, shown inline by the input prompt
fn validate_name(input: &String) -> Result<(), ValidationError> {
    ProjectName::parse(input.as_str()).map(|_| ())
}

impl Prompter for ClackPrompter {
    fn select_framework(&mut self) -> io::Result<FrameworkChoice> {
        let mut select = cliclack::select("Select a framework for your project:");
        for choice in FrameworkChoice::ALL {
            select = select.item(choice, choice.display_name(), choice.hint());
        }
        select.interact()
    }

    fn project_name(&mut self, framework: &str) -> io::Result<ProjectName> {
        if let Some(name) = self.name.take() {
            cliclack::log::info(format!("Project name: {}", name))?;
            return Ok(name);
        }

        let question = format!("Enter your project name for {}:", framework);
        read_project_name(
            || {
                cliclack::input(&question)
                    .required(false)
                    .validate(validate_name)
                    .interact()
            },
            |e| cliclack::log::warning(e.to_string()),
        )
    }

    fn server_packages(&mut self) -> io::Result<PackageSelection> {
        if let Some(names) = self.packages.take() {
            let (selection, unknown) = parse_packages(&names);
            for name in unknown {
                cliclack::log::warning(format!("Unknown package: {}", name))?;
            }
            return Ok(selection);
        }

        let mut multi = cliclack::multiselect("Select additional packages to add to the server:");
        for package in ServerPackage::CATALOG {
            multi = multi.item(package, package.name(), "");
        }

        let selected: Vec<ServerPackage> = multi.required(false).interact()?;
        Ok(selected.into_iter().collect())
    }
}

/// Split package names into catalog packages and names that matched nothing
fn parse_packages(names: &[String]) -> (PackageSelection, Vec<String>) {
    let mut selection = PackageSelection::new();
    let mut unknown = Vec::new();

    for name in names.iter().filter(|n| !n.trim().is_empty()) {
        match ServerPackage::from_name(name) {
            Some(package) => {
                selection.insert(package);
            }
            None => unknown.push(name.clone()),
        }
    }

    (selection, unknown)
}

/// Run the CLI with interactive prompts
///
/// Returns the handle of a generator still running in the background so the
/// caller can let it finish before the process exits.
pub async fn run(args: CreateArgs) -> Result<Option<JoinHandle<Completion>>> {
    cliclack::intro("Welcome to Project Generator CLI!")?;

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let settings = Settings::load(args.config.as_deref(), &cwd)?;
    let mut prompter = match ClackPrompter::new(&args) {
        Ok(prompter) => prompter,
        Err(e) => return abort(e),
    };

    // Step 1: Select framework
    let framework = match &args.framework {
        Some(label) => match label.parse::<FrameworkChoice>() {
            Ok(choice) => {
                cliclack::log::info(format!("Framework: {}", choice))?;
                FrameworkAnswer::Known(choice)
            }
            Err(_) => FrameworkAnswer::Unknown(label.clone()),
        },
        None => FrameworkAnswer::Known(prompter.select_framework()?),
    };

    // Step 2: Project name
    let name = prompter.project_name(&framework.label())?;

    // Step 3: Check the node tooling the framework needs
    if let FrameworkAnswer::Known(choice) = &framework {
        if args.skip_runtime_check || settings.skip_runtime_check {
            cliclack::log::info("Skipping runtime check")?;
        } else if !check_runtimes(*choice, &settings, &args)? {
            return Ok(None);
        }
    }

    // Step 4: Generate
    let dispatcher = Dispatcher::new(cwd, settings, Arc::new(SystemRunner::new()));
    let result = match &framework {
        FrameworkAnswer::Known(choice) => dispatcher
            .generate(*choice, &name, &mut prompter)
            .await
            .map(Some),
        FrameworkAnswer::Unknown(label) => {
            dispatcher
                .generate_label(label, &name, &mut prompter)
                .await
        }
    };

    match result {
        Ok(Some(generation)) => finish(generation),
        Ok(None) => {
            cliclack::outro_cancel("Nothing was generated")?;
            Ok(None)
        }
        Err(e) => abort(e),
    }
}

fn abort(e: GenerateError) -> Result<Option<JoinHandle<Completion>>> {
    cliclack::log::error(format!("Error creating project: {}", e))?;
    cliclack::outro_cancel("Project generation stopped")?;
    Ok(None)
}

fn finish(generation: Generation) -> Result<Option<JoinHandle<Completion>>> {
    if generation.files_written > 0 {
        cliclack::log::success(format!(
            "Created {} files in {}",
            generation.files_written,
            generation.project_dir.display()
        ))?;
    }

    match generation.pending {
        Some(handle) => {
            cliclack::outro("Generator is running, its output follows when it finishes")?;
            Ok(Some(handle))
        }
        None => {
            cliclack::outro("Happy coding!")?;
            Ok(None)
        }
    }
}

/// Returns false when the user chose to stop and install Node.js first
fn check_runtimes(choice: FrameworkChoice, settings: &Settings, args: &CreateArgs) -> Result<bool> {
    if check::required_tools(choice, settings).is_empty() {
        return Ok(true);
    }

    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes(choice, settings) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));

            let node_version = runtimes
                .iter()
                .find(|r| r.name == "node")
                .and_then(|r| r.version.as_deref());
            if let Some(warning) =
                node_version.and_then(|v| check::node_version_warning(choice, v))
            {
                cliclack::log::warning(warning)?;
            }
            Ok(true)
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::warning(format!("{}", e))?;
            handle_missing_tools(args)
        }
    }
}

fn handle_missing_tools(args: &CreateArgs) -> Result<bool> {
    // In non-interactive mode, just continue
    if args.yes {
        cliclack::log::info("Continuing without the missing tools (--yes mode)")?;
        return Ok(true);
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item("continue", "Continue anyway", "generation may fail")
        .item(
            "docs",
            format!("Open the Node.js download page ({})", NODE_DOWNLOAD_URL),
            "",
        )
        .item("cancel", "Cancel", "")
        .interact()?;

    match action {
        "continue" => Ok(true),
        "docs" => {
            open::that(NODE_DOWNLOAD_URL)?;
            cliclack::outro("After installing Node.js, run this command again.")?;
            Ok(false)
        }
        _ => anyhow::bail!("Setup cancelled."),
    }
}
