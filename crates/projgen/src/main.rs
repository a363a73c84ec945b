//! projgen - interactive starter-project generator

use anyhow::Result;
use clap::{Parser, Subcommand};
use projgen_core::tui::CreateArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "projgen")]
#[command(about = "Generate Next.js, React, MERN, React Native, Vanilla and Node.js starter projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Framework to generate (Next.js, React.js, MERN Stack, React Native, Vanilla, Node.js)
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Project name, also used as the directory name
    #[arg(short, long)]
    pub name: Option<String>,

    /// MERN server packages (comma-separated: nodemon,mongoose,dotenv,cors,bcrypt)
    #[arg(short, long, value_delimiter = ',')]
    pub packages: Option<Vec<String>>,

    /// Settings file (defaults to $PROJGEN_CONFIG, then ./projgen.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the node/npm availability check
    #[arg(long = "skip-runtime-check")]
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            framework: args.framework,
            name: args.name,
            packages: args.packages,
            config: args.config,
            skip_runtime_check: args.skip_runtime_check,
            yes: args.yes,
        }
    }
}

async fn create(args: CreateArgs) -> Result<()> {
    let pending = projgen_core::run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    // Let a background generator finish before the runtime shuts down
    if let Some(handle) = pending? {
        handle.await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => create(create_args.into()).await,
        // No subcommand provided, default to create behavior (interactive mode)
        None => create(CreateArgs::default()).await,
    }
}
