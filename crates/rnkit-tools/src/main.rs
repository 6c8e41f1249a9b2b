//! rnkit CLI - React Native project scaffolding and environment management

use anyhow::Result;
use clap::{Parser, Subcommand};
use rnkit_core::tui::{self, CreateArgs, DestroyArgs, RemoveArgs, SetArgs};
use rnkit_core::ProjectKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rnkit")]
#[command(about = "CLI for scaffolding React Native projects and managing their environment")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new React Native project
    Create(CliCreateArgs),
    /// Manage environment variables for the current project
    Env(EnvArgs),
    /// Generate a custom React Native hook
    CreateHook(CreateHookArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name (prompted when omitted)
    pub name: Option<String>,

    /// Project type: expo or bare (prompted when omitted)
    #[arg(short, long)]
    pub kind: Option<ProjectKind>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            kind: args.kind,
            name: args.name,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct EnvArgs {
    #[command(subcommand)]
    pub command: EnvCommand,
}

#[derive(Subcommand, Debug)]
pub enum EnvCommand {
    /// Initialize the environment configuration for the project
    Init,
    /// Add a new environment variable
    Add(CliSetArgs),
    /// Update an existing environment variable
    Update(CliSetArgs),
    /// Remove an existing environment variable
    Remove(CliRemoveArgs),
    /// Delete the environment files and disable env management
    Destroy(CliDestroyArgs),
}

#[derive(Parser, Debug)]
pub struct CliSetArgs {
    /// Variable name (prompted when omitted)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Variable value (prompted when omitted)
    #[arg(long)]
    pub value: Option<String>,
}

impl From<CliSetArgs> for SetArgs {
    fn from(args: CliSetArgs) -> Self {
        SetArgs {
            key: args.key,
            value: args.value,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliRemoveArgs {
    /// Variable name (prompted when omitted)
    #[arg(short, long)]
    pub key: Option<String>,
}

impl From<CliRemoveArgs> for RemoveArgs {
    fn from(args: CliRemoveArgs) -> Self {
        RemoveArgs { key: args.key }
    }
}

#[derive(Parser, Debug)]
pub struct CliDestroyArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliDestroyArgs> for DestroyArgs {
    fn from(args: CliDestroyArgs) -> Self {
        DestroyArgs { yes: args.yes }
    }
}

#[derive(Parser, Debug)]
pub struct CreateHookArgs {
    /// Hook name (a `use` prefix is added when missing)
    pub name: String,

    /// Directory for the hook file (default: src/lib/hooks)
    pub directory: Option<PathBuf>,
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

    let result = match args.command {
        Some(Command::Create(create_args)) => tui::run_create(create_args.into()).await,
        Some(Command::Env(env_args)) => match env_args.command {
            EnvCommand::Init => tui::run_env_init().await,
            EnvCommand::Add(set_args) => tui::run_env_add(set_args.into()),
            EnvCommand::Update(set_args) => tui::run_env_update(set_args.into()),
            EnvCommand::Remove(remove_args) => tui::run_env_remove(remove_args.into()),
            EnvCommand::Destroy(destroy_args) => tui::run_env_destroy(destroy_args.into()),
        },
        Some(Command::CreateHook(hook_args)) => {
            tui::run_generate_hook(&hook_args.name, hook_args.directory)
        }
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            tui::run_create(CreateArgs::default()).await
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
