//! Charm-style CLI command flows using cliclack

use crate::config::{ProjectConfig, ProjectKind, CONFIG_FILE_NAME};
use crate::env::{self, DeclarationFile, EnvFile};
use crate::generate;
use crate::project::{self, ProjectDetails};
use crate::runtime;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project type to use instead of prompting
    pub kind: Option<ProjectKind>,

    /// Project name to use instead of prompting
    pub name: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// CLI arguments for env add / env update
#[derive(Debug, Clone, Default)]
pub struct SetArgs {
    /// Variable name to use instead of prompting
    pub key: Option<String>,

    /// Variable value to use instead of prompting
    pub value: Option<String>,
}

/// CLI arguments for env remove
#[derive(Debug, Clone, Default)]
pub struct RemoveArgs {
    /// Variable name to use instead of prompting
    pub key: Option<String>,
}

/// CLI arguments for env destroy
#[derive(Debug, Clone, Default)]
pub struct DestroyArgs {
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// Run the create command with interactive prompts
pub async fn run_create(args: CreateArgs) -> Result<()> {
    cliclack::intro("rnkit")?;

    // Step 1: Make sure the generators have something to run on
    ensure_node_runtime(args.yes)?;

    // Step 2: Select project type
    let kind = match args.kind {
        Some(kind) => {
            cliclack::log::info(format!("Project type: {}", kind.display_name()))?;
            kind
        }
        None => cliclack::select("Select the type of React Native project")
            .item(ProjectKind::Expo, "Expo-managed app", "npx create-expo-app")
            .item(
                ProjectKind::Bare,
                "Bare React Native app",
                "@react-native-community/cli",
            )
            .interact()?,
    };

    // Step 3: Project name
    let name = match args.name {
        Some(name) => {
            project::validate_project_name(&name).map_err(|message| anyhow::anyhow!(message))?;
            name
        }
        None => cliclack::input("Enter the name of your project")
            .validate(|input: &String| project::validate_project_name(input))
            .interact()?,
    };

    // Step 4: Delegate to the generator
    let details = ProjectDetails { kind, name };
    let project_dir = project::create_project(&details).await?;
    cliclack::log::success(format!(
        "Created the {} project: {}",
        details.kind.display_name(),
        details.name
    ))?;

    // Step 5: Show next steps
    print_next_steps(&details, &project_dir)?;

    Ok(())
}

/// Initialize the environment configuration for the current project
pub async fn run_env_init() -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let config = load_project_config(&project_dir)?;

    if config.env_initialized {
        cliclack::log::info("Environment has already been initialized.")?;
        return Ok(());
    }

    env::initialize(&project_dir, config.kind).await?;
    ProjectConfig::update(&project_dir, |c| c.env_initialized = true)?;

    cliclack::log::success("Environment successfully initialized.")?;
    Ok(())
}

/// Add a new environment variable
pub fn run_env_add(args: SetArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let config = load_project_config(&project_dir)?;
    env::ensure_initialized(&config)?;

    let key = prompt_key(args.key, "New variable name")?;
    let key = match config.kind {
        ProjectKind::Expo => env::ensure_expo_prefix(&key),
        ProjectKind::Bare => env::normalize_key(&key),
    };
    let value = prompt_value(args.value)?;

    persist_entry(&project_dir, &config, &key, &value)?;
    cliclack::log::success(format!("Added {}", key))?;
    Ok(())
}

/// Update an existing environment variable
pub fn run_env_update(args: SetArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let config = load_project_config(&project_dir)?;
    env::ensure_initialized(&config)?;

    let file = EnvFile::load(env::env_file_path(&project_dir))?;
    let keys = file.keys();
    if keys.is_empty() {
        cliclack::log::info("No environment variables found to update.")?;
        return Ok(());
    }

    // Stored keys are already normalized and prefixed; no re-prefixing here
    let key = select_existing_key(args.key, &keys, &config, "Select a variable to update")?;
    let value = prompt_value(args.value)?;

    persist_entry(&project_dir, &config, &key, &value)?;
    cliclack::log::success(format!("Updated {}", key))?;
    Ok(())
}

/// Remove an existing environment variable
pub fn run_env_remove(args: RemoveArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let config = load_project_config(&project_dir)?;
    env::ensure_initialized(&config)?;

    let mut file = EnvFile::load(env::env_file_path(&project_dir))?;
    let keys = file.keys();
    if keys.is_empty() {
        cliclack::log::info("No environment variables found to remove.")?;
        return Ok(());
    }

    let key = select_existing_key(args.key, &keys, &config, "Select a variable to remove")?;

    file.remove(&key);
    file.save()?;
    if config.kind.maintains_declarations() {
        DeclarationFile::at(&project_dir).remove(&key)?;
    }

    cliclack::log::success(format!("Removed {}", key))?;
    Ok(())
}

/// Destroy the environment configuration
pub fn run_env_destroy(args: DestroyArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let config = load_project_config(&project_dir)?;

    if !config.env_initialized {
        cliclack::log::info("Environment has not been initialized.")?;
        return Ok(());
    }

    if !args.yes {
        let confirmed: bool =
            cliclack::confirm("Delete the environment files for this project?")
                .initial_value(false)
                .interact()?;
        if !confirmed {
            cliclack::log::info("Aborted.")?;
            return Ok(());
        }
    }

    env::destroy(&project_dir, config.kind)?;
    ProjectConfig::update(&project_dir, |c| c.env_initialized = false)?;

    cliclack::log::success("Environment configuration destroyed.")?;
    Ok(())
}

/// Generate a hook in the current project
pub fn run_generate_hook(name: &str, directory: Option<PathBuf>) -> Result<()> {
    let project_dir = std::env::current_dir()?;

    let created = generate::create_hook(&project_dir, name, directory.as_deref())?;
    cliclack::log::success(format!(
        "Created hook {} ({})",
        created.hook_name,
        created.hook_file.display()
    ))?;
    cliclack::log::info(format!("Types: {}", created.type_file.display()))?;
    Ok(())
}

fn load_project_config(project_dir: &Path) -> Result<ProjectConfig> {
    ProjectConfig::load(project_dir).with_context(|| {
        format!(
            "This directory is not an rnkit project (missing {})",
            CONFIG_FILE_NAME
        )
    })
}

/// Save the primary file, then mirror the change for bare projects.
/// A mirror failure after the save leaves the two files inconsistent.
fn persist_entry(
    project_dir: &Path,
    config: &ProjectConfig,
    key: &str,
    value: &str,
) -> Result<()> {
    let mut file = EnvFile::load(env::env_file_path(project_dir))?;
    file.set(key, value);
    file.save()?;

    if config.kind.maintains_declarations() {
        DeclarationFile::at(project_dir).upsert(key)?;
    }
    Ok(())
}

fn prompt_key(prefill: Option<String>, message: &str) -> Result<String> {
    match prefill {
        Some(key) => {
            env::validate_key(&key).map_err(|message| anyhow::anyhow!(message))?;
            Ok(key)
        }
        None => Ok(cliclack::input(message)
            .placeholder("API_URL")
            .validate(|input: &String| env::validate_key(input))
            .interact()?),
    }
}

fn prompt_value(prefill: Option<String>) -> Result<String> {
    match prefill {
        Some(value) => Ok(value),
        None => Ok(cliclack::input("Value").interact()?),
    }
}

/// Resolve a key from flags (normalizing/prefixing it) or via a select prompt
fn select_existing_key(
    prefill: Option<String>,
    keys: &[String],
    config: &ProjectConfig,
    message: &str,
) -> Result<String> {
    match prefill {
        Some(key) => {
            let key = match config.kind {
                ProjectKind::Expo => env::ensure_expo_prefix(&key),
                ProjectKind::Bare => env::normalize_key(&key),
            };
            if !keys.contains(&key) {
                anyhow::bail!("No variable named {} in {}", key, env::ENV_FILE_NAME);
            }
            Ok(key)
        }
        None => {
            let mut select = cliclack::select(message);
            for key in keys {
                select = select.item(key.clone(), key, "");
            }
            Ok(select.interact()?)
        }
    }
}

fn ensure_node_runtime(yes: bool) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let runtimes = [runtime::check_node(), runtime::check_npm()];
    if runtimes.iter().all(|r| r.available) {
        let runtime_info: Vec<String> = runtimes
            .iter()
            .map(|r| {
                format!(
                    "{} ({})",
                    r.name,
                    r.version.as_deref().unwrap_or("unknown")
                )
            })
            .collect();
        spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
        return Ok(());
    }

    spinner.stop("Missing runtimes");
    let missing: Vec<&str> = runtimes
        .iter()
        .filter(|r| !r.available)
        .map(|r| r.name)
        .collect();
    cliclack::log::warning(format!("{} not found in PATH", missing.join(", ")))?;

    // In non-interactive mode there is nothing to ask
    if yes {
        anyhow::bail!("Please install Node.js and npm, then run this command again.");
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "docs",
            format!("Open the Node.js download page ({})", runtime::NODE_DOWNLOAD_URL),
            "",
        )
        .item("abort", "Abort", "")
        .interact()?;

    if action == "docs" {
        runtime::open_node_download_page()?;
        cliclack::outro("After installing Node.js, run this command again.")?;
        std::process::exit(0);
    }

    anyhow::bail!("Setup cancelled.");
}

fn print_next_steps(details: &ProjectDetails, project_dir: &Path) -> Result<()> {
    let mut steps = vec![format!("cd {}", project_dir.display())];
    match details.kind {
        ProjectKind::Expo => steps.push("npx expo start".to_string()),
        ProjectKind::Bare => {
            steps.push("npx react-native run-android (or run-ios)".to_string());
        }
    }
    steps.push("rnkit env init".to_string());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
