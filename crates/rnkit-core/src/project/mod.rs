//! Project creation by delegating to the official React Native generators
//!
//! rnkit does not template projects itself: Expo apps come from
//! `npx create-expo-app`, bare apps from `@react-native-community/cli`. The
//! generators are interactive, so they run with inherited stdio and block
//! until they exit. On success a fresh project config is written into the
//! new directory.

use crate::config::{ProjectConfig, ProjectKind};
use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Strongly-typed result of the project-details prompt
#[derive(Debug, Clone)]
pub struct ProjectDetails {
    pub kind: ProjectKind,
    pub name: String,
}

/// Validate a project name: a leading letter followed by letters, digits,
/// dashes, or underscores
pub fn validate_project_name(name: &str) -> Result<(), String> {
    let pattern = Regex::new("^[a-zA-Z][a-zA-Z0-9_-]+$").map_err(|e| e.to_string())?;
    if pattern.is_match(name) {
        Ok(())
    } else {
        Err("project name must start with a letter and contain only alphanumeric characters, dashes, or underscores".to_string())
    }
}

/// Create a new project in the current directory and write its config.
/// Returns the project directory.
pub async fn create_project(details: &ProjectDetails) -> Result<PathBuf> {
    validate_project_name(&details.name).map_err(|message| anyhow!(message))?;

    match details.kind {
        ProjectKind::Expo => {
            run_generator(
                "npx",
                &["create-expo-app@latest", &details.name, "--template"],
            )
            .await?
        }
        ProjectKind::Bare => {
            run_generator(
                "npx",
                &[
                    "@react-native-community/cli@latest",
                    "init",
                    &details.name,
                    "--pm",
                    "npm",
                ],
            )
            .await?
        }
    }

    let project_dir = PathBuf::from(".").join(&details.name);
    ProjectConfig::new(details.kind)
        .save(&project_dir)
        .context("Project was created but its config could not be written")?;

    Ok(project_dir)
}

/// Run a generator command with inherited stdio, blocking until it exits
async fn run_generator(program: &str, args: &[&str]) -> Result<()> {
    println!();
    println!(
        "{} {} {}",
        "Running:".dimmed(),
        program.yellow(),
        args.join(" ").yellow()
    );
    println!();

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("Failed to launch {}", program))?;

    if !status.success() {
        bail!(
            "{} exited with status {}",
            program,
            status
                .code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_project_names() {
        assert!(validate_project_name("myapp").is_ok());
        assert!(validate_project_name("My-App_2").is_ok());
    }

    #[test]
    fn test_invalid_project_names() {
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("a").is_err());
        assert!(validate_project_name("1app").is_err());
        assert!(validate_project_name("-app").is_err());
        assert!(validate_project_name("my app").is_err());
        assert!(validate_project_name("my.app").is_err());
    }
}
