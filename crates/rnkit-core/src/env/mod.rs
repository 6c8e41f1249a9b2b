//! Environment variable management for scaffolded projects
//!
//! This module owns the `.env` primary file and, for bare projects, the
//! generated `env.d.ts` declaration mirror. Per project the environment is a
//! small state machine: `env init` creates the files (and wires
//! `react-native-dotenv` for bare apps) and flips `envInitialized` in the
//! project config; add/update/remove operations require that state;
//! `env destroy` deletes the files and flips the flag back.

pub mod babel;
mod declarations;
mod store;

pub use declarations::DeclarationFile;
pub use store::EnvFile;

use crate::config::{ProjectConfig, ProjectKind};
use crate::runtime::npm;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Primary environment file consumed by the app at runtime
pub const ENV_FILE_NAME: &str = ".env";

/// Generated declaration mirror giving TypeScript visibility into `@env`
pub const DECLARATION_FILE_NAME: &str = "env.d.ts";

/// Prefix Expo requires on variables exposed to application code
pub const EXPO_PUBLIC_PREFIX: &str = "EXPO_PUBLIC_";

/// npm package providing `@env` imports for bare projects
pub const DOTENV_PACKAGE: &str = "react-native-dotenv";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("environment file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("environment is not initialized; run `rnkit env init` first")]
    NotInitialized,
}

pub fn env_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(ENV_FILE_NAME)
}

pub fn declaration_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(DECLARATION_FILE_NAME)
}

/// Canonical form of a variable name: trimmed, upper-case
pub fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

/// Normalize `key` and prepend `EXPO_PUBLIC_` unless already present
pub fn ensure_expo_prefix(key: &str) -> String {
    let key = normalize_key(key);
    if key.starts_with(EXPO_PUBLIC_PREFIX) {
        key
    } else {
        format!("{}{}", EXPO_PUBLIC_PREFIX, key)
    }
}

/// Boundary validation for variable names entered at prompts or flags
pub fn validate_key(key: &str) -> Result<(), String> {
    let pattern = Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").map_err(|e| e.to_string())?;
    if pattern.is_match(key.trim()) {
        Ok(())
    } else {
        Err("variable names must start with a letter or underscore and contain only letters, digits, and underscores".to_string())
    }
}

/// Guard for operations that require an initialized environment
pub fn ensure_initialized(config: &ProjectConfig) -> Result<(), EnvError> {
    if config.env_initialized {
        Ok(())
    } else {
        Err(EnvError::NotInitialized)
    }
}

/// Create the environment files for a project.
///
/// The `.env` file is created empty when absent. Bare projects additionally
/// get `react-native-dotenv` installed as a dev dependency, the babel plugin
/// registered, and an empty `env.d.ts` block. The caller is responsible for
/// flipping `envInitialized` in the project config afterwards.
pub async fn initialize(project_dir: &Path, kind: ProjectKind) -> anyhow::Result<()> {
    create_env_file(project_dir)?;

    if kind.maintains_declarations() {
        npm::install_dev_dependency(project_dir, DOTENV_PACKAGE).await?;
        babel::register_dotenv_plugin(project_dir)?;
        DeclarationFile::at(project_dir).ensure()?;
    }

    Ok(())
}

/// Create an empty `.env` when the project has none
pub fn create_env_file(project_dir: &Path) -> Result<(), EnvError> {
    let path = env_file_path(project_dir);
    if !path.exists() {
        fs::write(&path, "")?;
    }
    Ok(())
}

/// Delete the environment files. The caller flips `envInitialized` back.
pub fn destroy(project_dir: &Path, kind: ProjectKind) -> Result<(), EnvError> {
    remove_if_exists(&env_file_path(project_dir))?;
    if kind.maintains_declarations() {
        remove_if_exists(&declaration_file_path(project_dir))?;
    }
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<(), EnvError> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_expo_prefix() {
        assert_eq!(ensure_expo_prefix("api_url"), "EXPO_PUBLIC_API_URL");
        assert_eq!(ensure_expo_prefix("EXPO_PUBLIC_API_URL"), "EXPO_PUBLIC_API_URL");
        assert_eq!(ensure_expo_prefix("expo_public_api_url"), "EXPO_PUBLIC_API_URL");
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("API_URL").is_ok());
        assert!(validate_key("_private").is_ok());
        assert!(validate_key("lower_case9").is_ok());
        assert!(validate_key("9LEADING_DIGIT").is_err());
        assert!(validate_key("WITH-DASH").is_err());
        assert!(validate_key("").is_err());
    }

    #[test]
    fn test_ensure_initialized_precondition() {
        let mut config = ProjectConfig::new(ProjectKind::Bare);
        assert!(matches!(
            ensure_initialized(&config),
            Err(EnvError::NotInitialized)
        ));

        config.env_initialized = true;
        assert!(ensure_initialized(&config).is_ok());
    }

    #[test]
    fn test_create_env_file_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(env_file_path(dir.path()), "KEY=value\n").unwrap();

        create_env_file(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(env_file_path(dir.path())).unwrap(),
            "KEY=value\n"
        );
    }

    #[test]
    fn test_destroy_removes_both_files_for_bare() {
        let dir = tempfile::tempdir().unwrap();
        create_env_file(dir.path()).unwrap();
        DeclarationFile::at(dir.path()).ensure().unwrap();

        destroy(dir.path(), ProjectKind::Bare).unwrap();
        assert!(!env_file_path(dir.path()).exists());
        assert!(!declaration_file_path(dir.path()).exists());
    }

    #[test]
    fn test_destroy_keeps_declarations_for_expo() {
        let dir = tempfile::tempdir().unwrap();
        create_env_file(dir.path()).unwrap();
        // A stray declaration file is not ours to delete for expo projects
        DeclarationFile::at(dir.path()).ensure().unwrap();

        destroy(dir.path(), ProjectKind::Expo).unwrap();
        assert!(!env_file_path(dir.path()).exists());
        assert!(declaration_file_path(dir.path()).exists());
    }

    #[test]
    fn test_destroy_with_no_files_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(destroy(dir.path(), ProjectKind::Bare).is_ok());
    }

    // End-to-end over the store and mirror, the way the bare-project flows
    // drive them
    #[test]
    fn test_bare_add_then_remove_scenario() {
        let dir = tempfile::tempdir().unwrap();
        create_env_file(dir.path()).unwrap();
        let mirror = DeclarationFile::at(dir.path());
        mirror.ensure().unwrap();

        let mut file = EnvFile::load(env_file_path(dir.path())).unwrap();
        file.set("api_url", "http://x");
        file.save().unwrap();
        mirror.upsert("api_url").unwrap();

        let env_text = fs::read_to_string(env_file_path(dir.path())).unwrap();
        let dts_text = fs::read_to_string(declaration_file_path(dir.path())).unwrap();
        assert!(env_text.contains("API_URL=http://x"));
        assert!(dts_text.contains("  export const API_URL: string;"));

        let mut file = EnvFile::load(env_file_path(dir.path())).unwrap();
        file.remove("API_URL");
        file.save().unwrap();
        mirror.remove("API_URL").unwrap();

        let env_text = fs::read_to_string(env_file_path(dir.path())).unwrap();
        let dts_text = fs::read_to_string(declaration_file_path(dir.path())).unwrap();
        assert!(!env_text.contains("API_URL"));
        assert!(!dts_text.contains("API_URL"));
        assert!(dts_text.contains("declare module \"@env\" {"));
        assert!(dts_text.trim_end().ends_with('}'));
    }
}
