//! Per-project configuration file handling
//!
//! Every scaffolded project carries a small JSON file at its root recording
//! how it was created and whether environment management is active. Commands
//! load it once, pass it around explicitly, and persist changes with an
//! explicit save - there is no process-wide configuration state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the configuration file written into each project root
pub const CONFIG_FILE_NAME: &str = ".rnkit.json";

/// The two supported React Native project flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Expo-managed app, created via `npx create-expo-app`
    Expo,
    /// Bare React Native app, created via `@react-native-community/cli`
    Bare,
}

impl ProjectKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectKind::Expo => "Expo-managed app",
            ProjectKind::Bare => "Bare React Native app",
        }
    }

    /// Whether an `env.d.ts` declaration mirror is maintained for this flavor.
    ///
    /// Expo apps read prefixed variables directly; bare apps go through
    /// `react-native-dotenv` and need typing declarations for `@env` imports.
    pub fn maintains_declarations(&self) -> bool {
        matches!(self, ProjectKind::Bare)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Expo => write!(f, "expo"),
            ProjectKind::Bare => write!(f, "bare"),
        }
    }
}

impl FromStr for ProjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expo" => Ok(ProjectKind::Expo),
            "bare" => Ok(ProjectKind::Bare),
            other => Err(format!(
                "unknown project type '{}' (expected 'expo' or 'bare')",
                other
            )),
        }
    }
}

/// Project configuration stored as pretty-printed JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Which generator produced this project
    #[serde(rename = "projectType")]
    pub kind: ProjectKind,

    /// RFC 3339 creation timestamp, informational only
    #[serde(rename = "createdAt")]
    pub created_at: String,

    /// Whether `rnkit env init` has run for this project
    #[serde(rename = "envInitialized", default)]
    pub env_initialized: bool,
}

/// Full path of the config file inside a project directory
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

impl ProjectConfig {
    /// Fresh configuration for a just-created project
    pub fn new(kind: ProjectKind) -> Self {
        Self {
            kind,
            created_at: chrono::Utc::now().to_rfc3339(),
            env_initialized: false,
        }
    }

    /// Load the configuration from `<project_dir>/.rnkit.json`
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = config_path(project_dir);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read project config {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse project config {}", path.display()))
    }

    /// Write the configuration back to `<project_dir>/.rnkit.json`
    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let path = config_path(project_dir);
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');
        fs::write(&path, data)
            .with_context(|| format!("Failed to write project config {}", path.display()))
    }

    /// Load, apply `mutate`, and save in one step; returns the updated config
    pub fn update<F>(project_dir: &Path, mutate: F) -> Result<Self>
    where
        F: FnOnce(&mut ProjectConfig),
    {
        let mut config = Self::load(project_dir)?;
        mutate(&mut config);
        config.save(project_dir)?;
        Ok(config)
    }
}
