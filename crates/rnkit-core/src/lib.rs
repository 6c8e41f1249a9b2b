//! rnkit Core - Shared library for React Native project scaffolding
//!
//! This library provides the core functionality behind the `rnkit` CLI:
//! creating React Native projects (by delegating to the official generators)
//! and managing their environment configuration afterwards.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Project config, `.env` store, declaration
//!   mirror, babel wiring, hook generation, runtime detection
//! - **Layer 2: Workflow Orchestration** - Project creation and environment
//!   lifecycle (init/destroy) built on the core operations
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based command flows
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based command flows module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use rnkit_core::{env, EnvFile, ProjectConfig};
//!
//! let config = ProjectConfig::load(project_dir)?;
//! env::ensure_initialized(&config)?;
//!
//! let mut file = EnvFile::load(env::env_file_path(project_dir))?;
//! file.set("api_url", "http://localhost:3000");
//! file.save()?;
//! ```

pub mod config;
pub mod env;
pub mod generate;
pub mod project;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{ProjectConfig, ProjectKind};
pub use env::{DeclarationFile, EnvError, EnvFile};
pub use project::{create_project, ProjectDetails};
