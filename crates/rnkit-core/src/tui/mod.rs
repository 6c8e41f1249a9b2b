//! CLI command flows using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{
    run_create, run_env_add, run_env_destroy, run_env_init, run_env_remove, run_env_update,
    run_generate_hook, CreateArgs, DestroyArgs, RemoveArgs, SetArgs,
};
