//! Boilerplate source file generators

pub mod hooks;

pub use hooks::{create_hook, CreatedHook, DEFAULT_HOOKS_DIR};
