//! Runtime detection and npm tooling
//!
//! This module provides:
//! - Node.js / npm runtime detection
//! - Streamed npm dependency installation into a project directory

pub mod check;
pub mod npm;

pub use check::{check_node, check_npm, open_node_download_page, RuntimeInfo, NODE_DOWNLOAD_URL};
