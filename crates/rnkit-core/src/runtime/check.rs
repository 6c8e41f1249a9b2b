//! Runtime detection for Node.js and npm

use anyhow::Result;
use std::process::Command;

/// Download page offered when Node.js or npm is missing
pub const NODE_DOWNLOAD_URL: &str = "https://nodejs.org/en/download";

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, binary: &str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Open the Node.js download page in the default browser
pub fn open_node_download_page() -> Result<()> {
    open::that(NODE_DOWNLOAD_URL)?;
    Ok(())
}
