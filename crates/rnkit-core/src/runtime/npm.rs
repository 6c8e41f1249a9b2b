//! npm dependency installation for scaffolded projects
//!
//! Installs run inside the project directory with output streamed to the
//! terminal, so the user sees npm's progress instead of a silent hang.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a single npm install (5 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Install `package` as a dev dependency of the project at `project_dir`.
/// Shows the command being executed and streams output
pub async fn install_dev_dependency(project_dir: &Path, package: &str) -> Result<()> {
    let cmd = format!("npm install --save-dev {}", package);
    println!();
    println!("{} {}", "Running:".dimmed(), cmd.yellow());
    println!();

    // Create the command
    let mut child = TokioCommand::new("npm")
        .arg("install")
        .arg("--save-dev")
        .arg(package)
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Get stdout and stderr
    let stdout = child.stdout.take().expect("Failed to capture stdout");
    let stderr = child.stderr.take().expect("Failed to capture stderr");

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    // Stream output with timeout
    let output_task = async {
        loop {
            tokio::select! {
                line = stdout_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            break;
                        }
                    }
                }
                line = stderr_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => {}
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                        }
                    }
                }
            }
        }
    };

    // Wait for output with timeout
    match timeout(INSTALL_TIMEOUT, output_task).await {
        Ok(_) => {}
        Err(_) => {
            // Kill the process on timeout
            let _ = child.kill().await;
            println!();
            anyhow::bail!(
                "Installation timed out after {} seconds.\n\
                 The registry may be unreachable. Please try again later or install manually:\n\
                 {}",
                INSTALL_TIMEOUT.as_secs(),
                cmd
            );
        }
    }

    // Wait for process to complete with timeout
    match timeout(Duration::from_secs(5), child.wait()).await {
        Ok(Ok(status)) => {
            println!();
            if status.success() {
                Ok(())
            } else {
                anyhow::bail!(
                    "Installation failed with exit code: {}\n\
                     Please try installing manually: {}",
                    status.code().unwrap_or(-1),
                    cmd
                );
            }
        }
        Ok(Err(e)) => {
            anyhow::bail!("Failed to wait for npm: {}", e);
        }
        Err(_) => {
            let _ = child.kill().await;
            anyhow::bail!(
                "npm install process hung. Please try installing manually:\n{}",
                cmd
            );
        }
    }
}
