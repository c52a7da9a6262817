//! Package manager invocation
//!
//! Checks that the chosen package manager is on PATH and runs its install
//! command inside the generated project, streaming its output.

use crate::config::PackageManager;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for dependency installation (10 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Runs a package manager for a generated project
pub struct ToolManager {
    manager: PackageManager,
}

impl ToolManager {
    pub fn new(manager: PackageManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &PackageManager {
        &self.manager
    }

    pub fn install_command(&self) -> String {
        self.manager.install_command()
    }

    /// Check if the package manager is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        std::process::Command::new(which_command())
            .arg(self.manager.name)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Install dependencies in `project_dir`, streaming the package manager's output
    pub async fn install(&self, project_dir: &Path) -> Result<()> {
        let cmd = self.install_command();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();
        tracing::info!(command = %cmd, dir = %project_dir.display(), "installing dependencies");

        let mut child = TokioCommand::new(self.manager.name)
            .args(self.manager.install_args)
            .current_dir(project_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to start '{}': {}", cmd, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture stderr"))?;

        match timeout(INSTALL_TIMEOUT, stream_output(stdout, stderr)).await {
            Ok((stdout_lines, stderr_lines)) => {
                tracing::debug!(stdout_lines, stderr_lines, "package manager output closed");
            }
            Err(_) => {
                let _ = child.kill().await;
                println!();
                anyhow::bail!(
                    "Dependency installation timed out after {} seconds.\n\
                     Please run '{}' in {} manually.",
                    INSTALL_TIMEOUT.as_secs(),
                    cmd,
                    project_dir.display()
                );
            }
        }

        match timeout(Duration::from_secs(30), child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                if status.success() {
                    Ok(())
                } else {
                    anyhow::bail!(
                        "'{}' failed with exit code: {}\n\
                         Please run it manually in {}",
                        cmd,
                        status.code().unwrap_or(-1),
                        project_dir.display()
                    );
                }
            }
            Ok(Err(e)) => {
                anyhow::bail!("Failed to wait for '{}': {}", cmd, e);
            }
            Err(_) => {
                let _ = child.kill().await;
                anyhow::bail!(
                    "'{}' hung. Please run it manually in {}",
                    cmd,
                    project_dir.display()
                );
            }
        }
    }

    /// Open the package manager's installation docs in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} documentation in your browser...",
                self.manager.display_name
            )
            .cyan()
        );
        open::that(self.manager.docs_url)?;
        Ok(())
    }
}

/// Echo both streams until each reaches EOF, returning the (stdout, stderr) line counts
async fn stream_output<O, E>(stdout: O, stderr: E) -> (usize, usize)
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let (mut stdout_done, mut stderr_done) = (false, false);
    let (mut stdout_lines, mut stderr_lines) = (0, 0);

    while !(stdout_done && stderr_done) {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => {
                        println!("  {}", line);
                        stdout_lines += 1;
                    }
                    Ok(None) => stdout_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_done = true;
                    }
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => {
                        eprintln!("  {}", line.yellow());
                        stderr_lines += 1;
                    }
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_done = true;
                    }
                }
            }
        }
    }

    (stdout_lines, stderr_lines)
}

fn which_command() -> &'static str {
    if cfg!(windows) {
        "where"
    } else {
        "which"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PACKAGE_MANAGERS;

    #[test]
    fn test_install_command_matches_manager() {
        let tool = ToolManager::new(PACKAGE_MANAGERS[1]);
        assert_eq!(tool.install_command(), "npm install");
        assert_eq!(tool.manager().name, "npm");
    }

    #[test]
    fn test_missing_tool_is_not_installed() {
        let tool = ToolManager::new(PackageManager {
            name: "definitely-not-a-real-package-manager",
            display_name: "Nope",
            install_args: &[],
            docs_url: "https://example.com",
        });
        assert!(!tool.is_installed());
    }

    #[tokio::test]
    async fn test_stream_output_drains_stderr_after_stdout_closes() {
        let stdout: &[u8] = b"";
        let stderr: &[u8] = b"warning one\nwarning two\nwarning three\n";

        assert_eq!(stream_output(stdout, stderr).await, (0, 3));
    }

    #[tokio::test]
    async fn test_stream_output_finishes_when_stderr_closes_first() {
        let stdout: &[u8] = b"resolving\nfetching\nlinking\ndone\n";
        let stderr: &[u8] = b"";

        assert_eq!(stream_output(stdout, stderr).await, (4, 0));
    }
}
