//! Post-scaffold collaborators: dependency installation and git init
//!
//! Both run to completion with no timeout. A non-zero exit is a
//! [`ScaffoldError::Process`] carrying the exit code.

use crate::config::PackageManager;
use crate::error::{Result, ScaffoldError};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Program and arguments installing dependencies with a package manager
pub fn install_command(pm: PackageManager) -> (&'static str, &'static [&'static str]) {
    match pm {
        PackageManager::Npm => ("npm", &["install"]),
        PackageManager::Pnpm => ("pnpm", &["install"]),
        // Bare `yarn` installs
        PackageManager::Yarn => ("yarn", &[]),
        PackageManager::Bun => ("bun", &["install"]),
    }
}

/// Install dependencies in `dir`, streaming the package manager's output
pub async fn install_dependencies(dir: &Path, pm: PackageManager) -> Result<()> {
    let (program, args) = install_command(pm);
    run(program, args, dir, true).await
}

/// Initialize a git repository in `dir`
pub async fn init_git(dir: &Path) -> Result<()> {
    run("git", &["init"], dir, false).await
}

/// Run a command in `dir` and wait for it to finish
pub async fn run(program: &str, args: &[&str], dir: &Path, inherit_output: bool) -> Result<()> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    tracing::debug!(command = %command_line, dir = %dir.display(), "running collaborator");

    let mut command = shell_command(program);
    command.args(args).current_dir(dir).stdin(Stdio::null());
    if inherit_output {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        command.stdout(Stdio::null()).stderr(Stdio::null());
    }

    let status = command
        .status()
        .await
        .map_err(|source| ScaffoldError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ScaffoldError::Process {
            command: command_line,
            code: status.code(),
        })
    }
}

/// Package managers are batch scripts on Windows and need `cmd` to resolve
#[cfg(windows)]
fn shell_command(program: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(program);
    command
}

#[cfg(not(windows))]
fn shell_command(program: &str) -> Command {
    Command::new(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_commands() {
        assert_eq!(install_command(PackageManager::Npm), ("npm", &["install"][..]));
        assert_eq!(install_command(PackageManager::Yarn).1.len(), 0);
        assert_eq!(install_command(PackageManager::Bun).0, "bun");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_carries_code() {
        let dir = tempfile::tempdir().unwrap();
        let err = run("sh", &["-c", "exit 3"], dir.path(), false)
            .await
            .unwrap_err();
        match err {
            ScaffoldError::Process { command, code } => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(code, Some(3));
            }
            other => panic!("expected process error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_runs_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        run("sh", &["-c", "touch marker"], dir.path(), false)
            .await
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run("definitely-not-a-real-binary-1234", &[], dir.path(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Spawn { .. }));
    }
}
