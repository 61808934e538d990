//! Dependency installation through the project's package manager
//!
//! Each batch of packages becomes one shell command whose output streams
//! straight to the user's terminal.

use super::manager::PackageManager;
use crate::error::{Error, Result};
use crate::output;
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use tokio::process::Command as TokioCommand;

/// Exit status of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a shell command line in a working directory
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command_line: &str, cwd: &Path) -> io::Result<CommandStatus>;
}

/// Runs commands through the platform shell with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str, cwd: &Path) -> io::Result<CommandStatus> {
        let mut command = if cfg!(windows) {
            let mut c = TokioCommand::new("cmd");
            c.arg("/C");
            c
        } else {
            let mut c = TokioCommand::new("sh");
            c.arg("-c");
            c
        };

        let status = command.arg(command_line).current_dir(cwd).status().await?;
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

/// Installs packages into a project
pub struct Installer<R: CommandRunner> {
    runner: R,
    project_root: PathBuf,
}

impl<R: CommandRunner> Installer<R> {
    pub fn new(runner: R, project_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            project_root: project_root.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Install `packages` in one command. An empty list does nothing.
    pub async fn install(
        &self,
        manager: PackageManager,
        packages: &[&str],
        dev: bool,
    ) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let command_line = manager.command_line(packages, dev);
        output::info(format!(
            "Installing {} with {}...",
            if dev { "dev dependencies" } else { "dependencies" },
            manager
        ));
        println!("{} {}", "Running:".dimmed(), command_line.yellow());

        let install_error = |reason: String| Error::Install {
            manager: manager.to_string(),
            command: command_line.clone(),
            reason,
        };

        let status = self
            .runner
            .run(&command_line, &self.project_root)
            .await
            .map_err(|e| install_error(format!("failed to start: {}", e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(install_error(match status.code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            }))
        }
    }

    /// Install runtime dependencies, then dev dependencies
    pub async fn install_all(
        &self,
        manager: PackageManager,
        dependencies: &[&str],
        dev_dependencies: &[&str],
    ) -> Result<()> {
        self.install(manager, dependencies, false).await?;
        self.install(manager, dev_dependencies, true).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records command lines instead of spawning processes
    #[derive(Default)]
    pub(crate) struct RecordingRunner {
        pub calls: Mutex<Vec<(String, PathBuf)>>,
        pub exit_code: Option<i32>,
    }

    impl RecordingRunner {
        pub fn succeeding() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                exit_code: Some(0),
            }
        }

        pub fn commands(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(cmd, _)| cmd.clone())
                .collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, command_line: &str, cwd: &Path) -> io::Result<CommandStatus> {
            self.calls
                .lock()
                .unwrap()
                .push((command_line.to_string(), cwd.to_path_buf()));
            Ok(CommandStatus {
                code: self.exit_code,
            })
        }
    }

    struct UnspawnableRunner;

    impl CommandRunner for UnspawnableRunner {
        async fn run(&self, _command_line: &str, _cwd: &Path) -> io::Result<CommandStatus> {
            Err(io::Error::new(io::ErrorKind::NotFound, "yarn not found"))
        }
    }

    #[tokio::test]
    async fn test_empty_package_list_spawns_nothing() {
        let installer = Installer::new(RecordingRunner::succeeding(), "/project");

        installer.install(PackageManager::Npm, &[], false).await.unwrap();
        installer.install(PackageManager::Yarn, &[], true).await.unwrap();

        assert!(installer.runner().commands().is_empty());
    }

    #[tokio::test]
    async fn test_one_command_per_batch_in_project_root() {
        let installer = Installer::new(RecordingRunner::succeeding(), "/project");

        installer
            .install_all(PackageManager::Pnpm, &["zod", "axios"], &["typescript"])
            .await
            .unwrap();

        let calls = installer.runner().calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                ("pnpm add zod axios".to_string(), PathBuf::from("/project")),
                ("pnpm add typescript -D".to_string(), PathBuf::from("/project")),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_install_error() {
        let runner = RecordingRunner {
            calls: Mutex::new(Vec::new()),
            exit_code: Some(1),
        };
        let installer = Installer::new(runner, "/project");

        let err = installer
            .install_all(PackageManager::Npm, &["zod"], &["typescript"])
            .await
            .unwrap_err();

        match err {
            Error::Install {
                manager, reason, ..
            } => {
                assert_eq!(manager, "npm");
                assert_eq!(reason, "exit code 1");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Dev dependencies are not attempted after a failure
        assert_eq!(installer.runner().commands(), vec!["npm install zod"]);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_install_error() {
        let installer = Installer::new(UnspawnableRunner, "/project");
        let err = installer
            .install(PackageManager::Yarn, &["zod"], false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("yarn add zod"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_runner_reports_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let ok = ShellRunner.run("true", tmp.path()).await.unwrap();
        assert!(ok.success());

        let failed = ShellRunner.run("exit 3", tmp.path()).await.unwrap();
        assert_eq!(failed.code, Some(3));
    }
}
