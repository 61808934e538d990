//! Project initialization: `rc init`
//!
//! Resolve the platform config, download the starter folders and files,
//! relocate the React Native root `App.tsx`, install dependencies and open
//! the platform docs. Steps run strictly in order and the first failure
//! stops the pipeline without rolling anything back.

use crate::error::Result;
use crate::fs;
use crate::output;
use crate::package::{CommandRunner, Installer, PackageManager};
use crate::platform::{Platform, PlatformConfig};
use crate::templates::copier::{download_files, download_folders, DownloadReport};
use crate::templates::fetcher::AssetSource;
use crate::templates::manifest::AssetManifest;
use std::path::Path;

/// Logged when the platform id has no configuration
pub const UNSUPPORTED_PLATFORM: &str =
    "Unsupported platform. Supported platforms are 'react' and 'react-native'.";

/// Switches for one init run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// Overwrite an existing `src/` directory
    pub force: bool,
    /// Open the platform docs when done
    pub open_docs: bool,
    /// Skip lockfile detection
    pub package_manager: Option<PackageManager>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            force: false,
            open_docs: true,
            package_manager: None,
        }
    }
}

/// How an init run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Platform id has no configuration; nothing was touched
    Unsupported,
    /// `src/` already exists and `force` was not set; nothing was touched
    AlreadyInitialized,
    Initialized {
        platform: Platform,
        package_manager: PackageManager,
        folders: Vec<String>,
        files: Vec<String>,
        /// Files written to disk across all downloads
        files_written: usize,
    },
}

/// Initialize the project at `project_root` from the starter template of
/// `platform_id`
pub async fn init<S, R>(
    project_root: &Path,
    platform_id: &str,
    options: &InitOptions,
    source: &mut S,
    installer: &Installer<R>,
) -> Result<InitOutcome>
where
    S: AssetSource,
    R: CommandRunner,
{
    let Some(config) = PlatformConfig::lookup(platform_id) else {
        output::error(UNSUPPORTED_PLATFORM);
        return Ok(InitOutcome::Unsupported);
    };

    if project_root.join("src").exists() && !options.force {
        output::warn("Project already initialized. Re-run with --force to overwrite.");
        return Ok(InitOutcome::AlreadyInitialized);
    }

    output::info(format!("Initializing {} project...", config.platform));

    match run_pipeline(project_root, &config, options, source, installer).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            output::error("Project initialization failed");
            Err(e)
        }
    }
}

async fn run_pipeline<S, R>(
    project_root: &Path,
    config: &PlatformConfig,
    options: &InitOptions,
    source: &mut S,
    installer: &Installer<R>,
) -> Result<InitOutcome>
where
    S: AssetSource,
    R: CommandRunner,
{
    let manifest = AssetManifest::for_platform(config, project_root)?;

    let report = download_folders(source, &manifest.folders).await;
    report_partial("folders", manifest.folders.len(), &report);
    let mut files_written = report.files_written;
    let folders = report.into_result()?;

    if config.platform == Platform::Mobile {
        relocate_root_app(project_root).await?;
    }

    let files = if manifest.files.is_empty() {
        Vec::new()
    } else {
        let report = download_files(source, &manifest.files).await;
        report_partial("files", manifest.files.len(), &report);
        files_written += report.files_written;
        report.into_result()?
    };

    output::info(format!(
        "Copied {} files into {}",
        files_written,
        project_root.display()
    ));
    output::success(format!(
        "{} project initialized successfully.",
        config.platform
    ));

    let package_manager = options
        .package_manager
        .unwrap_or_else(|| PackageManager::detect(project_root));
    installer
        .install_all(package_manager, config.dependencies, config.dev_dependencies)
        .await?;

    if options.open_docs {
        if let Err(e) = open::that(config.docs_url) {
            output::warn(format!("Could not open {}: {}", config.docs_url, e));
        }
    }

    Ok(InitOutcome::Initialized {
        platform: config.platform,
        package_manager,
        folders,
        files,
        files_written,
    })
}

/// Move a root-level `App.tsx` into `src/`
async fn relocate_root_app(project_root: &Path) -> Result<()> {
    let root_app = project_root.join("App.tsx");
    if root_app.exists() {
        fs::move_file(&root_app, &project_root.join("src").join("App.tsx")).await?;
    }
    Ok(())
}

fn report_partial(kind: &str, total: usize, report: &DownloadReport) {
    if let Some((key, _)) = &report.failure {
        output::error(format!("Error downloading {} '{}'", kind.trim_end_matches('s'), key));
        if !report.completed.is_empty() {
            output::warn(format!(
                "Downloaded {} of {} {} ({} files written) before the failure: {}",
                report.completed.len(),
                total,
                kind,
                report.files_written,
                report.completed.join(", ")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::package::installer::tests::RecordingRunner;
    use crate::templates::copier::tests::FakeSource;

    fn options() -> InitOptions {
        InitOptions {
            open_docs: false,
            ..InitOptions::default()
        }
    }

    fn mobile_source() -> FakeSource {
        let mut source = FakeSource::default();
        source.folders.insert(
            "assets".to_string(),
            vec![("images/logo.png".to_string(), "png".to_string())],
        );
        for name in [
            "api",
            "config",
            "constants",
            "hooks",
            "i18n",
            "navigation",
            "screens",
            "services",
            "store",
            "theme",
            "types",
            "utils",
        ] {
            source.folders.insert(
                name.to_string(),
                vec![("index.ts".to_string(), format!("// {}", name))],
            );
        }
        source
            .files
            .insert("App.tsx".to_string(), "export default App;".to_string());
        source
            .files
            .insert("index.js".to_string(), "AppRegistry".to_string());
        source
            .files
            .insert("metro.config.js".to_string(), "module.exports = {};".to_string());
        source
    }

    #[tokio::test]
    async fn test_unsupported_platform_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = FakeSource::default();
        let installer = Installer::new(RecordingRunner::succeeding(), tmp.path());

        let outcome = init(tmp.path(), "vue", &options(), &mut source, &installer)
            .await
            .unwrap();

        assert_eq!(outcome, InitOutcome::Unsupported);
        assert!(source.requested.is_empty());
        assert!(installer.runner().commands().is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_existing_src_requires_force() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        let mut source = FakeSource::default();
        let installer = Installer::new(RecordingRunner::succeeding(), tmp.path());

        let outcome = init(tmp.path(), "react", &options(), &mut source, &installer)
            .await
            .unwrap();

        assert_eq!(outcome, InitOutcome::AlreadyInitialized);
        assert!(source.requested.is_empty());
    }

    #[tokio::test]
    async fn test_mobile_init_downloads_and_installs() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("package-lock.json"), "{}").unwrap();
        let mut source = mobile_source();
        let installer = Installer::new(RecordingRunner::succeeding(), tmp.path());

        let outcome = init(tmp.path(), "react-native", &options(), &mut source, &installer)
            .await
            .unwrap();

        match outcome {
            InitOutcome::Initialized {
                platform,
                package_manager,
                folders,
                files,
                files_written,
            } => {
                assert_eq!(platform, Platform::Mobile);
                // One file per folder plus the three root files
                assert_eq!(files_written, 16);
                assert_eq!(package_manager, PackageManager::Npm);
                assert_eq!(folders.len(), 13);
                assert_eq!(files, vec!["App.tsx", "index.js", "metro.config.js"]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert!(tmp.path().join("assets/images/logo.png").exists());
        assert!(tmp.path().join("src/screens/index.ts").exists());
        assert!(tmp.path().join("src/App.tsx").exists());
        assert!(tmp.path().join("metro.config.js").exists());

        let commands = installer.runner().commands();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].starts_with("npm install @react-native-community/netinfo"));
        assert!(commands[1].ends_with("--save-dev"));
    }

    #[tokio::test]
    async fn test_root_app_is_moved_into_src() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("App.tsx"), "root app").unwrap();

        relocate_root_app(tmp.path()).await.unwrap();

        assert!(!tmp.path().join("App.tsx").exists());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("src/App.tsx")).unwrap(),
            "root app"
        );
    }

    #[tokio::test]
    async fn test_relocation_without_root_app_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        relocate_root_app(tmp.path()).await.unwrap();
        assert!(!tmp.path().join("src").exists());
    }

    #[tokio::test]
    async fn test_mobile_init_replaces_generated_root_app() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("App.tsx"), "react-native init app").unwrap();
        let mut source = mobile_source();
        let installer = Installer::new(RecordingRunner::succeeding(), tmp.path());

        init(tmp.path(), "react-native", &options(), &mut source, &installer)
            .await
            .unwrap();

        assert!(!tmp.path().join("App.tsx").exists());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("src/App.tsx")).unwrap(),
            "export default App;"
        );
    }

    #[tokio::test]
    async fn test_web_init_copies_src_and_skips_empty_dev_install() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = FakeSource::default();
        source.folders.insert(
            "src".to_string(),
            vec![("main.tsx".to_string(), "render()".to_string())],
        );
        let installer = Installer::new(RecordingRunner::succeeding(), tmp.path());

        let outcome = init(tmp.path(), "react", &options(), &mut source, &installer)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            InitOutcome::Initialized {
                package_manager: PackageManager::Yarn,
                ..
            }
        ));
        assert!(tmp.path().join("src/main.tsx").exists());
        let commands = installer.runner().commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].starts_with("yarn add @tanstack/react-query"));
    }

    #[tokio::test]
    async fn test_folder_failure_never_reaches_installer() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = mobile_source();
        source.folders.remove("navigation");
        let installer = Installer::new(RecordingRunner::succeeding(), tmp.path());

        let err = init(tmp.path(), "react-native", &options(), &mut source, &installer)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Network { .. }));
        assert!(installer.runner().commands().is_empty());
        // Remaining folders and all files were never requested
        assert_eq!(source.requested.last().map(String::as_str), Some("navigation"));
        assert!(!source.requested.iter().any(|k| k == "index.js"));
        // No rollback of what was already written
        assert!(tmp.path().join("src/i18n/index.ts").exists());
    }

    #[tokio::test]
    async fn test_install_failure_is_returned() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = FakeSource::default();
        source
            .folders
            .insert("src".to_string(), vec![("main.tsx".to_string(), String::new())]);
        let runner = RecordingRunner {
            exit_code: Some(1),
            ..RecordingRunner::default()
        };
        let installer = Installer::new(runner, tmp.path());
        let opts = InitOptions {
            package_manager: Some(PackageManager::Pnpm),
            ..options()
        };

        let err = init(tmp.path(), "react", &opts, &mut source, &installer)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Install { .. }));
        assert!(tmp.path().join("src/main.tsx").exists());
        assert!(installer.runner().commands()[0].starts_with("pnpm add"));
    }
}
