//! rVelocity CLI - Component and project scaffolding for React and React Native

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use velocity_core::init::UNSUPPORTED_PLATFORM;
use velocity_core::output;
use velocity_core::{
    ComponentScaffoldRequest, InitOptions, InitOutcome, Installer, PackageManager, Platform,
    PlatformConfig, ProductConfig, ProjectConfig, ShellRunner, TemplateEngine, TemplateFetcher,
};

/// rVelocity product configuration
#[derive(Clone)]
pub struct RcConfig;

impl ProductConfig for RcConfig {
    fn name(&self) -> &'static str {
        "rc"
    }

    fn display_name(&self) -> &'static str {
        "rVelocity CLI"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/rvelocity/cli"
    }

    fn template_dir_env(&self) -> &'static str {
        "RC_TEMPLATE_DIR"
    }

    fn archive_host_env(&self) -> &'static str {
        "RC_ARCHIVE_HOST"
    }
}

#[derive(Parser, Debug)]
#[command(name = "rc")]
#[command(about = "CLI for scaffolding React and React Native projects and components")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new component for React or React Native
    #[command(name = "g", alias = "generate")]
    Generate(GenerateArgs),
    /// Initialize a new React or React Native project
    Init(InitArgs),
    /// Open CLI documentation
    Docs,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Folder under src/ to create the component in
    pub folder: Option<String>,

    /// Component name
    pub component: Option<String>,

    /// Generate a component for React Native (also accepted as -rn)
    #[arg(long = "react-native")]
    pub react_native: bool,

    /// Platform id (react or react-native), overrides --react-native
    #[arg(long)]
    pub platform: Option<String>,

    /// Directory with component template overrides
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Initialize a React Native project (also accepted as -rn)
    #[arg(long = "react-native")]
    pub react_native: bool,

    /// Platform id (react or react-native), overrides --react-native
    #[arg(long)]
    pub platform: Option<String>,

    /// Overwrite an existing src/ directory
    #[arg(long)]
    pub force: bool,

    /// Do not open the platform docs when done
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Local checkout of the starter template to use instead of GitHub (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Package manager to install with instead of detecting it from lockfiles
    #[arg(long = "package-manager")]
    pub package_manager: Option<PackageManager>,
}

/// Rewrite the single-dash `-rn` flag into its long form
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-rn" {
                OsString::from("--react-native")
            } else {
                arg
            }
        })
        .collect()
}

fn platform_id(react_native: bool, platform: Option<String>) -> String {
    platform.unwrap_or_else(|| {
        if react_native {
            Platform::Mobile.id().to_string()
        } else {
            Platform::Web.id().to_string()
        }
    })
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let project_root = std::env::current_dir().context("Failed to read the current directory")?;
    let project_config = ProjectConfig::load(&project_root)?;

    let platform = Platform::parse(&platform_id(args.react_native, args.platform))?;

    let engine = match args.template_dir.or(project_config.template_dir) {
        Some(dir) => TemplateEngine::with_overrides(&dir).await?,
        None => TemplateEngine::builtin(),
    };

    let request = ComponentScaffoldRequest::new(
        args.folder.unwrap_or_default(),
        args.component.unwrap_or_default(),
        platform,
    );
    velocity_core::generate(&project_root, &request, &engine).await?;

    Ok(())
}

async fn run_init(config: &RcConfig, args: InitArgs) -> Result<()> {
    let platform_id = platform_id(args.react_native, args.platform);
    let Some(platform_config) = PlatformConfig::lookup(&platform_id) else {
        output::error(UNSUPPORTED_PLATFORM);
        return Ok(());
    };

    let project_root = std::env::current_dir().context("Failed to read the current directory")?;
    let project_config = ProjectConfig::load(&project_root)?;

    let options = InitOptions {
        force: args.force,
        open_docs: project_config.open_docs && !args.no_open,
        package_manager: args.package_manager.or(project_config.package_manager),
    };

    let mut fetcher = TemplateFetcher::from_config(config, args.template_dir)?;
    output::info(format!("Using templates from {}", fetcher.source()));
    let installer = Installer::new(ShellRunner, &project_root);

    let outcome = velocity_core::init(
        &project_root,
        platform_config.platform.id(),
        &options,
        &mut fetcher,
        &installer,
    )
    .await?;

    if let InitOutcome::Initialized { package_manager, .. } = outcome {
        output::success(format!("Dependencies installed with {}.", package_manager));
    }

    Ok(())
}

fn open_docs(config: &RcConfig) -> Result<()> {
    output::info(format!(
        "Opening {} documentation in your browser...",
        config.display_name()
    ));
    open::that(config.docs_url())
        .with_context(|| format!("Failed to open {}", config.docs_url()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse_from(normalize_args(std::env::args_os()));
    let config = RcConfig;

    let result = match args.command {
        Command::Generate(generate_args) => run_generate(generate_args).await,
        Command::Init(init_args) => run_init(&config, init_args).await,
        Command::Docs => open_docs(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_rn_flag_is_normalized() {
        let args = parse(&["rc", "g", "components", "Card", "-rn"]);
        match args.command {
            Command::Generate(g) => {
                assert!(g.react_native);
                assert_eq!(g.folder.as_deref(), Some("components"));
                assert_eq!(g.component.as_deref(), Some("Card"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_init_flags() {
        let args = parse(&["rc", "init", "-rn", "--force", "--package-manager", "pnpm"]);
        match args.command {
            Command::Init(i) => {
                assert!(i.react_native);
                assert!(i.force);
                assert_eq!(i.package_manager, Some(PackageManager::Pnpm));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_platform_id_defaults_to_react() {
        assert_eq!(platform_id(false, None), "react");
        assert_eq!(platform_id(true, None), "react-native");
        assert_eq!(platform_id(true, Some("vue".to_string())), "vue");
    }

    #[test]
    fn test_missing_generate_arguments_parse() {
        let args = parse(&["rc", "g", "components"]);
        match args.command {
            Command::Generate(g) => assert!(g.component.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
