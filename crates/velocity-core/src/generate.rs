//! Component generation: `rc g <folder> <component>`

use crate::error::{Error, Result};
use crate::fs;
use crate::output;
use crate::platform::Platform;
use crate::templates::engine::{styles_file_name, TemplateEngine};
use std::path::{Path, PathBuf};

/// Usage line shown when arguments are missing
pub const USAGE: &str = "Please provide folder and component name: rc g <folder> <component> [-rn]";

/// A component to scaffold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentScaffoldRequest {
    /// Folder under `src/`
    pub parent_folder: String,
    pub component_name: String,
    pub platform: Platform,
}

impl ComponentScaffoldRequest {
    pub fn new(
        parent_folder: impl Into<String>,
        component_name: impl Into<String>,
        platform: Platform,
    ) -> Self {
        Self {
            parent_folder: parent_folder.into(),
            component_name: component_name.into(),
            platform,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.parent_folder.trim().is_empty() || self.component_name.trim().is_empty() {
            return Err(Error::UserInput(USAGE.to_string()));
        }
        Ok(())
    }
}

/// Paths written for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFileSet {
    pub directory: PathBuf,
    pub component: PathBuf,
    pub styles: PathBuf,
    pub barrel: PathBuf,
}

impl GeneratedFileSet {
    pub fn for_request(project_root: &Path, request: &ComponentScaffoldRequest) -> Self {
        let name = &request.component_name;
        let directory = project_root
            .join("src")
            .join(&request.parent_folder)
            .join(name);

        Self {
            component: directory.join(format!("{}.tsx", name)),
            styles: directory.join(styles_file_name(request.platform)),
            barrel: directory.join("index.ts"),
            directory,
        }
    }
}

/// Scaffold a component under `<project_root>/src/<folder>/<name>/`.
///
/// Existing files are overwritten. A failed write leaves earlier files of the
/// same run on disk.
pub async fn generate(
    project_root: &Path,
    request: &ComponentScaffoldRequest,
    engine: &TemplateEngine,
) -> Result<GeneratedFileSet> {
    request.validate()?;

    let files = GeneratedFileSet::for_request(project_root, request);
    let name = &request.component_name;

    let component = engine.render_component(name, request.platform);
    let styles = engine.render_styles(name, request.platform);
    let barrel = engine.render_barrel(name);

    fs::create_directory(&files.directory).await?;

    fs::write_file(&files.component, component).await?;
    fs::write_file(&files.styles, styles).await?;
    fs::write_file(&files.barrel, barrel).await?;

    output::success(format!(
        "{} component for {} created successfully in {}/{}.tsx",
        name,
        match request.platform {
            Platform::Mobile => "React Native",
            Platform::Web => "ReactJS",
        },
        request.parent_folder,
        name
    ));

    Ok(files)
}
