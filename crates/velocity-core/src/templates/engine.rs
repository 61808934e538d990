//! Component template rendering
//!
//! Templates are plain files holding the [`PLACEHOLDER`] token, which is
//! replaced by the component name everywhere it appears. The built-in set is
//! compiled into the binary; a project can override any of them from a
//! directory.

use crate::error::Result;
use crate::fs;
use crate::platform::Platform;
use std::path::Path;

/// Token replaced by the component name
pub const PLACEHOLDER: &str = "__COMPONENT__";

const COMPONENT_WEB: &str = include_str!("../../templates/component.web.tsx");
const COMPONENT_MOBILE: &str = include_str!("../../templates/component.mobile.tsx");
const STYLES_WEB: &str = include_str!("../../templates/styles.web.css");
const STYLES_MOBILE: &str = include_str!("../../templates/styles.mobile.ts");
const BARREL: &str = include_str!("../../templates/index.ts");

/// The five templates a component is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEngine {
    component_web: String,
    component_mobile: String,
    styles_web: String,
    styles_mobile: String,
    barrel: String,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateEngine {
    /// Template file names, as looked up in an override directory
    pub const FILE_NAMES: [&'static str; 5] = [
        "component.web.tsx",
        "component.mobile.tsx",
        "styles.web.css",
        "styles.mobile.ts",
        "index.ts",
    ];

    /// Templates shipped with the CLI
    pub fn builtin() -> Self {
        Self {
            component_web: COMPONENT_WEB.to_string(),
            component_mobile: COMPONENT_MOBILE.to_string(),
            styles_web: STYLES_WEB.to_string(),
            styles_mobile: STYLES_MOBILE.to_string(),
            barrel: BARREL.to_string(),
        }
    }

    /// Built-in templates with any files present in `dir` taking their place
    pub async fn with_overrides(dir: &Path) -> Result<Self> {
        let mut engine = Self::builtin();
        let [component_web, component_mobile, styles_web, styles_mobile, barrel] =
            Self::FILE_NAMES;

        for (name, slot) in [
            (component_web, &mut engine.component_web),
            (component_mobile, &mut engine.component_mobile),
            (styles_web, &mut engine.styles_web),
            (styles_mobile, &mut engine.styles_mobile),
            (barrel, &mut engine.barrel),
        ] {
            let path = dir.join(name);
            if path.exists() {
                *slot = fs::read_template(&path).await?;
            }
        }

        Ok(engine)
    }

    pub fn render_component(&self, name: &str, platform: Platform) -> String {
        let template = match platform {
            Platform::Web => &self.component_web,
            Platform::Mobile => &self.component_mobile,
        };
        fill(template, name)
    }

    pub fn render_styles(&self, name: &str, platform: Platform) -> String {
        let template = match platform {
            Platform::Web => &self.styles_web,
            Platform::Mobile => &self.styles_mobile,
        };
        fill(template, name)
    }

    pub fn render_barrel(&self, name: &str) -> String {
        fill(&self.barrel, name)
    }
}

fn fill(template: &str, name: &str) -> String {
    template.replace(PLACEHOLDER, name)
}

/// File extension of the stylesheet for a platform
pub fn styles_file_name(platform: Platform) -> &'static str {
    match platform {
        Platform::Web => "styles.css",
        Platform::Mobile => "styles.ts",
    }
}
