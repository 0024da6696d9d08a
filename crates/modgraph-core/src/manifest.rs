//! Build manifest loading.
//!
//! A manifest lists the modules of a build, their optional category and
//! their dependency declarations. TOML is the primary format:
//!
//! ```toml
//! [[module]]
//! name = "core"
//! category = "CORE"
//!
//! [[module.dependency]]
//! kind = "implementation"
//! project = "base-services"
//!
//! [[module.dependency]]
//! kind = "api"
//! external = "com.google.guava:guava:27.1-android"
//! ```
//!
//! The same shape is accepted as JSON, where the plural keys `modules` and
//! `dependencies` read more naturally.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use modgraph_error::{Error, Result};

use crate::category::Category;
use crate::model::{BuildModel, Dependency, Module, RelationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// `.json` files are JSON, everything else is treated as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default, rename = "module", alias = "modules")]
    modules: Vec<ModuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleEntry {
    name: String,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default, rename = "dependency", alias = "dependencies")]
    dependencies: Vec<DependencyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyEntry {
    kind: RelationKind,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    external: Option<String>,
}

impl DependencyEntry {
    fn into_dependency(self, owner: &str) -> Result<Dependency> {
        match (self.project, self.external) {
            (Some(project), None) => Ok(Dependency::module(self.kind, project)),
            (None, Some(external)) => Ok(Dependency::external(self.kind, external)),
            (project, external) => {
                let problem = if project.is_some() && external.is_some() {
                    "sets both 'project' and 'external'"
                } else {
                    "needs one of 'project' or 'external'"
                };
                Err(Error::invalid_format(format!(
                    "'{}' dependency of module '{owner}' {problem}",
                    self.kind
                ))
                .with_context("module", owner))
            }
        }
    }
}

impl ModuleEntry {
    fn into_module(self) -> Result<Module> {
        let mut module = Module::new(self.name);
        if let Some(category) = self.category {
            module = module.with_category(category);
        }
        for entry in self.dependencies {
            let dependency = entry.into_dependency(module.name())?;
            module = module.with_dependency(dependency);
        }
        Ok(module)
    }
}

/// Parse manifest text into a build model.
pub fn parse_manifest(text: &str, format: ManifestFormat) -> Result<BuildModel> {
    let file: ManifestFile = match format {
        ManifestFormat::Toml => toml::from_str(text).map_err(|e| {
            Error::deserialization_failed(e.message().to_string())
                .with_context("format", "toml")
                .set_source(e)
        }),
        ManifestFormat::Json => serde_json::from_str(text).map_err(|e| {
            Error::deserialization_failed(e.to_string())
                .with_context("format", "json")
                .set_source(e)
        }),
    }
    .map_err(|e| e.with_operation("manifest::parse"))?;

    let modules = file
        .modules
        .into_iter()
        .map(ModuleEntry::into_module)
        .collect::<Result<Vec<_>>>()
        .map_err(|e| e.with_operation("manifest::parse"))?;

    debug!(modules = modules.len(), "manifest parsed");
    BuildModel::new(modules)
}

/// Read and parse the manifest at `path`, choosing the format by extension.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<BuildModel> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        Error::io_at(e, path.display().to_string()).with_operation("manifest::load")
    })?;

    let model = parse_manifest(&text, ManifestFormat::from_path(path))
        .map_err(|e| e.with_context("path", path.display().to_string()))?;
    info!(path = %path.display(), modules = model.len(), "loaded build manifest");
    Ok(model)
}
