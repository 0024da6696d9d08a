//! Modules and dependency declarations as supplied by the build.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, IntoStaticStr};
use tracing::debug;

use modgraph_error::{Error, Result};

use crate::category::Category;

/// The configuration a dependency is declared in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    Runtime,
    Compile,
    Implementation,
    Api,
    CompileOnly,
    RuntimeOnly,
    TestImplementation,
    TestCompileOnly,
    TestRuntimeOnly,
    AnnotationProcessor,
    /// Any configuration name not listed above.
    #[serde(other)]
    Other,
}

impl RelationKind {
    /// Only these kinds produce edges in the graph.
    pub fn is_graph_relevant(&self) -> bool {
        matches!(
            self,
            RelationKind::Runtime
                | RelationKind::Compile
                | RelationKind::Implementation
                | RelationKind::Api
                | RelationKind::CompileOnly
        )
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// What a dependency declaration points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyTarget {
    /// Another module of the same build, by name.
    Module(String),
    /// An artifact from outside the build, e.g. `group:name:version`.
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub kind: RelationKind,
    pub target: DependencyTarget,
}

impl Dependency {
    pub fn module(kind: RelationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            target: DependencyTarget::Module(name.into()),
        }
    }

    pub fn external(kind: RelationKind, coordinates: impl Into<String>) -> Self {
        Self {
            kind,
            target: DependencyTarget::External(coordinates.into()),
        }
    }

    /// Name of the target module, if this points inside the build.
    pub fn target_module(&self) -> Option<&str> {
        match &self.target {
            DependencyTarget::Module(name) => Some(name),
            DependencyTarget::External(_) => None,
        }
    }
}

/// One unit of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    category: Option<Category>,
    dependencies: Vec<Dependency>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Shorthand for a dependency on another module of the build.
    pub fn depends_on(self, kind: RelationKind, target: impl Into<String>) -> Self {
        self.with_dependency(Dependency::module(kind, target))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category metadata attached by the build, if any.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Declarations in the order the build declared them.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }
}

/// The full set of modules of one build, indexed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildModel {
    modules: Vec<Module>,
    by_name: HashMap<String, usize>,
}

impl BuildModel {
    /// Build the model, rejecting duplicate module names.
    ///
    /// A module may not be named exactly like a category: the rendered graph
    /// declares each category label as a bare node with that id.
    pub fn new(modules: Vec<Module>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(modules.len());
        for (idx, module) in modules.iter().enumerate() {
            if let Some(category) = Category::iter().find(|c| c.name() == module.name) {
                return Err(Error::invalid_format(format!(
                    "module '{}' collides with the {category} category label",
                    module.name
                ))
                .with_operation("model::new")
                .with_context("module", module.name.clone()));
            }
            if by_name.insert(module.name.clone(), idx).is_some() {
                return Err(Error::invalid_format(format!(
                    "module '{}' is declared more than once",
                    module.name
                ))
                .with_operation("model::new")
                .with_context("module", module.name.clone()));
            }
        }
        debug!(modules = modules.len(), "build model created");
        Ok(Self { modules, by_name })
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.by_name.get(name).map(|&idx| &self.modules[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
