//! Build model for modgraph: modules, their categories, and the dependency
//! declarations between them.
//!
//! The model is read-only once loaded. Graph rendering lives in
//! `modgraph-dot`; this crate only answers "what is in the build".

pub mod category;
pub mod classify;
pub mod manifest;
pub mod model;
pub mod palette;

pub use category::{Category, CategorySet};
pub use classify::classify;
pub use manifest::{ManifestFormat, load_manifest, parse_manifest};
pub use model::{BuildModel, Dependency, DependencyTarget, Module, RelationKind};
pub use modgraph_error::{Error, ErrorKind, Result};
pub use palette::{DEFAULT_COLOR, color};
