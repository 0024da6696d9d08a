use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use modgraph_error::{Error, Result};

/// Module type used to cluster and colour modules.
///
/// `Internal` is the fallback for modules that carry no category metadata.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Internal,
    Startup,
    Worker,
    Core,
    Plugin,
    EntryPoint,
    #[strum(serialize = "REQUIRES_JAVA_9_COMPILER")]
    #[serde(rename = "REQUIRES_JAVA_9_COMPILER")]
    RequiresJava9Compiler,
}

impl Category {
    /// Upper-case display name, e.g. `ENTRY_POINT`.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Lower-case form used for subgraph cluster ids, e.g. `entry_point`.
    pub fn cluster_key(&self) -> String {
        self.name().to_ascii_lowercase()
    }

    pub fn is_fallback(&self) -> bool {
        *self == Category::Internal
    }
}

/// Allow-list of categories to include in the graph.
///
/// The default admits every category except the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    members: BTreeSet<Category>,
}

impl CategorySet {
    pub fn all() -> Self {
        Category::iter().collect()
    }

    pub fn empty() -> Self {
        Self {
            members: BTreeSet::new(),
        }
    }

    /// Parse category names (case-insensitive), rejecting unknown names.
    pub fn parse_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                Category::from_str(name).map_err(|_| {
                    let known: Vec<&str> = Category::iter().map(|c| c.name()).collect();
                    Error::invalid_argument(format!(
                        "unknown category '{name}', expected one of {}",
                        known.join(", ")
                    ))
                    .with_operation("category::parse")
                    .with_context("category", name)
                })
            })
            .collect()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.members.contains(&category)
    }

    pub fn insert(&mut self, category: Category) -> bool {
        self.members.insert(category)
    }

    pub fn remove(&mut self, category: Category) -> bool {
        self.members.remove(&category)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.members.iter().copied()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Category::iter().filter(|c| !c.is_fallback()).collect()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
