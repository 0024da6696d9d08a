//! Fill colours per category, as Graphviz colour names.

use crate::category::Category;

/// Neutral colour for the fallback category and anything without its own entry.
pub const DEFAULT_COLOR: &str = "gray95";

pub fn color(category: Category) -> &'static str {
    match category {
        Category::Startup => "chartreuse3",
        Category::Worker => "lightblue",
        Category::Core => "azure3",
        _ => DEFAULT_COLOR,
    }
}
