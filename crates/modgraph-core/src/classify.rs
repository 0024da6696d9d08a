//! Module classification.

use crate::category::Category;
use crate::model::Module;

/// Category of a module; modules without category metadata fall back to
/// [`Category::Internal`].
pub fn classify(module: &Module) -> Category {
    module.category().unwrap_or_default()
}
