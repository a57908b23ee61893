pub mod types;
pub mod compiler;
pub mod binding;
pub mod index;
pub mod validation;
pub mod picker;

pub use types::*;
pub use compiler::{check_structure, CompiledMenu, MenuCompiler};
pub use binding::{BindingGraph, BindingValidator, BindingViolation};
pub use index::{IndexStats, NavigationIndex};
pub use validation::{validate_menu_configuration, ValidationIssue, ValidationReport};
pub use picker::{available_bind_targets, bind_target_options, BindTargetOption};

use std::path::Path;

use crate::error::NavigationResult;

/// Load a menu configuration tree from a `.json` or `.yaml` file
pub fn load_menu_configuration(path: impl AsRef<Path>) -> NavigationResult<Vec<MenuConfig>> {
    crate::format::read_structured(path.as_ref())
}
