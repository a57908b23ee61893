pub mod types;
pub mod index;
pub mod access;
pub mod principal;

pub use types::*;
pub use index::PermissionIndex;
pub use access::{filter_routes, RouteAccess};
pub use principal::{check_route_access, PermissionSet, Principal};

use std::path::Path;

use crate::error::NavigationResult;

/// Load a route table from a `.yaml`/`.yml` or `.json` file
pub fn load_route_table(path: impl AsRef<Path>) -> NavigationResult<Vec<RouteNode>> {
    crate::format::read_structured(path.as_ref())
}
