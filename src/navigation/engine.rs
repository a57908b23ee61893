use chrono::Utc;

use crate::config::{DuplicatePolicy, NavigationConfig};
use crate::error::NavigationResult;
use crate::menu::{BindingValidator, MenuCompiler, MenuConfig, NavigationIndex};
use crate::routes::{check_route_access, filter_routes, PermissionIndex, Principal, RouteAccess, RouteNode};

use super::snapshot::NavigationSnapshot;

/// Holds the static route table and its permission index, and turns a
/// principal plus menu configuration into a snapshot.
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    routes: Vec<RouteNode>,
    permission_index: PermissionIndex,
    debug_logging: bool,
    super_admin_roles: Vec<String>,
}

impl NavigationEngine {
    /// The permission index is built here, once per route table. Under
    /// `DuplicatePolicy::Reject` a shared permission code is an error.
    pub fn new(routes: Vec<RouteNode>, policy: DuplicatePolicy) -> NavigationResult<Self> {
        let permission_index = PermissionIndex::build_with_policy(&routes, policy)?;
        tracing::debug!(
            "Permission index built: {} codes over {} top-level routes",
            permission_index.len(),
            routes.len()
        );
        Ok(Self {
            routes,
            permission_index,
            debug_logging: false,
            super_admin_roles: Vec::new(),
        })
    }

    pub fn from_config(routes: Vec<RouteNode>, config: &NavigationConfig) -> NavigationResult<Self> {
        let mut engine = Self::new(routes, config.duplicate_permission_policy)?;
        engine.debug_logging = config.debug_logging;
        engine.super_admin_roles = config.super_admin_roles.clone();
        Ok(engine)
    }

    pub fn routes(&self) -> &[RouteNode] {
        &self.routes
    }

    pub fn permission_index(&self) -> &PermissionIndex {
        &self.permission_index
    }

    /// Router guard for a named route; `None` when the table has no such route
    pub fn check_access(&self, route_name: &str, principal: Option<&Principal>) -> Option<bool> {
        RouteAccess::find(&self.routes, route_name)
            .map(|route| check_route_access(route, principal, &self.super_admin_roles))
    }

    /// compile -> repair bindings -> index, plus the route filter, as one unit.
    /// Never fails; defects in `menus` show up as diagnostics.
    pub fn compile(&self, generation: u64, principal: Principal, menus: &[MenuConfig]) -> NavigationSnapshot {
        let compiled = MenuCompiler::compile(menus, &self.permission_index);
        let mut tree = compiled.tree;
        let repairs = BindingValidator::validate_and_repair(&mut tree);
        let index = NavigationIndex::build(&tree);
        let allowed_routes = filter_routes(&self.routes, &principal.permissions);

        if self.debug_logging {
            for (_, node) in tree.iter() {
                tracing::debug!(
                    "menu '{}' level={} path={:?} hidden={} bind={:?}",
                    node.id,
                    node.level,
                    node.path,
                    node.hidden,
                    node.bind_menu_id
                );
            }
        }

        let mut diagnostics = self.permission_index.diagnostics().to_vec();
        diagnostics.extend(compiled.diagnostics);
        diagnostics.extend(repairs);

        NavigationSnapshot {
            generation,
            loaded_at: Some(Utc::now()),
            principal,
            allowed_routes,
            tree,
            index,
            diagnostics,
        }
    }
}
