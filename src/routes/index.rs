use std::collections::HashMap;

use crate::config::DuplicatePolicy;
use crate::error::{Diagnostic, DiagnosticKind, NavigationError, NavigationResult};

use super::types::{RouteNode, RouteTarget};

/// Lookup from permission code (and route name) to a resolved route target.
/// Built once per route table; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PermissionIndex {
    by_code: HashMap<String, RouteTarget>,
    by_name: HashMap<String, RouteTarget>,
    diagnostics: Vec<Diagnostic>,
}

impl PermissionIndex {
    /// Build with last-wins semantics for duplicate permission codes
    pub fn build(routes: &[RouteNode]) -> Self {
        let mut index = Self::default();
        // LastWins never errors
        let _ = index.walk(routes, "", DuplicatePolicy::LastWins);
        index
    }

    pub fn build_with_policy(routes: &[RouteNode], policy: DuplicatePolicy) -> NavigationResult<Self> {
        let mut index = Self::default();
        index.walk(routes, "", policy)?;
        Ok(index)
    }

    fn walk(&mut self, routes: &[RouteNode], parent_path: &str, policy: DuplicatePolicy) -> NavigationResult<()> {
        for route in routes {
            let full_path = route.resolve_path(parent_path);
            let target = RouteTarget {
                path: full_path.clone(),
                name: route.name.clone(),
            };

            if let Some(code) = &route.permission_code {
                if let Some(previous) = self.by_code.get(code) {
                    if policy == DuplicatePolicy::Reject {
                        return Err(NavigationError::DuplicatePermissionCode {
                            code: code.clone(),
                            first: previous.name.clone(),
                            second: route.name.clone(),
                        });
                    }
                    tracing::warn!(
                        "Permission code '{}' on route '{}' overwrites route '{}'",
                        code,
                        route.name,
                        previous.name
                    );
                    self.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::PermissionCodeOverwritten,
                        format!(
                            "permission code '{}' on route '{}' overwrites route '{}'",
                            code, route.name, previous.name
                        ),
                    ));
                }
                self.by_code.insert(code.clone(), target.clone());
            }

            self.by_name.insert(route.name.clone(), target);

            // Recurse regardless of whether this node carries a code
            if !route.children.is_empty() {
                self.walk(&route.children, &full_path, policy)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, permission_code: &str) -> Option<&RouteTarget> {
        self.by_code.get(permission_code)
    }

    pub fn find_route_by_name(&self, name: &str) -> Option<&RouteTarget> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteTarget)> {
        self.by_code.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl FromIterator<(String, RouteTarget)> for PermissionIndex {
    fn from_iter<I: IntoIterator<Item = (String, RouteTarget)>>(iter: I) -> Self {
        let mut index = Self::default();
        for (code, target) in iter {
            index.by_name.insert(target.name.clone(), target.clone());
            index.by_code.insert(code, target);
        }
        index
    }
}
