use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::RouteNode;

/// Deduplicated permission codes held by the signed-in principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.0.insert(code.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Sorted copy, for stable output
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.0.iter().cloned().collect();
        codes.sort();
        codes
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(codes: Vec<String>) -> Self {
        Self(codes.into_iter().collect())
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        set.to_sorted_vec()
    }
}

/// The signed-in user as delivered by the user-info payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_permissions<S: Into<String>>(mut self, codes: impl IntoIterator<Item = S>) -> Self {
        self.permissions = codes.into_iter().collect();
        self
    }

    pub fn with_roles<S: Into<String>>(mut self, roles: impl IntoIterator<Item = S>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_super_admin(&self, super_admin_roles: &[String]) -> bool {
        self.roles.iter().any(|r| super_admin_roles.contains(r))
    }

    /// Any-of by default, all-of when `require_all` is set. An empty requirement passes.
    pub fn has_permission(&self, codes: &[&str], require_all: bool) -> bool {
        if codes.is_empty() {
            return true;
        }
        if require_all {
            codes.iter().all(|c| self.permissions.contains(c))
        } else {
            codes.iter().any(|c| self.permissions.contains(c))
        }
    }

    pub fn has_role(&self, roles: &[&str], require_all: bool) -> bool {
        if roles.is_empty() {
            return true;
        }
        let held = |role: &&str| self.roles.iter().any(|r| r == role);
        if require_all {
            roles.iter().all(held)
        } else {
            roles.iter().any(held)
        }
    }
}

/// Router guard check for a single route. `None` means nobody is signed in.
pub fn check_route_access(
    route: &RouteNode,
    principal: Option<&Principal>,
    super_admin_roles: &[String],
) -> bool {
    if !route.requires_auth {
        return true;
    }

    let Some(principal) = principal else {
        return false;
    };

    if principal.is_super_admin(super_admin_roles) {
        return true;
    }

    if let Some(code) = &route.permission_code {
        if !principal.permissions.contains(code) {
            tracing::debug!(
                "Route '{}' denied: missing permission code '{}'",
                route.name,
                code
            );
            return false;
        }
    }

    if !route.permissions.is_empty() {
        let required: Vec<&str> = route.permissions.iter().map(String::as_str).collect();
        if !principal.has_permission(&required, false) {
            tracing::debug!("Route '{}' denied: none of {:?} held", route.name, route.permissions);
            return false;
        }
    }

    if !route.roles.is_empty() {
        let required: Vec<&str> = route.roles.iter().map(String::as_str).collect();
        if !principal.has_role(&required, false) {
            tracing::debug!("Route '{}' denied: none of roles {:?} held", route.name, route.roles);
            return false;
        }
    }

    true
}
