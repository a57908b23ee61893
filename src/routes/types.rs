use serde::{Deserialize, Serialize};

use super::principal::PermissionSet;

/// One entry of the static route table compiled into the client bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::format::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub permission_code: Option<String>,
    /// Legacy any-of list, consulted only when `permission_code` is absent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            title: None,
            permission_code: None,
            permissions: Vec::new(),
            roles: Vec::new(),
            requires_auth: false,
            hidden: false,
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn with_permission(mut self, code: impl Into<String>) -> Self {
        self.permission_code = Some(code.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    pub fn requiring_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Whether the permission set unlocks this node (children not considered).
    /// Nodes with neither a permission code nor legacy permissions are public.
    pub fn is_permitted(&self, permissions: &PermissionSet) -> bool {
        match &self.permission_code {
            Some(code) => permissions.contains(code),
            None if self.permissions.is_empty() => true,
            None => self.permissions.iter().any(|p| permissions.contains(p)),
        }
    }

    /// Join this node's path segment onto an already-resolved parent path.
    /// Absolute segments replace the parent outright.
    pub fn resolve_path(&self, parent_path: &str) -> String {
        join_path(parent_path, &self.path)
    }
}

/// Resolved navigable target of a permission code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTarget {
    pub path: String,
    pub name: String,
}

pub fn join_path(parent: &str, segment: &str) -> String {
    if segment.starts_with('/') {
        return collapse_slashes(segment);
    }
    if segment.is_empty() {
        return if parent.is_empty() { "/".to_string() } else { parent.to_string() };
    }
    collapse_slashes(&format!("{}/{}", parent, segment))
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}
