use super::principal::PermissionSet;
use super::types::RouteNode;

/// Filters the static route table down to what the router may register
pub struct RouteAccess;

impl RouteAccess {
    /// A node survives only if permitted; survivors have their children filtered
    /// recursively. A rejected node takes its whole subtree with it. The input is
    /// never mutated so the table stays reusable across sessions.
    pub fn filter(routes: &[RouteNode], permissions: &PermissionSet) -> Vec<RouteNode> {
        routes
            .iter()
            .filter(|route| route.is_permitted(permissions))
            .map(|route| {
                let mut allowed = route.clone();
                allowed.children = Self::filter(&route.children, permissions);
                allowed
            })
            .collect()
    }

    /// Depth-first lookup by route name
    pub fn find<'a>(routes: &'a [RouteNode], name: &str) -> Option<&'a RouteNode> {
        routes
            .iter()
            .find_map(|r| if r.name == name { Some(r) } else { Self::find(&r.children, name) })
    }

    /// Count of nodes in a route tree, children included
    pub fn count(routes: &[RouteNode]) -> usize {
        routes.iter().map(|r| 1 + Self::count(&r.children)).sum()
    }
}

pub fn filter_routes(routes: &[RouteNode], permissions: &PermissionSet) -> Vec<RouteNode> {
    RouteAccess::filter(routes, permissions)
}
