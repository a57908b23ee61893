use serde::Serialize;

use crate::menu::{BreadcrumbItem, IndexStats, MenuNode, MenuTree, MenuType, MenuView, NavigationIndex, NodeId};

/// Read-side facade over one snapshot. Every lookup miss yields an empty
/// result; "nothing active" is a valid state.
#[derive(Debug, Clone, Copy)]
pub struct NavigationQuery<'a> {
    tree: &'a MenuTree,
    index: &'a NavigationIndex,
}

/// Everything the shell needs for one route, in a single serializable value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub route_name: String,
    pub active_top_menu: Option<String>,
    pub active_menu_ids: Vec<String>,
    pub breadcrumbs: Vec<BreadcrumbItem>,
    pub sidebar_menus: Vec<MenuView>,
}

impl<'a> NavigationQuery<'a> {
    pub fn new(tree: &'a MenuTree, index: &'a NavigationIndex) -> Self {
        Self { tree, index }
    }

    /// Node for a route, with a hidden bound node replaced by its anchor
    fn anchor(&self, route_name: &str) -> Option<NodeId> {
        let node = self.index.by_route_name(route_name)?;
        if self.tree.get(node).is_bound() {
            if let Some(target) = self.index.binding_target(node) {
                return Some(target);
            }
        }
        Some(node)
    }

    fn active_top_id(&self, route_name: &str) -> Option<NodeId> {
        let mut current = self.anchor(route_name)?;
        loop {
            let node = self.tree.get(current);
            if node.menu_type == MenuType::Top {
                return Some(current);
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    /// Nearest `top` ancestor, or the root ancestor when there is none
    pub fn active_top_menu(&self, route_name: &str) -> Option<&'a MenuNode> {
        self.active_top_id(route_name).map(|id| self.tree.get(id))
    }

    pub fn sidebar_menus(&self, route_name: &str) -> Vec<MenuView> {
        let Some(top) = self.active_top_id(route_name) else {
            return Vec::new();
        };
        let visible = |node: &MenuNode| !node.hidden;
        self.tree
            .children(top)
            .filter(|(_, node)| !node.hidden)
            .map(|(id, _)| self.tree.view_filtered(id, &visible))
            .collect()
    }

    pub fn breadcrumbs(&self, route_name: &str) -> Vec<BreadcrumbItem> {
        self.anchor(route_name)
            .map(|id| self.tree.get(id).breadcrumb_path.clone())
            .unwrap_or_default()
    }

    /// Root-to-self menu ids, used to mark the active sidebar entries
    pub fn ancestor_id_chain(&self, route_name: &str) -> Vec<String> {
        self.anchor(route_name)
            .map(|id| {
                self.tree
                    .lineage(id)
                    .into_iter()
                    .map(|n| self.tree.get(n).id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn top_menus(&self) -> Vec<&'a MenuNode> {
        self.tree
            .roots()
            .filter(|(_, node)| node.menu_type == MenuType::Top)
            .map(|(_, node)| node)
            .collect()
    }

    /// Landing path for a menu: its own path, else the first visible descendant path
    pub fn resolve_menu_path(&self, menu_id: &str) -> Option<&'a str> {
        let id = self.index.by_id(menu_id)?;
        if let Some(path) = self.tree.get(id).path.as_deref() {
            return Some(path);
        }
        self.first_visible_path(id)
    }

    fn first_visible_path(&self, id: NodeId) -> Option<&'a str> {
        let tree = self.tree;
        for &child in &tree.get(id).children {
            let node = tree.get(child);
            if let (Some(path), false) = (node.path.as_deref(), node.hidden) {
                return Some(path);
            }
            if let Some(path) = self.first_visible_path(child) {
                return Some(path);
            }
        }
        None
    }

    pub fn menu_by_id(&self, menu_id: &str) -> Option<&'a MenuNode> {
        self.index.by_id(menu_id).map(|id| self.tree.get(id))
    }

    pub fn menu_by_permission_code(&self, code: &str) -> Option<&'a MenuNode> {
        self.index.by_permission_code(code).map(|id| self.tree.get(id))
    }

    pub fn hidden_children(&self, parent_code: &str) -> Vec<&'a MenuNode> {
        self.index
            .hidden_children(parent_code)
            .iter()
            .map(|&id| self.tree.get(id))
            .collect()
    }

    pub fn child_ids(&self, menu_id: &str) -> Vec<String> {
        self.index
            .by_id(menu_id)
            .map(|id| self.tree.children(id).map(|(_, n)| n.id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn navigation_state(&self, route_name: &str) -> NavigationState {
        NavigationState {
            route_name: route_name.to_string(),
            active_top_menu: self.active_top_menu(route_name).map(|n| n.id.clone()),
            active_menu_ids: self.ancestor_id_chain(route_name),
            breadcrumbs: self.breadcrumbs(route_name),
            sidebar_menus: self.sidebar_menus(route_name),
        }
    }
}
