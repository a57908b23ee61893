use std::collections::HashMap;

use serde::Serialize;

use super::types::{MenuTree, NodeId};

/// Secondary lookups over one compiled tree, rebuilt together with it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationIndex {
    by_id: HashMap<String, NodeId>,
    by_permission_code: HashMap<String, NodeId>,
    by_route_name: HashMap<String, NodeId>,
    hidden_children_by_parent_code: HashMap<String, Vec<NodeId>>,
    bindings: HashMap<NodeId, NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total_menus: usize,
    pub permission_code_mappings: usize,
    pub route_name_mappings: usize,
    pub hidden_menu_mappings: usize,
    pub bindings: usize,
}

impl NavigationIndex {
    /// Expects a tree whose bindings were already repaired
    pub fn build(tree: &MenuTree) -> Self {
        let mut index = Self::default();

        for (id, node) in tree.iter() {
            index.by_id.entry(node.id.clone()).or_insert(id);
            if let Some(code) = &node.permission_code {
                index.by_permission_code.insert(code.clone(), id);
            }
            if let Some(route_name) = &node.route_name {
                index.by_route_name.insert(route_name.clone(), id);
            }
        }

        // Bindings need the complete id map, so they resolve in a second sweep
        for (id, node) in tree.iter() {
            if !node.is_bound() {
                continue;
            }
            let Some(target) = node.bind_menu_id.as_deref().and_then(|t| index.by_id.get(t)).copied() else {
                continue;
            };
            index.bindings.insert(id, target);
            if let Some(code) = &tree.get(target).permission_code {
                index
                    .hidden_children_by_parent_code
                    .entry(code.clone())
                    .or_default()
                    .push(id);
            }
        }

        index
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    pub fn by_permission_code(&self, code: &str) -> Option<NodeId> {
        self.by_permission_code.get(code).copied()
    }

    pub fn by_route_name(&self, route_name: &str) -> Option<NodeId> {
        self.by_route_name.get(route_name).copied()
    }

    /// Hidden nodes bound to the visible node carrying `parent_code`
    pub fn hidden_children(&self, parent_code: &str) -> &[NodeId] {
        self.hidden_children_by_parent_code
            .get(parent_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn binding_target(&self, node: NodeId) -> Option<NodeId> {
        self.bindings.get(&node).copied()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_menus: self.by_id.len(),
            permission_code_mappings: self.by_permission_code.len(),
            route_name_mappings: self.by_route_name.len(),
            hidden_menu_mappings: self.hidden_children_by_parent_code.len(),
            bindings: self.bindings.len(),
        }
    }
}
