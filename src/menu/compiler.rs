use std::collections::HashSet;

use crate::error::{Diagnostic, DiagnosticKind};
use crate::routes::PermissionIndex;

use super::types::{BreadcrumbItem, MenuConfig, MenuNode, MenuTree, MenuType, NodeId};

/// Output of one compilation: the enriched tree plus what was dropped
#[derive(Debug, Clone, Default)]
pub struct CompiledMenu {
    pub tree: MenuTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns raw menu configuration into an enriched `MenuTree`
pub struct MenuCompiler<'a> {
    index: &'a PermissionIndex,
    tree: MenuTree,
    diagnostics: Vec<Diagnostic>,
    seen_ids: HashSet<String>,
}

impl<'a> MenuCompiler<'a> {
    /// Structurally invalid configs are dropped with their subtree. Input order
    /// is preserved; the compiler never sorts.
    pub fn compile(configs: &[MenuConfig], index: &'a PermissionIndex) -> CompiledMenu {
        let mut compiler = MenuCompiler {
            index,
            tree: MenuTree::default(),
            diagnostics: Vec::new(),
            seen_ids: HashSet::new(),
        };

        let roots = compiler.compile_level(configs, None);
        compiler.tree.roots = roots;

        tracing::debug!(
            "Compiled menu tree: {} nodes, {} diagnostics",
            compiler.tree.len(),
            compiler.diagnostics.len()
        );

        CompiledMenu {
            tree: compiler.tree,
            diagnostics: compiler.diagnostics,
        }
    }

    fn compile_level(&mut self, configs: &[MenuConfig], parent: Option<NodeId>) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(configs.len());
        for config in configs {
            let menu_type = match check_structure(config) {
                Ok(menu_type) => menu_type,
                Err(diagnostic) => {
                    tracing::warn!("Dropping menu config: {}", diagnostic);
                    self.diagnostics.push(diagnostic);
                    continue;
                }
            };
            ids.push(self.compile_node(config, menu_type, parent));
        }
        ids
    }

    fn compile_node(&mut self, config: &MenuConfig, menu_type: MenuType, parent: Option<NodeId>) -> NodeId {
        if !self.seen_ids.insert(config.id.clone()) {
            tracing::warn!("Duplicate menu id '{}'; first occurrence owns the id", config.id);
            self.diagnostics.push(
                Diagnostic::new(DiagnosticKind::DuplicateMenuId, "duplicate menu id; first occurrence owns the id")
                    .for_menu(&config.id),
            );
        }

        let index = self.index;
        let route = config
            .permission_code
            .as_deref()
            .and_then(|code| {
                let target = index.get(code);
                if target.is_none() {
                    tracing::debug!(
                        "Menu '{}' permission code '{}' has no route; treating as grouping entry",
                        config.id,
                        code
                    );
                }
                target
            });

        let (level, mut breadcrumb_path) = match parent {
            Some(p) => {
                let parent_node = self.tree.get(p);
                (parent_node.level + 1, parent_node.breadcrumb_path.clone())
            }
            None => (1, Vec::new()),
        };
        breadcrumb_path.push(BreadcrumbItem {
            title: config.title.clone(),
            icon: config.icon.clone(),
            path: route.map(|r| r.path.clone()),
        });

        let id = NodeId(self.tree.nodes.len());
        self.tree.nodes.push(MenuNode {
            id: config.id.clone(),
            title: config.title.clone(),
            icon: config.icon.clone(),
            permission_code: config.permission_code.clone(),
            menu_type,
            hidden: config.hidden,
            bind_menu_id: config.bind_menu_id.clone(),
            path: route.map(|r| r.path.clone()),
            route_name: route.map(|r| r.name.clone()),
            level,
            breadcrumb_path,
            parent,
            children: Vec::new(),
        });

        let children = self.compile_level(&config.children, Some(id));
        self.tree.get_mut(id).children = children;
        id
    }
}

/// Structural validity of a single config: non-empty id and title, known menu type
pub fn check_structure(config: &MenuConfig) -> Result<MenuType, Diagnostic> {
    if config.id.trim().is_empty() {
        return Err(Diagnostic::new(
            DiagnosticKind::MissingId,
            format!("menu '{}' has no id", config.title),
        ));
    }
    if config.title.trim().is_empty() {
        return Err(Diagnostic::new(DiagnosticKind::MissingTitle, "menu has no title").for_menu(&config.id));
    }
    config.kind().ok_or_else(|| {
        Diagnostic::new(
            DiagnosticKind::UnknownMenuType,
            format!("unknown menu type '{}'", config.menu_type),
        )
        .for_menu(&config.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteTarget;

    fn index() -> PermissionIndex {
        PermissionIndex::from_iter([(
            "sys:user".to_string(),
            RouteTarget {
                path: "/system/user".to_string(),
                name: "SystemUser".to_string(),
            },
        )])
    }

    fn system_menu() -> Vec<MenuConfig> {
        vec![MenuConfig::new("sys", "System", MenuType::SidebarDirectory).with_icon("setting").with_children(vec![
            MenuConfig::new("usr", "Users", MenuType::SidebarNav).with_permission("sys:user"),
        ])]
    }

    #[test]
    fn test_resolves_path_level_and_breadcrumbs() {
        let index = index();
        let compiled = MenuCompiler::compile(&system_menu(), &index);
        let tree = &compiled.tree;
        assert!(compiled.diagnostics.is_empty());
        assert_eq!(tree.len(), 2);

        let (sys_id, sys) = tree.roots().next().unwrap();
        assert_eq!(sys.level, 1);
        assert_eq!(sys.path, None);

        let (_, usr) = tree.children(sys_id).next().unwrap();
        assert_eq!(usr.path.as_deref(), Some("/system/user"));
        assert_eq!(usr.route_name.as_deref(), Some("SystemUser"));
        assert_eq!(usr.level, 2);
        assert_eq!(
            usr.breadcrumb_path,
            vec![
                BreadcrumbItem { title: "System".into(), icon: Some("setting".into()), path: None },
                BreadcrumbItem { title: "Users".into(), icon: None, path: Some("/system/user".into()) },
            ]
        );
        assert_eq!(usr.parent, Some(sys_id));
    }

    #[test]
    fn test_drops_invalid_configs_with_subtree() {
        let mut bad = MenuConfig::new("bad", "Bad", MenuType::Top);
        bad.menu_type = "footer".to_string();
        bad.children = vec![MenuConfig::new("inner", "Inner", MenuType::SidebarNav)];
        let configs = vec![
            bad,
            MenuConfig::new("", "No id", MenuType::Top),
            MenuConfig::new("untitled", "", MenuType::Top),
            MenuConfig::new("ok", "Ok", MenuType::Top),
        ];

        let compiled = MenuCompiler::compile(&configs, &PermissionIndex::default());
        let ids: Vec<&str> = compiled.tree.iter().map(|(_, n)| n.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);

        let kinds: Vec<DiagnosticKind> = compiled.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::UnknownMenuType, DiagnosticKind::MissingId, DiagnosticKind::MissingTitle]
        );
    }

    #[test]
    fn test_preserves_input_order() {
        let configs = vec![
            MenuConfig::new("z", "Z", MenuType::Top),
            MenuConfig::new("a", "A", MenuType::Top),
            MenuConfig::new("m", "M", MenuType::Top),
        ];
        let compiled = MenuCompiler::compile(&configs, &PermissionIndex::default());
        let ids: Vec<&str> = compiled.tree.roots().map(|(_, n)| n.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_unresolved_permission_code_leaves_path_unset() {
        let configs = vec![MenuConfig::new("x", "X", MenuType::Top).with_permission("missing")];
        let compiled = MenuCompiler::compile(&configs, &PermissionIndex::default());
        let (_, x) = compiled.tree.roots().next().unwrap();
        assert_eq!(x.path, None);
        assert_eq!(x.route_name, None);
    }

    #[test]
    fn test_reports_duplicate_ids() {
        let configs = vec![
            MenuConfig::new("dup", "One", MenuType::Top),
            MenuConfig::new("dup", "Two", MenuType::Top),
        ];
        let compiled = MenuCompiler::compile(&configs, &PermissionIndex::default());
        assert_eq!(compiled.tree.len(), 2);
        assert_eq!(compiled.diagnostics[0].kind, DiagnosticKind::DuplicateMenuId);
    }
}
