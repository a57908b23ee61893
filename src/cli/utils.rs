use serde::Serialize;

use crate::error::Diagnostic;
use crate::menu::{MenuNode, MenuTree, NodeId};
use crate::routes::RouteNode;

/// Print any serializable value as pretty JSON
pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!("Diagnostics:");
    for diagnostic in diagnostics {
        let marker = if diagnostic.kind.is_repair() { "repaired" } else { "note" };
        println!("  - {}: {}", marker, diagnostic);
    }
}

/// Indented text rendering of a compiled menu tree
pub fn print_menu_tree(tree: &MenuTree) {
    for (id, _) in tree.roots() {
        print_menu_node(tree, id);
    }
}

fn print_menu_node(tree: &MenuTree, id: NodeId) {
    let node = tree.get(id);
    println!("{}{}", "  ".repeat(node.level.saturating_sub(1) as usize), describe_menu(node));
    for &child in &node.children {
        print_menu_node(tree, child);
    }
}

fn describe_menu(node: &MenuNode) -> String {
    let mut line = format!("{} [{}] ({})", node.title, node.id, node.menu_type.as_str());
    if let Some(path) = &node.path {
        line.push_str(&format!(" -> {}", path));
    }
    if node.hidden {
        match &node.bind_menu_id {
            Some(target) => line.push_str(&format!(" hidden, bound to {}", target)),
            None => line.push_str(" hidden"),
        }
    }
    line
}

/// Indented text rendering of a route tree
pub fn print_route_tree(routes: &[RouteNode], depth: usize) {
    for route in routes {
        let code = route.permission_code.as_deref().unwrap_or("-");
        println!("{}{} {} [{}]", "  ".repeat(depth), route.name, route.path, code);
        print_route_tree(&route.children, depth + 1);
    }
}
