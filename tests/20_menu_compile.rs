mod common;

use anyhow::Result;

use admin_nav::menu::{BreadcrumbItem, MenuCompiler, MenuConfig, MenuType};
use admin_nav::routes::PermissionIndex;
use admin_nav::DiagnosticKind;

#[test]
fn every_node_extends_its_parent() -> Result<()> {
    let index = PermissionIndex::build(&common::route_table()?);
    let compiled = MenuCompiler::compile(&common::menu_configuration()?, &index);
    let tree = &compiled.tree;
    assert_eq!(tree.len(), 7);

    for (_, node) in tree.iter() {
        match node.parent {
            Some(parent) => {
                let parent = tree.get(parent);
                assert_eq!(node.level, parent.level + 1, "level of {}", node.id);
                let mut expected = parent.breadcrumb_path.clone();
                expected.push(node.breadcrumb_item());
                assert_eq!(node.breadcrumb_path, expected, "breadcrumbs of {}", node.id);
            }
            None => {
                assert_eq!(node.level, 1);
                assert_eq!(node.breadcrumb_path, vec![node.breadcrumb_item()]);
            }
        }
    }
    Ok(())
}

#[test]
fn system_users_scenario() -> Result<()> {
    let configs: Vec<MenuConfig> = serde_json::from_value(serde_json::json!([
        {
            "id": "sys", "title": "System", "menuType": "sidebarDirectory", "hidden": false,
            "children": [
                { "id": "usr", "title": "Users", "menuType": "sidebarNav", "hidden": false, "permissionCode": "sys:user" }
            ]
        }
    ]))?;
    let index = PermissionIndex::build(&common::route_table()?);
    let compiled = MenuCompiler::compile(&configs, &index);

    let (usr_id, usr) = compiled.tree.iter().find(|(_, n)| n.id == "usr").expect("usr compiled");
    assert_eq!(usr.path.as_deref(), Some("/system/user"));
    assert_eq!(usr.level, 2);
    assert_eq!(
        usr.breadcrumb_path,
        vec![
            BreadcrumbItem { title: "System".into(), icon: None, path: None },
            BreadcrumbItem { title: "Users".into(), icon: None, path: Some("/system/user".into()) },
        ]
    );
    assert_eq!(compiled.tree.lineage(usr_id).len(), 2);
    Ok(())
}

#[test]
fn invalid_siblings_do_not_stop_compilation() -> Result<()> {
    let configs: Vec<MenuConfig> = serde_json::from_value(serde_json::json!([
        { "id": "a", "title": "A", "menuType": "top" },
        { "id": "b", "title": "B", "menuType": "mega" },
        { "title": "No id", "menuType": "top" },
        { "id": "c", "title": "C", "menuType": "sidebarNav" }
    ]))?;
    let compiled = MenuCompiler::compile(&configs, &PermissionIndex::default());

    let ids: Vec<&str> = compiled.tree.roots().map(|(_, n)| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    let kinds: Vec<DiagnosticKind> = compiled.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::UnknownMenuType, DiagnosticKind::MissingId]);
    Ok(())
}

#[test]
fn grouping_entries_have_no_target() -> Result<()> {
    let index = PermissionIndex::build(&common::route_table()?);
    let compiled = MenuCompiler::compile(&common::menu_configuration()?, &index);
    let mgmt = compiled.tree.iter().find(|(_, n)| n.id == "mgmt").map(|(_, n)| n).expect("mgmt");
    assert_eq!(mgmt.menu_type, MenuType::Top);
    assert!(mgmt.path.is_none());
    assert!(mgmt.route_name.is_none());
    Ok(())
}
