mod common;

use anyhow::Result;

use admin_nav::config::DuplicatePolicy;
use admin_nav::routes::{check_route_access, filter_routes, PermissionIndex, PermissionSet, Principal, RouteNode};
use admin_nav::NavigationError;

fn names(routes: &[RouteNode]) -> Vec<String> {
    let mut out = Vec::new();
    for route in routes {
        out.push(route.name.clone());
        out.extend(names(&route.children));
    }
    out
}

#[test]
fn permission_index_resolves_nested_paths() -> Result<()> {
    let index = PermissionIndex::build(&common::route_table()?);

    let user = index.get("sys:user").expect("sys:user indexed");
    assert_eq!(user.path, "/system/user");
    assert_eq!(user.name, "SystemUser");
    assert_eq!(index.get("sys:user:detail").map(|t| t.path.as_str()), Some("/system/user/:id"));
    assert_eq!(index.get("audit:log").map(|t| t.path.as_str()), Some("/audit/log"));
    assert_eq!(index.find_route_by_name("SystemRole").map(|t| t.path.as_str()), Some("/system/role"));
    assert!(index.get("System").is_none());
    Ok(())
}

#[test]
fn duplicate_codes_follow_policy() -> Result<()> {
    let routes = vec![
        RouteNode::new("/first", "First").with_permission("shared"),
        RouteNode::new("/second", "Second").with_permission("shared"),
    ];

    let index = PermissionIndex::build_with_policy(&routes, DuplicatePolicy::LastWins)?;
    assert_eq!(index.get("shared").map(|t| t.name.as_str()), Some("Second"));
    assert_eq!(index.diagnostics().len(), 1);

    match PermissionIndex::build_with_policy(&routes, DuplicatePolicy::Reject) {
        Err(NavigationError::DuplicatePermissionCode { code, first, second }) => {
            assert_eq!(code, "shared");
            assert_eq!(first, "First");
            assert_eq!(second, "Second");
        }
        other => panic!("expected duplicate error, got {:?}", other.map(|i| i.len())),
    }
    Ok(())
}

#[test]
fn filter_keeps_tree_shape() -> Result<()> {
    let routes = common::route_table()?;
    let permissions: PermissionSet = ["sys:user", "audit:log", "dashboard:view"].into_iter().collect();

    let allowed = filter_routes(&routes, &permissions);

    // Audit is locked, so its permitted child goes with it
    assert_eq!(names(&allowed), vec!["Dashboard", "System", "SystemUser"]);
    assert_eq!(allowed[1].path, "/system");
    assert_eq!(allowed[1].children[0].path, "user");

    // Input is untouched
    assert_eq!(names(&routes).len(), 7);
    Ok(())
}

#[test]
fn filter_with_no_permissions_keeps_only_public_nodes() -> Result<()> {
    let allowed = filter_routes(&common::route_table()?, &PermissionSet::new());
    assert_eq!(names(&allowed), vec!["System"]);
    assert!(allowed[0].children.is_empty());
    Ok(())
}

#[test]
fn guard_checks_auth_then_codes() -> Result<()> {
    let super_admins = vec!["super_admin".to_string()];
    let route = RouteNode::new("/system/user", "SystemUser").with_permission("sys:user").requiring_auth();

    assert!(!check_route_access(&route, None, &super_admins));
    assert!(!check_route_access(&route, Some(&Principal::new("guest")), &super_admins));
    assert!(check_route_access(&route, Some(&common::admin()), &super_admins));

    let root = Principal::new("root").with_roles(["super_admin"]);
    assert!(check_route_access(&route, Some(&root), &super_admins));

    let public = RouteNode::new("/login", "Login");
    assert!(check_route_access(&public, None, &super_admins));
    Ok(())
}

#[test]
fn empty_permission_code_is_public() -> Result<()> {
    let routes: Vec<RouteNode> = serde_json::from_value(serde_json::json!([
        { "path": "/home", "name": "Home", "permissionCode": "" },
        { "path": "/locked", "name": "Locked", "permissionCode": "locked:view" }
    ]))?;
    assert_eq!(routes[0].permission_code, None);

    let allowed = filter_routes(&routes, &PermissionSet::default());
    assert_eq!(names(&allowed), vec!["Home"]);

    let index = PermissionIndex::build(&routes);
    assert!(index.get("").is_none());
    assert_eq!(index.len(), 1);
    Ok(())
}
