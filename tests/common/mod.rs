#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::oneshot;

use admin_nav::config::DuplicatePolicy;
use admin_nav::menu::MenuConfig;
use admin_nav::navigation::{NavigationEngine, NavigationStore, SessionSource};
use admin_nav::routes::{Principal, RouteNode};
use admin_nav::NavigationResult;

/// Route table of a small console: dashboard, system management, audit log
pub fn route_table() -> Result<Vec<RouteNode>> {
    Ok(serde_json::from_value(serde_json::json!([
        { "path": "/dashboard", "name": "Dashboard", "permissionCode": "dashboard:view" },
        {
            "path": "/system",
            "name": "System",
            "children": [
                { "path": "user", "name": "SystemUser", "permissionCode": "sys:user" },
                { "path": "user/:id", "name": "SystemUserDetail", "permissionCode": "sys:user:detail" },
                { "path": "role", "name": "SystemRole", "permissionCode": "sys:role" }
            ]
        },
        {
            "path": "/audit",
            "name": "Audit",
            "permissionCode": "audit:view",
            "children": [
                { "path": "log", "name": "AuditLog", "permissionCode": "audit:log" }
            ]
        }
    ]))?)
}

/// Menu configuration matching `route_table`
pub fn menu_configuration() -> Result<Vec<MenuConfig>> {
    Ok(serde_json::from_value(serde_json::json!([
        { "id": "dash", "title": "Dashboard", "menuType": "top", "hidden": false, "permissionCode": "dashboard:view" },
        {
            "id": "mgmt",
            "title": "Management",
            "menuType": "top",
            "hidden": false,
            "children": [
                {
                    "id": "sys",
                    "title": "System",
                    "menuType": "sidebarDirectory",
                    "hidden": false,
                    "children": [
                        { "id": "usr", "title": "Users", "menuType": "sidebarNav", "hidden": false, "permissionCode": "sys:user" },
                        { "id": "detail", "title": "User Detail", "menuType": "sidebarNav", "hidden": true, "bindMenuId": "usr", "permissionCode": "sys:user:detail" },
                        { "id": "role", "title": "Roles", "menuType": "sidebarNav", "hidden": false, "permissionCode": "sys:role" }
                    ]
                },
                { "id": "log", "title": "Audit Log", "menuType": "sidebarNav", "hidden": false, "permissionCode": "audit:log" }
            ]
        }
    ]))?)
}

pub fn admin() -> Principal {
    Principal::new("admin")
        .with_roles(["admin"])
        .with_permissions(["dashboard:view", "sys:user", "sys:user:detail", "sys:role", "audit:view", "audit:log"])
}

pub fn engine() -> Result<NavigationEngine> {
    Ok(NavigationEngine::new(route_table()?, DuplicatePolicy::LastWins)?)
}

pub fn store() -> Result<NavigationStore> {
    Ok(NavigationStore::new(engine()?))
}

/// Source whose menu fetch parks until released, announcing when it got there
pub struct GatedSource {
    principal: Principal,
    menus: Vec<MenuConfig>,
    started: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

pub struct Gate {
    /// Resolves once the source is parked inside the menu fetch
    pub started: oneshot::Receiver<()>,
    /// Send to let the menu fetch complete
    pub release: oneshot::Sender<()>,
}

impl GatedSource {
    pub fn new(principal: Principal, menus: Vec<MenuConfig>) -> (Self, Gate) {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let source = Self {
            principal,
            menus,
            started: Mutex::new(Some(started_tx)),
            release: Mutex::new(Some(release_rx)),
        };
        (
            source,
            Gate {
                started: started_rx,
                release: release_tx,
            },
        )
    }
}

#[async_trait]
impl SessionSource for GatedSource {
    async fn fetch_principal(&self) -> NavigationResult<Principal> {
        Ok(self.principal.clone())
    }

    async fn fetch_menu_configuration(&self) -> NavigationResult<Vec<MenuConfig>> {
        let started = self.started.lock().unwrap().take();
        if let Some(started) = started {
            let _ = started.send(());
        }
        let release = self.release.lock().unwrap().take();
        if let Some(release) = release {
            let _ = release.await;
        }
        Ok(self.menus.clone())
    }
}
