pub mod compile;
pub mod fetch;
pub mod query;
pub mod routes;
pub mod targets;
pub mod validate;

use std::path::PathBuf;

use clap::Args;

use crate::config::config;
use crate::navigation::NavigationEngine;
use crate::routes::{load_route_table, Principal};

/// Route table plus the principal the navigation is resolved for
#[derive(Args, Debug, Clone)]
pub struct PrincipalArgs {
    #[arg(long, help = "Route table file (YAML or JSON)")]
    pub routes: PathBuf,

    #[arg(long, help = "User-info file (YAML or JSON) with roles and permissions")]
    pub principal: Option<PathBuf>,

    #[arg(long = "permission", short = 'p', help = "Permission code held by the principal (repeatable)")]
    pub permissions: Vec<String>,
}

impl PrincipalArgs {
    pub fn engine(&self) -> anyhow::Result<NavigationEngine> {
        let routes = load_route_table(&self.routes)?;
        Ok(NavigationEngine::from_config(routes, &config().navigation)?)
    }

    /// Permissions from `--permission` are added to the principal file's set
    pub fn principal(&self) -> anyhow::Result<Principal> {
        let mut principal: Principal = match &self.principal {
            Some(path) => crate::format::read_structured(path)?,
            None => Principal::default(),
        };
        for code in &self.permissions {
            principal.permissions.insert(code.clone());
        }
        Ok(principal)
    }
}
