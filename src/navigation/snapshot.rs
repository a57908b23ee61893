use chrono::{DateTime, Utc};

use crate::error::Diagnostic;
use crate::menu::{MenuTree, NavigationIndex};
use crate::routes::{Principal, RouteNode};

use super::query::NavigationQuery;

/// One complete, immutable navigation model. A reload builds a new snapshot
/// and swaps it in whole; nothing in here is updated incrementally.
#[derive(Debug, Clone, Default)]
pub struct NavigationSnapshot {
    pub generation: u64,
    /// `None` until a load has been committed (initial state and after reset)
    pub loaded_at: Option<DateTime<Utc>>,
    pub principal: Principal,
    pub allowed_routes: Vec<RouteNode>,
    pub tree: MenuTree,
    pub index: NavigationIndex,
    pub diagnostics: Vec<Diagnostic>,
}

impl NavigationSnapshot {
    /// Placeholder with no navigation at all
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn query(&self) -> NavigationQuery<'_> {
        NavigationQuery::new(&self.tree, &self.index)
    }
}
