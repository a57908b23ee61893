use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::error::{Diagnostic, DiagnosticKind};
use crate::menu::MenuConfig;
use crate::routes::Principal;

use super::engine::NavigationEngine;
use super::snapshot::NavigationSnapshot;
use super::source::SessionSource;

/// Where the store stands with respect to the most recently issued load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Unloaded,
    Loading { generation: u64 },
    Loaded { generation: u64 },
}

/// Proof of a started load; only the newest ticket may commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied { generation: u64 },
    /// A newer load was issued after this one started
    Discarded { generation: u64, current: u64 },
}

impl CommitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommitOutcome::Applied { .. })
    }
}

/// Holds the current snapshot. Readers take an `Arc` and never see a half-built
/// model; writers build a whole snapshot off to the side and swap it in.
pub struct NavigationStore {
    engine: NavigationEngine,
    current: ArcSwap<NavigationSnapshot>,
    issued: AtomicU64,
}

impl NavigationStore {
    pub fn new(engine: NavigationEngine) -> Self {
        Self {
            engine,
            current: ArcSwap::from_pointee(NavigationSnapshot::empty(0)),
            issued: AtomicU64::new(0),
        }
    }

    pub fn engine(&self) -> &NavigationEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> Arc<NavigationSnapshot> {
        self.current.load_full()
    }

    pub fn state(&self) -> LoadState {
        let issued = self.issued.load(Ordering::SeqCst);
        let current = self.current.load();
        if current.generation < issued {
            LoadState::Loading { generation: issued }
        } else if current.is_loaded() {
            LoadState::Loaded {
                generation: current.generation,
            }
        } else {
            LoadState::Unloaded
        }
    }

    /// Issue the next generation. Any ticket issued earlier becomes stale.
    pub fn begin_load(&self) -> LoadTicket {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Issued navigation load generation {}", generation);
        LoadTicket { generation }
    }

    /// Swap `snapshot` in if `ticket` is still the newest one issued
    pub fn commit(&self, ticket: LoadTicket, mut snapshot: NavigationSnapshot) -> CommitOutcome {
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket.generation != latest {
            tracing::warn!(
                "Discarding stale navigation generation {} (latest issued {})",
                ticket.generation,
                latest
            );
            return CommitOutcome::Discarded {
                generation: ticket.generation,
                current: latest,
            };
        }

        snapshot.generation = ticket.generation;
        let next = Arc::new(snapshot);
        let previous = self.current.rcu(|current| {
            if current.generation < next.generation {
                Arc::clone(&next)
            } else {
                Arc::clone(current)
            }
        });

        if previous.generation >= next.generation {
            tracing::warn!(
                "Discarding navigation generation {}; generation {} already applied",
                next.generation,
                previous.generation
            );
            return CommitOutcome::Discarded {
                generation: next.generation,
                current: previous.generation,
            };
        }

        tracing::info!(
            "Applied navigation generation {}: {} menus, {} allowed top-level routes, {} diagnostics",
            next.generation,
            next.tree.len(),
            next.allowed_routes.len(),
            next.diagnostics.len()
        );
        CommitOutcome::Applied {
            generation: next.generation,
        }
    }

    /// Compile and commit from already-fetched inputs
    pub fn apply(&self, ticket: LoadTicket, principal: Principal, menus: &[MenuConfig]) -> CommitOutcome {
        let snapshot = self.engine.compile(ticket.generation, principal, menus);
        self.commit(ticket, snapshot)
    }

    /// Fetch the principal then the menu configuration, compile, and commit.
    /// A failed fetch degrades to an empty input and a diagnostic.
    pub async fn reload(&self, source: &dyn SessionSource) -> CommitOutcome {
        let ticket = self.begin_load();
        let mut unavailable = Vec::new();

        let principal = match source.fetch_principal().await {
            Ok(principal) => principal,
            Err(e) => {
                tracing::warn!("Principal unavailable, continuing with no permissions: {}", e);
                unavailable.push(Diagnostic::new(
                    DiagnosticKind::SourceUnavailable,
                    format!("principal unavailable: {}", e),
                ));
                Principal::default()
            }
        };

        let menus = match source.fetch_menu_configuration().await {
            Ok(menus) => menus,
            Err(e) => {
                tracing::warn!("Menu configuration unavailable, continuing with no menus: {}", e);
                unavailable.push(Diagnostic::new(
                    DiagnosticKind::SourceUnavailable,
                    format!("menu configuration unavailable: {}", e),
                ));
                Vec::new()
            }
        };

        let mut snapshot = self.engine.compile(ticket.generation, principal, &menus);
        unavailable.append(&mut snapshot.diagnostics);
        snapshot.diagnostics = unavailable;

        self.commit(ticket, snapshot)
    }

    /// Drop the current navigation (logout). In-flight loads become stale.
    pub fn reset(&self) {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let empty = Arc::new(NavigationSnapshot::empty(generation));
        self.current.rcu(|current| {
            if current.generation < generation {
                Arc::clone(&empty)
            } else {
                Arc::clone(current)
            }
        });
        tracing::info!("Navigation reset at generation {}", generation);
    }
}
