pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod menu;
pub mod navigation;
pub mod routes;

pub use error::{Diagnostic, DiagnosticKind, NavigationError, NavigationResult};
pub use navigation::{NavigationEngine, NavigationQuery, NavigationSnapshot, NavigationStore};
