pub mod snapshot;
pub mod engine;
pub mod query;
pub mod store;
pub mod source;

pub use snapshot::NavigationSnapshot;
pub use engine::NavigationEngine;
pub use query::{NavigationQuery, NavigationState};
pub use store::{CommitOutcome, LoadState, LoadTicket, NavigationStore};
pub use source::{HttpSessionSource, SessionSource, StaticSessionSource};
