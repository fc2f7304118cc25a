//! DNS Filter Application Layer
//!
//! The decision engine itself: the hot-swappable rule engine (`engine`),
//! the rewrite-chasing algorithm (`rewrite_resolver`), the fixed checker
//! chain (`chain`, `checkers`), the async reload mailbox (`reload_queue`),
//! the port traits collaborators are reached through (`ports`), and the
//! `FilterCoordinator` that ties them together (`coordinator`).

pub mod chain;
pub mod checkers;
pub mod coordinator;
pub mod engine;
pub mod ports;
pub mod reload_queue;
pub mod rewrite_resolver;

pub use chain::{HostChecker, HostCheckerChain};
pub use coordinator::{CoordinatorConfig, FilterCoordinator};
pub use engine::{match_host, EngineSwap, RuleStoragePair};
pub use reload_queue::ReloadQueue;
pub use rewrite_resolver::RewriteResolver;
