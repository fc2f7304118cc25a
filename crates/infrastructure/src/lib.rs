//! DNS Filter Infrastructure Layer
//!
//! Concrete adapters for the ports declared in `dnsfilter-application`: the
//! in-memory rule-list compiler (`rule_list`), the hosts container
//! (`hosts_container`), and the reputation/safe-search/resolver stubs
//! (`reputation`, `safe_search`).

pub mod hosts_container;
pub mod reputation;
pub mod rule_list;
pub mod safe_search;

pub use hosts_container::InMemoryHostsContainer;
pub use reputation::NoopReputationChecker;
pub use rule_list::{InMemoryRuleList, InMemoryRuleListCompiler};
pub use safe_search::{StaticSafeSearchChecker, SystemResolver};
