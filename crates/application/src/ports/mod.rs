//! External ports (§6). Concrete adapters live in `dnsfilter-infrastructure`.

pub mod admin;
pub mod hosts_container;
pub mod reputation;
pub mod rule_engine;
pub mod safe_search;

pub use admin::AdminRegistrar;
pub use hosts_container::{HostsContainer, HostsMatch, HostsRequest};
pub use reputation::ReputationChecker;
pub use rule_engine::{CompiledRuleList, MatchRequest, RuleListCompiler, RuleMatch};
pub use safe_search::{Resolver, SafeSearchChecker};
