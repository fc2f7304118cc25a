//! The fixed checkers making up `HostCheckerChain` (§4.2).

pub mod blocked_services;
pub mod reputation;
pub mod rule_engine;
pub mod safe_search;
pub mod sys_hosts;

pub use blocked_services::BlockedServicesChecker;
pub use reputation::ReputationCheckerAdapter;
pub use rule_engine::RuleEngineChecker;
pub use safe_search::SafeSearchCheckerAdapter;
pub use sys_hosts::SystemHostsChecker;
