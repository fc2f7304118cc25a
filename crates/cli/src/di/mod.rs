use std::sync::Arc;

use dnsfilter_application::FilterCoordinator;
use dnsfilter_domain::{ProtectionFlags, RewriteEntry};
use dnsfilter_infrastructure::{
    InMemoryHostsContainer, InMemoryRuleListCompiler, NoopReputationChecker,
    StaticSafeSearchChecker, SystemResolver,
};

/// Wires the stand-in adapters from `dnsfilter-infrastructure` into a
/// `FilterCoordinator`. A real deployment would swap these for adapters
/// backed by its own hosts file, reputation service, and safe-search
/// provider; the coordinator itself is oblivious to the swap.
pub fn build_coordinator(
    initial_rewrites: Vec<RewriteEntry>,
    initial_flags: ProtectionFlags,
) -> Arc<FilterCoordinator> {
    FilterCoordinator::new(
        Arc::new(InMemoryRuleListCompiler::new()),
        Arc::new(InMemoryHostsContainer::from_lines("")),
        Arc::new(NoopReputationChecker),
        Arc::new(NoopReputationChecker),
        Arc::new(StaticSafeSearchChecker::default()),
        Arc::new(SystemResolver),
        initial_rewrites,
        initial_flags,
        None,
    )
}
