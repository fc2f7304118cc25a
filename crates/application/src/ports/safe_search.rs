use async_trait::async_trait;
use dnsfilter_domain::FilterError;
use std::net::IpAddr;

/// Injected resolver used by the safe-search checker (§6).
/// Defaults to the system resolver when not supplied by the caller.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn lookup_ip(&self, network: &str, host: &str) -> Result<Vec<IpAddr>, FilterError>;
}

pub use super::reputation::ReputationChecker as SafeSearchChecker;
