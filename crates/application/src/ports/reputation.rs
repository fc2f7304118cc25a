use async_trait::async_trait;
use dnsfilter_domain::{FilterError, MatchResult, QType, Settings};

/// Port for the safe-browsing and parental reputation lookups (§6).
///
/// Implementations own their cache and upstream transport; the core only
/// forwards their `(MatchResult, error)` pair.
#[async_trait]
pub trait ReputationChecker: Send + Sync {
    async fn check(
        &self,
        host: &str,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError>;
}
