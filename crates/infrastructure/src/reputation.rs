use async_trait::async_trait;
use dnsfilter_application::ports::ReputationChecker;
use dnsfilter_domain::{FilterError, MatchResult, QType, Settings};

/// No-op reputation checker: the safe-browsing/parental upstream lookup
/// itself is out of scope (§1) — this adapter satisfies the port so the
/// chain always has a collaborator wired at those stages.
#[derive(Default)]
pub struct NoopReputationChecker;

#[async_trait]
impl ReputationChecker for NoopReputationChecker {
    async fn check(
        &self,
        _host: &str,
        _qtype: QType,
        _settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        Ok(MatchResult::not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsfilter_domain::ProtectionFlags;

    #[tokio::test]
    async fn always_passes_through() {
        let checker = NoopReputationChecker;
        let settings = Settings::new("client", ProtectionFlags::default());
        let result = checker.check("example.com", QType::A, &settings).await.unwrap();
        assert!(result.is_not_found());
    }
}
