use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dnsfilter_domain::{FilterError, MatchResult, QType, Reason, RuleResult, Settings};

use crate::chain::HostChecker;

/// `matchBlockedServicesRules` (§4.2, §4.7).
///
/// Stateless: everything it needs travels on `settings.services_rules`. The
/// known-services registry is consulted when the coordinator's configured
/// services are set up, not here — by the time a service reaches
/// `settings.services_rules` it is already considered valid, so this
/// checker matches every rule it's given unconditionally.
pub struct BlockedServicesChecker;

#[async_trait]
impl HostChecker for BlockedServicesChecker {
    async fn check(
        &self,
        host: &str,
        _client_tags: &BTreeSet<String>,
        _qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        if !settings.flags.protection_enabled {
            return Ok(MatchResult::not_found());
        }

        for service in &settings.services_rules {
            for rule in &service.rules {
                if rule.matches(host) {
                    let mut result = MatchResult::with_reason(Reason::FilteredBlockedService);
                    result.service_name = Some(Arc::clone(&service.service_name));
                    result.rules = vec![RuleResult {
                        text: Arc::clone(&rule.pattern),
                        ip: None,
                        filter_list_id: 0,
                    }];
                    return Ok(result);
                }
            }
        }

        Ok(MatchResult::not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsfilter_domain::{ProtectionFlags, ServiceRule, ServiceRules};

    fn settings_with_service(name: &str, pattern: &str, protection_enabled: bool) -> Settings {
        let mut flags = ProtectionFlags::default();
        flags.protection_enabled = protection_enabled;
        let mut settings = Settings::new("client", flags);
        settings.services_rules = vec![ServiceRules {
            service_name: Arc::from(name),
            rules: vec![ServiceRule::new(pattern)],
        }];
        settings
    }

    #[tokio::test]
    async fn matching_rule_blocks_with_service_name() {
        let settings = settings_with_service("youtube", "*.youtube.com", true);
        let result = BlockedServicesChecker
            .check("video.youtube.com", &BTreeSet::new(), QType::A, &settings)
            .await
            .unwrap();
        assert_eq!(result.reason, Reason::FilteredBlockedService);
        assert_eq!(result.service_name.as_deref(), Some("youtube"));
    }

    #[tokio::test]
    async fn non_matching_rule_passes_through() {
        let settings = settings_with_service("youtube", "*.youtube.com", true);
        let result = BlockedServicesChecker
            .check("foo.example.com", &BTreeSet::new(), QType::A, &settings)
            .await
            .unwrap();
        assert!(result.is_not_found());
    }

    #[tokio::test]
    async fn protection_disabled_skips_entirely() {
        let settings = settings_with_service("youtube", "*.youtube.com", false);
        let result = BlockedServicesChecker
            .check("video.youtube.com", &BTreeSet::new(), QType::A, &settings)
            .await
            .unwrap();
        assert!(result.is_not_found());
    }
}
