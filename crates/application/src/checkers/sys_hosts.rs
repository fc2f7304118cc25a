use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dnsfilter_domain::{FilterError, MatchResult, QType, Reason, RuleResult, Settings};

use crate::chain::HostChecker;
use crate::ports::{HostsContainer, HostsRequest};

/// `matchSysHosts` (§4.2, §4.6): the operating-system hosts container.
///
/// A hit whose `canon_name` names a different host is followed with one
/// more lookup (§4.6) so a hosts-file CNAME resolves to its IPs in the same
/// result, mirroring the legacy rewrite pre-pass's own CNAME step.
pub struct SystemHostsChecker {
    container: Arc<dyn HostsContainer>,
}

impl SystemHostsChecker {
    pub fn new(container: Arc<dyn HostsContainer>) -> Self {
        Self { container }
    }

    fn to_rule_result(&self, rule: &dnsfilter_domain::Rule) -> RuleResult {
        RuleResult {
            text: Arc::from(self.container.translate(&rule.text)),
            ip: rule.host_ip(),
            filter_list_id: rule.filter_list_id,
        }
    }
}

#[async_trait]
impl HostChecker for SystemHostsChecker {
    async fn check(
        &self,
        host: &str,
        client_tags: &BTreeSet<String>,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        let request = HostsRequest {
            hostname: Arc::from(host),
            client_tags: client_tags.clone(),
            client_ip: settings.client_ip,
            client_name: Arc::clone(&settings.client_name),
            qtype,
        };

        let Some(matched) = self.container.lookup(&request).await else {
            return Ok(MatchResult::not_found());
        };

        let mut result = MatchResult::with_reason(Reason::RewrittenAutoHosts);
        result.ip_list = matched.ip_list;
        result.rules = matched.rules.iter().map(|r| self.to_rule_result(r)).collect();
        result.canon_name = matched.canon_name.clone();

        if let Some(canon) = &matched.canon_name {
            if !canon.eq_ignore_ascii_case(host) {
                let follow_up = HostsRequest {
                    hostname: Arc::clone(canon),
                    client_tags: client_tags.clone(),
                    client_ip: settings.client_ip,
                    client_name: Arc::clone(&settings.client_name),
                    qtype,
                };
                if let Some(resolved) = self.container.lookup(&follow_up).await {
                    result.ip_list.extend(resolved.ip_list);
                    result
                        .rules
                        .extend(resolved.rules.iter().map(|r| self.to_rule_result(r)));
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    use crate::ports::HostsMatch;

    struct FakeContainer;

    #[async_trait]
    impl HostsContainer for FakeContainer {
        async fn lookup(&self, request: &HostsRequest) -> Option<HostsMatch> {
            match request.hostname.as_ref() {
                "router.lan" => Some(HostsMatch {
                    ip_list: vec!["192.168.1.1".parse::<IpAddr>().unwrap()],
                    canon_name: None,
                    rules: Vec::new(),
                }),
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn hit_returns_rewritten_auto_hosts() {
        let checker = SystemHostsChecker::new(Arc::new(FakeContainer));
        let settings = Settings::new("client", Default::default());
        let result = checker
            .check("router.lan", &BTreeSet::new(), QType::A, &settings)
            .await
            .unwrap();
        assert_eq!(result.reason, Reason::RewrittenAutoHosts);
        assert_eq!(result.ip_list, vec!["192.168.1.1".parse::<IpAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn miss_passes_through() {
        let checker = SystemHostsChecker::new(Arc::new(FakeContainer));
        let settings = Settings::new("client", Default::default());
        let result = checker
            .check("example.com", &BTreeSet::new(), QType::A, &settings)
            .await
            .unwrap();
        assert!(result.is_not_found());
    }
}
