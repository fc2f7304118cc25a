use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dnsfilter_domain::{FilterError, MatchResult, QType, Settings};

use crate::chain::HostChecker;
use crate::ports::{Resolver, SafeSearchChecker};

/// Safe search (§4.2): gated by `safe_search_enabled`, and only meaningful
/// for address queries. The injected `SafeSearchChecker` identifies the
/// rewritten safe-search host; when it doesn't also supply literal
/// addresses, the injected `Resolver` is used to look the canonical name up.
pub struct SafeSearchCheckerAdapter {
    checker: Arc<dyn SafeSearchChecker>,
    resolver: Arc<dyn Resolver>,
}

impl SafeSearchCheckerAdapter {
    pub fn new(checker: Arc<dyn SafeSearchChecker>, resolver: Arc<dyn Resolver>) -> Self {
        Self { checker, resolver }
    }
}

#[async_trait]
impl HostChecker for SafeSearchCheckerAdapter {
    async fn check(
        &self,
        host: &str,
        _client_tags: &BTreeSet<String>,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        if !settings.flags.safe_search_enabled || !qtype.is_ip() {
            return Ok(MatchResult::not_found());
        }

        let mut result = self.checker.check(host, qtype, settings).await?;
        if result.is_not_found() {
            return Ok(result);
        }

        if result.ip_list.is_empty() {
            if let Some(canon) = result.canon_name.clone() {
                let network = if qtype == QType::Aaaa { "ip6" } else { "ip4" };
                result.ip_list = self.resolver.lookup_ip(network, &canon).await?;
            }
        }

        Ok(result)
    }
}
