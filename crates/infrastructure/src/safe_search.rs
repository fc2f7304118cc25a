use std::net::IpAddr;

use async_trait::async_trait;
use dnsfilter_application::ports::{Resolver, SafeSearchChecker};
use dnsfilter_domain::{FilterError, MatchResult, QType, Reason, Settings};

/// System-resolver-backed `Resolver` adapter (§6): used by the safe-search
/// checker to fill `ip_list` when the upstream safe-search provider only
/// hands back a canonical hostname to resolve.
#[derive(Default)]
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn lookup_ip(&self, network: &str, host: &str) -> Result<Vec<IpAddr>, FilterError> {
        let want_v6 = network == "ip6";
        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| FilterError::Port(format!("resolving {host}: {e}")))?;
        Ok(addrs
            .map(|addr| addr.ip())
            .filter(|ip| ip.is_ipv6() == want_v6)
            .collect())
    }
}

/// Safe-search checker that rewrites known search-engine hosts to their
/// safe-search canonical hostname (§6).
///
/// The provider's own rewrite table (which hosts map to which canonical
/// safe-search hostname) is out of scope to design here; this adapter just
/// exercises the port with a small built-in table for the common engines.
pub struct StaticSafeSearchChecker {
    table: Vec<(&'static str, &'static str)>,
}

impl Default for StaticSafeSearchChecker {
    fn default() -> Self {
        Self {
            table: vec![
                ("www.google.com", "forcesafesearch.google.com"),
                ("www.bing.com", "strict.bing.com"),
                ("www.youtube.com", "restrict.youtube.com"),
            ],
        }
    }
}

#[async_trait]
impl SafeSearchChecker for StaticSafeSearchChecker {
    async fn check(
        &self,
        host: &str,
        _qtype: QType,
        _settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        let Some((_, canon)) = self.table.iter().find(|(h, _)| host.eq_ignore_ascii_case(h)) else {
            return Ok(MatchResult::not_found());
        };
        let mut result = MatchResult::with_reason(Reason::FilteredSafeSearch);
        result.canon_name = Some(std::sync::Arc::from(*canon));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsfilter_domain::ProtectionFlags;

    #[tokio::test]
    async fn known_engine_is_rewritten() {
        let checker = StaticSafeSearchChecker::default();
        let settings = Settings::new("client", ProtectionFlags::default());
        let result = checker.check("www.google.com", QType::A, &settings).await.unwrap();
        assert_eq!(result.canon_name.as_deref(), Some("forcesafesearch.google.com"));
    }

    #[tokio::test]
    async fn unknown_host_passes_through() {
        let checker = StaticSafeSearchChecker::default();
        let settings = Settings::new("client", ProtectionFlags::default());
        let result = checker.check("example.com", QType::A, &settings).await.unwrap();
        assert!(result.is_not_found());
    }
}
