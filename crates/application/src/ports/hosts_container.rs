use async_trait::async_trait;
use dnsfilter_domain::{QType, Rule};
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;

/// The request shape `/etc/hosts`-style lookups accept (§4.6, §6).
#[derive(Debug, Clone)]
pub struct HostsRequest {
    pub hostname: Arc<str>,
    pub client_tags: BTreeSet<String>,
    pub client_ip: Option<IpAddr>,
    pub client_name: Arc<str>,
    pub qtype: QType,
}

/// What the hosts container returns for a request that matched (§4.6).
#[derive(Debug, Clone, Default)]
pub struct HostsMatch {
    pub ip_list: Vec<IpAddr>,
    pub canon_name: Option<Arc<str>>,
    pub rules: Vec<Rule>,
}

/// Port for "the operating-system hosts container" (§1: referenced, not
/// designed, here).
#[async_trait]
pub trait HostsContainer: Send + Sync {
    /// Returns `None` if the container has no rewrites for this request.
    async fn lookup(&self, request: &HostsRequest) -> Option<HostsMatch>;

    /// Translates a rule's raw text into display text for the caller (§4.6).
    /// Defaults to the identity transform.
    fn translate(&self, rule_text: &str) -> String {
        rule_text.to_string()
    }
}
