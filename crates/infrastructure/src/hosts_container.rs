use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use dnsfilter_application::ports::{HostsContainer, HostsMatch, HostsRequest};
use dnsfilter_domain::{Rule, RuleKind};

/// In-memory stand-in for "the operating-system hosts container" (§1, §4.6):
/// a snapshot of `/etc/hosts`-style entries, swappable in one shot.
pub struct InMemoryHostsContainer {
    entries: HashMap<Arc<str>, Vec<(IpAddr, Rule)>>,
}

impl InMemoryHostsContainer {
    pub fn new(entries: Vec<(Arc<str>, IpAddr, Rule)>) -> Self {
        let mut map: HashMap<Arc<str>, Vec<(IpAddr, Rule)>> = HashMap::new();
        for (domain, ip, rule) in entries {
            map.entry(domain).or_default().push((ip, rule));
        }
        Self { entries: map }
    }

    pub fn from_lines(lines: &str) -> Self {
        let mut entries = Vec::new();
        for line in lines.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(addr), Some(domain)) = (parts.next(), parts.next()) else { continue };
            let Ok(ip) = addr.parse::<IpAddr>() else { continue };
            let domain: Arc<str> = Arc::from(domain.to_ascii_lowercase());
            let rule = Rule {
                text: Arc::from(line),
                filter_list_id: dnsfilter_domain::filter_source::SYSTEM_HOSTS_ID,
                kind: RuleKind::Host { ip },
            };
            entries.push((domain, ip, rule));
        }
        Self::new(entries)
    }
}

#[async_trait]
impl HostsContainer for InMemoryHostsContainer {
    async fn lookup(&self, request: &HostsRequest) -> Option<HostsMatch> {
        let key = request.hostname.to_ascii_lowercase();
        let hits = self.entries.get(key.as_str())?;
        Some(HostsMatch {
            ip_list: hits.iter().map(|(ip, _)| *ip).collect(),
            canon_name: Some(Arc::clone(&request.hostname)),
            rules: hits.iter().map(|(_, rule)| rule.clone()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use dnsfilter_domain::QType;

    fn request(host: &str) -> HostsRequest {
        HostsRequest {
            hostname: Arc::from(host),
            client_tags: BTreeSet::new(),
            client_ip: None,
            client_name: Arc::from("client"),
            qtype: QType::A,
        }
    }

    #[tokio::test]
    async fn lookup_returns_pinned_addresses() {
        let container = InMemoryHostsContainer::from_lines("1.2.3.4 pinned.example.com\n");
        let hit = container.lookup(&request("pinned.example.com")).await.unwrap();
        assert_eq!(hit.ip_list, vec!["1.2.3.4".parse::<IpAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn lookup_misses_unknown_host() {
        let container = InMemoryHostsContainer::from_lines("1.2.3.4 pinned.example.com\n");
        assert!(container.lookup(&request("other.example.com")).await.is_none());
    }
}
