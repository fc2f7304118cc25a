use std::net::IpAddr;
use std::sync::Arc;

use serde::Serialize;

use crate::reason::Reason;
use crate::rule::DnsRewriteValue;

/// One matched rule as surfaced on `MatchResult.rules` (§3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    pub text: Arc<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
    pub filter_list_id: i32,
}

/// The resolved value of a `$dnsrewrite` match (§4.4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum DnsRewriteRecord {
    Cname(Arc<str>),
    A(std::net::Ipv4Addr),
    Aaaa(std::net::Ipv6Addr),
    NxDomain,
    Refused,
}

impl From<&DnsRewriteValue> for DnsRewriteRecord {
    fn from(value: &DnsRewriteValue) -> Self {
        match value {
            DnsRewriteValue::Cname(c) => DnsRewriteRecord::Cname(Arc::clone(c)),
            DnsRewriteValue::A(ip) => DnsRewriteRecord::A(*ip),
            DnsRewriteValue::Aaaa(ip) => DnsRewriteRecord::Aaaa(*ip),
            DnsRewriteValue::NxDomain => DnsRewriteRecord::NxDomain,
            DnsRewriteValue::Refused => DnsRewriteRecord::Refused,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRewriteResult {
    pub records: Vec<DnsRewriteRecord>,
}

/// The typed verdict returned by every public filter operation (§3).
///
/// Wire encoding must omit empty fields (§6, §9) — the `skip_serializing_if`
/// attributes below are load-bearing for that contract, not cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub is_filtered: bool,
    pub reason: Reason,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip_list: Vec<IpAddr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canon_name: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_rewrite_result: Option<DnsRewriteResult>,
}

impl MatchResult {
    /// The default, "pass through unchanged" result.
    pub fn not_found() -> Self {
        Self {
            is_filtered: false,
            reason: Reason::NotFilteredNotFound,
            rules: Vec::new(),
            ip_list: Vec::new(),
            canon_name: None,
            service_name: None,
            dns_rewrite_result: None,
        }
    }

    pub fn with_reason(reason: Reason) -> Self {
        Self {
            is_filtered: reason.is_filtered(),
            reason,
            ..Self::not_found()
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.reason == Reason::NotFilteredNotFound
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::not_found()
    }
}
