use std::net::IpAddr;
use std::sync::Arc;

/// A value produced by a `$dnsrewrite`-style rule (§3, §4.4, GLOSSARY).
///
/// The exact rule syntax is delegated to the rule-list library per §1's
/// non-goals; this is the value model the core consumes once a rule has been
/// parsed by whatever compiled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsRewriteValue {
    Cname(Arc<str>),
    A(std::net::Ipv4Addr),
    Aaaa(std::net::Ipv6Addr),
    NxDomain,
    Refused,
}

/// What kind of match a `Rule` represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// An adblock-style network rule. `whitelist` distinguishes `@@`-style
    /// allowlist rules from ordinary blocking rules.
    Network { whitelist: bool },
    /// A hosts-file-style rule binding a domain to an IP. Matched against
    /// the matching v4/v6 host-rule lists depending on the address family.
    Host { ip: IpAddr },
    /// A `$dnsrewrite` rule.
    DnsRewrite(DnsRewriteValue),
}

/// Opaque handle produced by the rule-list library (§3).
///
/// The core never inspects `text`; it only forwards it to the caller and
/// consults the behavior predicates below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub text: Arc<str>,
    pub filter_list_id: i32,
    pub kind: RuleKind,
}

impl Rule {
    pub fn network(text: impl Into<Arc<str>>, filter_list_id: i32, whitelist: bool) -> Self {
        Self {
            text: text.into(),
            filter_list_id,
            kind: RuleKind::Network { whitelist },
        }
    }

    pub fn host(text: impl Into<Arc<str>>, filter_list_id: i32, ip: IpAddr) -> Self {
        Self {
            text: text.into(),
            filter_list_id,
            kind: RuleKind::Host { ip },
        }
    }

    pub fn dns_rewrite(text: impl Into<Arc<str>>, filter_list_id: i32, value: DnsRewriteValue) -> Self {
        Self {
            text: text.into(),
            filter_list_id,
            kind: RuleKind::DnsRewrite(value),
        }
    }

    pub fn is_whitelist(&self) -> bool {
        matches!(self.kind, RuleKind::Network { whitelist: true })
    }

    pub fn is_dnsrewrite(&self) -> bool {
        matches!(self.kind, RuleKind::DnsRewrite(_))
    }

    pub fn host_ip(&self) -> Option<IpAddr> {
        match self.kind {
            RuleKind::Host { ip } => Some(ip),
            _ => None,
        }
    }
}
