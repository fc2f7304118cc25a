use dnsfilter_domain::{FilterError, FilterSource, QType, Rule};
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;

/// The request shape every matcher port accepts (§6).
#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub hostname: Arc<str>,
    pub client_tags: BTreeSet<String>,
    pub client_ip: Option<IpAddr>,
    pub client_name: Arc<str>,
    pub qtype: QType,
}

/// The result of matching a request against one compiled rule list (§6).
#[derive(Debug, Clone, Default)]
pub struct RuleMatch {
    pub network_rule: Option<Rule>,
    pub v4_host_rules: Vec<Rule>,
    pub v6_host_rules: Vec<Rule>,
    pub dns_rewrites: Vec<Rule>,
}

impl RuleMatch {
    pub fn is_empty(&self) -> bool {
        self.network_rule.is_none()
            && self.v4_host_rules.is_empty()
            && self.v6_host_rules.is_empty()
            && self.dns_rewrites.is_empty()
    }
}

/// A single compiled rule list handle: the stand-in for "the underlying
/// rule-list compiler/matcher library" referenced, but not designed, by §1.
pub trait CompiledRuleList: Send + Sync {
    fn match_request(&self, request: &MatchRequest) -> RuleMatch;
}

/// Builds a `CompiledRuleList` from an ordered set of filter sources (§4.3).
///
/// Returns `Ok(None)` when every source was skipped (empty data, missing
/// file) — that is not an error per §7.
pub trait RuleListCompiler: Send + Sync {
    fn compile(
        &self,
        filters: &[FilterSource],
    ) -> Result<Option<Arc<dyn CompiledRuleList>>, FilterError>;
}
