use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use dnsfilter_domain::{FilterError, MatchResult, QType, Reason, Rule, RuleResult, Settings};

use crate::ports::{CompiledRuleList, MatchRequest, RuleMatch};
use crate::rewrite_resolver::RewriteResolver;

/// Two compiled rule-set handles, owning whatever underlying storage their
/// `CompiledRuleList` implementation holds (§2, §3).
#[derive(Default)]
pub struct RuleStoragePair {
    pub block: Option<Arc<dyn CompiledRuleList>>,
    pub allow: Option<Arc<dyn CompiledRuleList>>,
}

/// Guards the active `RuleStoragePair`, allowing atomic replacement and safe
/// concurrent matching (§2).
///
/// Uses a true reader/writer lock rather than `ArcSwap` because the match
/// path must hold the *reader lock* across both the match call and
/// consumption of the returned rule handles (§9 "Rule-handle lifetime").
/// `matchHost` performs no I/O (§5), so holding a `std::sync::RwLock` across
/// it is correct and brief.
pub struct EngineSwap {
    inner: RwLock<Option<RuleStoragePair>>,
}

impl EngineSwap {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Acquire the engine reader lock. Held by the caller for the duration
    /// of the match and any rule-handle use — do not let the guard escape
    /// the match path (§9).
    pub fn read(&self) -> RwLockReadGuard<'_, Option<RuleStoragePair>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Atomically install `pair`, releasing whatever was previously active.
    /// Blocks only as long as it takes to swap the pointer; building `pair`
    /// must happen before calling this (§4.3).
    pub fn replace(&self, pair: RuleStoragePair) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(pair);
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

impl Default for EngineSwap {
    fn default() -> Self {
        Self::new()
    }
}

fn to_rule_result(rule: &Rule) -> RuleResult {
    RuleResult {
        text: Arc::clone(&rule.text),
        ip: rule.host_ip(),
        filter_list_id: rule.filter_list_id,
    }
}

/// `matchHost` (§4.3): runs the allow/block pipeline for one request.
///
/// No I/O: the engine lock is held for the whole call, and every branch
/// below operates purely on data already loaded into memory.
pub fn match_host(
    engine: &EngineSwap,
    host: &str,
    client_tags: &BTreeSet<String>,
    qtype: QType,
    settings: &Settings,
) -> Result<MatchResult, FilterError> {
    if !settings.flags.filtering_enabled {
        return Ok(MatchResult::not_found());
    }

    let guard = engine.read();
    let pair = match guard.as_ref() {
        Some(pair) => pair,
        None => return Ok(MatchResult::not_found()),
    };

    let request = MatchRequest {
        hostname: Arc::from(host),
        client_tags: client_tags.clone(),
        client_ip: settings.client_ip,
        client_name: Arc::clone(&settings.client_name),
        qtype,
    };

    if settings.flags.protection_enabled {
        if let Some(allow) = &pair.allow {
            let rule_match = allow.match_request(&request);
            if !rule_match.is_empty() {
                return process_allow_list(rule_match);
            }
        }
    }

    let Some(block) = &pair.block else {
        return Ok(MatchResult::not_found());
    };
    let rule_match = block.match_request(&request);

    if !rule_match.dns_rewrites.is_empty() {
        let rewrite_result = RewriteResolver::process_dns_rewrites(&rule_match.dns_rewrites);
        let is_self_rewrite = rewrite_result.reason == Reason::RewrittenRule
            && rewrite_result.canon_name.as_deref() == Some(host);
        if !is_self_rewrite {
            return Ok(rewrite_result);
        }
        // Self-rewrite: discard and continue matching (§9).
    }

    let has_match = rule_match.network_rule.is_some()
        || !rule_match.v4_host_rules.is_empty()
        || !rule_match.v6_host_rules.is_empty();
    if !has_match {
        return Ok(MatchResult::not_found());
    }

    if !settings.flags.protection_enabled {
        return Ok(MatchResult::not_found());
    }

    process_dns_result(rule_match, qtype)
}

/// `matchHostProcessAllowList` (§4.3).
fn process_allow_list(rule_match: RuleMatch) -> Result<MatchResult, FilterError> {
    let rules: Vec<Rule> = if let Some(network_rule) = rule_match.network_rule {
        vec![network_rule]
    } else if !rule_match.v4_host_rules.is_empty() {
        rule_match.v4_host_rules
    } else if !rule_match.v6_host_rules.is_empty() {
        rule_match.v6_host_rules
    } else {
        return Err(FilterError::InvalidDnsResult);
    };

    let mut result = MatchResult::with_reason(Reason::NotFilteredAllowList);
    result.rules = rules.iter().map(to_rule_result).collect();
    Ok(result)
}

/// `matchHostProcessDNSResult` (§4.3): priority order over network rule,
/// matching-qtype host rules, then mismatched-qtype host rules.
fn process_dns_result(rule_match: RuleMatch, qtype: QType) -> Result<MatchResult, FilterError> {
    if let Some(network_rule) = &rule_match.network_rule {
        let reason = if network_rule.is_whitelist() {
            Reason::NotFilteredAllowList
        } else {
            Reason::FilteredBlockList
        };
        let mut result = MatchResult::with_reason(reason);
        result.rules = vec![to_rule_result(network_rule)];
        return Ok(result);
    }

    if qtype == QType::A && !rule_match.v4_host_rules.is_empty() {
        let mut result = MatchResult::with_reason(Reason::FilteredBlockList);
        result.rules = rule_match.v4_host_rules.iter().map(to_rule_result).collect();
        return Ok(result);
    }

    if qtype == QType::Aaaa && !rule_match.v6_host_rules.is_empty() {
        let mut result = MatchResult::with_reason(Reason::FilteredBlockList);
        result.rules = rule_match.v6_host_rules.iter().map(to_rule_result).collect();
        return Ok(result);
    }

    let mismatched = rule_match
        .v4_host_rules
        .first()
        .or(rule_match.v6_host_rules.first());

    if let Some(rule) = mismatched {
        let mut result = MatchResult::with_reason(Reason::FilteredBlockList);
        result.rules = vec![RuleResult {
            text: Arc::clone(&rule.text),
            ip: None,
            filter_list_id: rule.filter_list_id,
        }];
        return Ok(result);
    }

    Ok(MatchResult::not_found())
}
