use std::collections::HashSet;
use std::sync::Arc;

use dnsfilter_domain::{
    DnsRewriteRecord, DnsRewriteResult, MatchResult, QType, Reason, Rule, RewriteAnswer,
    RewriteTable,
};

/// CNAME-chasing algorithm over `RewriteTable` and rule-produced
/// `$dnsrewrite` values (§2, §4.4).
pub struct RewriteResolver;

impl RewriteResolver {
    /// Legacy rewrites (`processRewrites`, §4.4).
    ///
    /// Terminates for all inputs in at most `table.len() + 1` lookups (§8):
    /// each iteration of the CNAME loop either returns or advances to a host
    /// not yet visited, and there are at most `table.len()` distinct hosts
    /// worth visiting before a cycle or an empty lookup is forced.
    pub fn process_rewrites(table: &RewriteTable, host: &str, qtype: QType) -> MatchResult {
        let mut current_host = host.to_string();
        let mut visited: HashSet<String> = HashSet::new();

        let mut matches = table.lookup(&current_host);
        if matches.is_empty() {
            return MatchResult::not_found();
        }

        let mut result = MatchResult::with_reason(Reason::Rewritten);

        while let Some(first) = matches.first() {
            if first.record_type != QType::Cname {
                break;
            }
            let target = match &first.answer {
                RewriteAnswer::Host(h) => h.clone(),
                RewriteAnswer::Ip(_) => break,
            };

            if target.eq_ignore_ascii_case(&current_host) {
                // Explicit CNAME self-exception (§4.4 step 4, GLOSSARY).
                return MatchResult::with_reason(Reason::NotFilteredNotFound);
            }

            if visited.contains(&target.to_ascii_lowercase()) {
                tracing::info!(
                    host = %host,
                    cycle_target = %target,
                    "CNAME rewrite cycle detected; returning partial result"
                );
                return result;
            }

            visited.insert(current_host.to_ascii_lowercase());
            current_host = target.clone();
            result.canon_name = Some(Arc::from(target.as_str()));
            matches = table.lookup(&current_host);
            if matches.is_empty() {
                return result;
            }
        }

        for entry in matches {
            if entry.record_type != qtype || !qtype.is_ip() {
                continue;
            }
            match &entry.answer {
                RewriteAnswer::Ip(Some(ip)) => result.ip_list.push(*ip),
                RewriteAnswer::Ip(None) => {
                    // IP exception (§4.4 step 5): stop rewriting entirely.
                    return MatchResult::with_reason(Reason::NotFilteredNotFound);
                }
                RewriteAnswer::Host(_) => {}
            }
        }

        result
    }

    /// `$dnsrewrite` rules (`processDNSRewrites`, §4.4).
    ///
    /// A CNAME record whose target equals the queried host is a
    /// self-rewrite; the caller (`matchHost`) recognizes this by comparing
    /// `canon_name` against the original host and discards the result
    /// instead of returning it (§4.3, §9).
    pub fn process_dns_rewrites(rules: &[Rule]) -> MatchResult {
        let mut records = Vec::with_capacity(rules.len());
        let mut canon_name: Option<Arc<str>> = None;
        let mut rule_results = Vec::with_capacity(rules.len());

        for rule in rules {
            let dnsfilter_domain::RuleKind::DnsRewrite(value) = &rule.kind else {
                continue;
            };
            if let dnsfilter_domain::DnsRewriteValue::Cname(target) = value {
                canon_name = Some(Arc::clone(target));
            }
            records.push(DnsRewriteRecord::from(value));
            rule_results.push(dnsfilter_domain::RuleResult {
                text: Arc::clone(&rule.text),
                ip: None,
                filter_list_id: rule.filter_list_id,
            });
        }

        let mut result = MatchResult::with_reason(Reason::RewrittenRule);
        result.rules = rule_results;
        result.canon_name = canon_name;
        result.dns_rewrite_result = Some(DnsRewriteResult { records });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsfilter_domain::RewriteEntry;

    fn table(entries: Vec<RewriteEntry>) -> RewriteTable {
        RewriteTable::new(entries)
    }

    #[test]
    fn exact_legacy_rewrite_chases_cname_to_ip() {
        let t = table(vec![
            RewriteEntry::new(
                "*.example.com",
                QType::Cname,
                RewriteAnswer::Host("target.example.com".into()),
            ),
            RewriteEntry::new(
                "target.example.com",
                QType::A,
                RewriteAnswer::Ip(Some("1.2.3.4".parse().unwrap())),
            ),
        ]);

        let result = RewriteResolver::process_rewrites(&t, "foo.example.com", QType::A);
        assert_eq!(result.reason, Reason::Rewritten);
        assert_eq!(result.canon_name.as_deref(), Some("target.example.com"));
        assert_eq!(result.ip_list, vec!["1.2.3.4".parse::<std::net::IpAddr>().unwrap()]);
    }

    #[test]
    fn cname_self_exception_falls_through() {
        let t = table(vec![RewriteEntry::new(
            "evil.com",
            QType::Cname,
            RewriteAnswer::Host("evil.com".into()),
        )]);

        let result = RewriteResolver::process_rewrites(&t, "evil.com", QType::A);
        assert_eq!(result.reason, Reason::NotFilteredNotFound);
    }

    #[test]
    fn cname_loop_returns_partial_result_without_panicking() {
        let t = table(vec![
            RewriteEntry::new("a.com", QType::Cname, RewriteAnswer::Host("b.com".into())),
            RewriteEntry::new("b.com", QType::Cname, RewriteAnswer::Host("a.com".into())),
        ]);

        let result = RewriteResolver::process_rewrites(&t, "a.com", QType::A);
        assert_eq!(result.reason, Reason::Rewritten);
        assert_eq!(result.canon_name.as_deref(), Some("b.com"));
        assert!(result.ip_list.is_empty());
    }

    #[test]
    fn self_rewrite_dnsrewrite_is_recognized() {
        let rule = Rule::dns_rewrite(
            "||self.com^$dnsrewrite",
            0,
            dnsfilter_domain::DnsRewriteValue::Cname(Arc::from("self.com")),
        );
        let result = RewriteResolver::process_dns_rewrites(std::slice::from_ref(&rule));
        assert_eq!(result.canon_name.as_deref(), Some("self.com"));
    }
}
