use std::sync::Arc;

use aho_corasick::AhoCorasick;
use bloomfilter::Bloom;
use compact_str::CompactString;
use dashmap::DashMap;
use dnsfilter_application::ports::{CompiledRuleList, MatchRequest, RuleListCompiler, RuleMatch};
use dnsfilter_domain::{FilterError, FilterSource, Rule};
use rustc_hash::FxBuildHasher;
use tracing::warn;

use super::parser::{parse_line, ParsedLine};
use super::wildcard_trie::WildcardTrie;

/// In-memory stand-in for "the underlying rule-list compiler/matcher
/// library" referenced, but not designed, in the public contract: bloom
/// filter gate + exact map + suffix trie + Aho-Corasick pattern automata,
/// grounded on the teacher's block-filter compiler/index pair.
pub struct InMemoryRuleList {
    bloom: Bloom<String>,
    exact: DashMap<CompactString, Vec<Rule>, FxBuildHasher>,
    wildcard: WildcardTrie,
    patterns: Option<(AhoCorasick, Vec<Rule>)>,
}

impl InMemoryRuleList {
    fn bucket(rules: Vec<Rule>) -> RuleMatch {
        let mut result = RuleMatch::default();
        for rule in rules {
            match &rule.kind {
                dnsfilter_domain::RuleKind::DnsRewrite(_) => result.dns_rewrites.push(rule),
                dnsfilter_domain::RuleKind::Host { ip } => {
                    if ip.is_ipv6() {
                        result.v6_host_rules.push(rule);
                    } else {
                        result.v4_host_rules.push(rule);
                    }
                }
                dnsfilter_domain::RuleKind::Network { .. } => {
                    if result.network_rule.is_none() {
                        result.network_rule = Some(rule);
                    }
                }
            }
        }
        result
    }
}

impl CompiledRuleList for InMemoryRuleList {
    fn match_request(&self, request: &MatchRequest) -> RuleMatch {
        let domain = request.hostname.to_ascii_lowercase();
        let mut hits = Vec::new();

        if self.bloom.check(&domain) {
            if let Some(rules) = self.exact.get(domain.as_str()) {
                hits.extend(rules.iter().cloned());
            }
        }

        hits.extend(self.wildcard.lookup(&domain));

        if let Some((automaton, rules)) = &self.patterns {
            for mat in automaton.find_iter(&domain) {
                hits.push(rules[mat.pattern().as_usize()].clone());
            }
        }

        Self::bucket(hits)
    }
}

/// Accumulates parsed entries before freezing them into an `InMemoryRuleList`.
#[derive(Default)]
struct Builder {
    exact: Vec<(String, Rule)>,
    wildcard: Vec<(String, Rule)>,
    patterns: Vec<(String, Rule)>,
}

impl Builder {
    fn push_line(&mut self, line: &str, filter_list_id: i32) {
        let Some(parsed) = parse_line(line) else { return };
        match parsed {
            ParsedLine::NetworkExact { domain, whitelist } => {
                let rule = Rule::network(domain.clone(), filter_list_id, whitelist);
                self.exact.push((domain, rule));
            }
            ParsedLine::NetworkWildcard { pattern, whitelist } => {
                let rule = Rule::network(pattern.clone(), filter_list_id, whitelist);
                self.wildcard.push((pattern, rule));
            }
            ParsedLine::NetworkPattern { substring } => {
                let rule = Rule::network(substring.clone(), filter_list_id, false);
                self.patterns.push((substring, rule));
            }
            ParsedLine::Host { domain, ip } => {
                let rule = Rule::host(domain.clone(), filter_list_id, ip);
                self.exact.push((domain, rule));
            }
            ParsedLine::DnsRewriteExact { domain, value } => {
                let text = format!("{domain}$dnsrewrite");
                let rule = Rule::dns_rewrite(text, filter_list_id, value);
                self.exact.push((domain, rule));
            }
            ParsedLine::DnsRewriteWildcard { pattern, value } => {
                let text = format!("{pattern}$dnsrewrite");
                let rule = Rule::dns_rewrite(text, filter_list_id, value);
                self.wildcard.push((pattern, rule));
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcard.is_empty() && self.patterns.is_empty()
    }

    fn finish(self) -> InMemoryRuleList {
        let exact_count = self.exact.len();
        let mut bloom = Bloom::new_for_fp_rate(exact_count.max(16), 0.01)
            .expect("bloom filter parameters are always valid for a non-zero capacity");
        let exact: DashMap<CompactString, Vec<Rule>, FxBuildHasher> =
            DashMap::with_capacity_and_hasher(exact_count, FxBuildHasher);
        for (domain, rule) in self.exact {
            bloom.set(&domain);
            exact.entry(CompactString::new(&domain)).or_default().push(rule);
        }

        let mut wildcard = WildcardTrie::new();
        for (pattern, rule) in self.wildcard {
            wildcard.insert(&pattern, rule);
        }

        let patterns = if self.patterns.is_empty() {
            None
        } else {
            let (needles, rules): (Vec<String>, Vec<Rule>) = self.patterns.into_iter().unzip();
            match AhoCorasick::new(&needles) {
                Ok(automaton) => Some((automaton, rules)),
                Err(e) => {
                    warn!(error = %e, "failed to build pattern automaton, skipping pattern rules");
                    None
                }
            }
        };

        InMemoryRuleList { bloom, exact, wildcard, patterns }
    }
}

/// Builds `InMemoryRuleList`s from `FilterSource`s read from inline data or
/// the filesystem (§4.3).
#[derive(Default)]
pub struct InMemoryRuleListCompiler;

impl InMemoryRuleListCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl RuleListCompiler for InMemoryRuleListCompiler {
    fn compile(
        &self,
        filters: &[FilterSource],
    ) -> Result<Option<Arc<dyn CompiledRuleList>>, FilterError> {
        let mut builder = Builder::default();

        for source in filters {
            let text = if let Some(data) = &source.data {
                Some(String::from_utf8_lossy(data).into_owned())
            } else if let Some(path) = &source.file_path {
                match std::fs::read_to_string(path) {
                    Ok(text) => Some(text),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => {
                        return Err(FilterError::ConfigBuild(format!(
                            "reading filter source {}: {e}",
                            path.display()
                        )))
                    }
                }
            } else {
                None
            };

            let Some(text) = text else { continue };
            for line in text.lines() {
                builder.push_line(line, source.id);
            }
        }

        if builder.is_empty() {
            return Ok(None);
        }

        Ok(Some(Arc::new(builder.finish())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsfilter_domain::QType;
    use std::collections::BTreeSet;
    use std::sync::Arc as StdArc;

    fn request(host: &str) -> MatchRequest {
        MatchRequest {
            hostname: StdArc::from(host),
            client_tags: BTreeSet::new(),
            client_ip: None,
            client_name: StdArc::from("client"),
            qtype: QType::A,
        }
    }

    #[test]
    fn compiles_exact_and_wildcard_and_pattern_rules() {
        let compiler = InMemoryRuleListCompiler::new();
        let data = "ads.example.com\n*.tracker.net\n/evil/\n";
        let filters = vec![FilterSource::from_data(0, data)];
        let compiled = compiler.compile(&filters).unwrap().unwrap();

        assert!(compiled.match_request(&request("ads.example.com")).network_rule.is_some());
        assert!(compiled.match_request(&request("sub.tracker.net")).network_rule.is_some());
        assert!(compiled.match_request(&request("sub.tracker.net")).network_rule.is_some());
        assert!(compiled.match_request(&request("evilcorp.com")).network_rule.is_some());
        assert!(compiled.match_request(&request("safe.com")).is_empty());
    }

    #[test]
    fn missing_file_path_is_not_an_error() {
        let compiler = InMemoryRuleListCompiler::new();
        let filters = vec![FilterSource::from_file(0, "/nonexistent/path/does-not-exist.txt")];
        assert!(compiler.compile(&filters).unwrap().is_none());
    }

    #[test]
    fn empty_data_yields_no_compiled_list() {
        let compiler = InMemoryRuleListCompiler::new();
        let filters = vec![FilterSource::from_data(0, "# just a comment\n")];
        assert!(compiler.compile(&filters).unwrap().is_none());
    }

    #[test]
    fn hosts_rule_is_bucketed_by_address_family() {
        let compiler = InMemoryRuleListCompiler::new();
        let filters = vec![FilterSource::from_data(0, "1.2.3.4 pinned.example.com\n")];
        let compiled = compiler.compile(&filters).unwrap().unwrap();
        let m = compiled.match_request(&request("pinned.example.com"));
        assert_eq!(m.v4_host_rules.len(), 1);
        assert!(m.v6_host_rules.is_empty());
    }

    #[test]
    fn dnsrewrite_rule_is_surfaced() {
        let compiler = InMemoryRuleListCompiler::new();
        let filters = vec![FilterSource::from_data(
            0,
            "||rewritten.example.com^$dnsrewrite=CNAME:target.example.com\n",
        )];
        let compiled = compiler.compile(&filters).unwrap().unwrap();
        let m = compiled.match_request(&request("rewritten.example.com"));
        assert_eq!(m.dns_rewrites.len(), 1);
    }
}
