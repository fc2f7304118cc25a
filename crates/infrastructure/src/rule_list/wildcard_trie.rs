use std::collections::HashMap;

use compact_str::CompactString;
use dnsfilter_domain::Rule;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

/// A node in the reversed-label suffix trie.
#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    /// Rules whose wildcard pattern terminates at this node. `*.ads.com`
    /// stores its rule at the "ads" node reached by traversing "com".
    rules: Vec<Rule>,
}

/// Suffix trie for wildcard domain rules (`"*.domain"`), grounded on the
/// teacher's block-filter wildcard index but storing rule handles directly
/// rather than a source bitmask, since this crate's rule model has no
/// per-source mask to combine.
///
/// `*.ads.com` matches `sub.ads.com` but never the bare `ads.com` — a match
/// requires at least one label remaining past the node where the rule is
/// stored.
#[derive(Default)]
pub struct WildcardTrie {
    root: TrieNode,
}

impl WildcardTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// `pattern` carries the `"*."` prefix, e.g. `"*.ads.com"`.
    pub fn insert(&mut self, pattern: &str, rule: Rule) {
        let domain = pattern.strip_prefix("*.").unwrap_or(pattern);
        let mut node = &mut self.root;
        for label in domain.split('.').rev() {
            node = node.children.entry(CompactString::new(label)).or_default();
        }
        node.rules.push(rule);
    }

    pub fn lookup(&self, domain: &str) -> Vec<Rule> {
        let labels: SmallVec<[&str; 8]> = domain.split('.').rev().collect();
        let n = labels.len();
        let mut node = &self.root;
        let mut out = Vec::new();

        for (i, label) in labels.iter().enumerate() {
            match node.children.get(*label) {
                Some(child) => {
                    if !child.rules.is_empty() && i + 1 < n {
                        out.extend(child.rules.iter().cloned());
                    }
                    node = child;
                }
                None => break,
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_rule(text: &str) -> Rule {
        Rule::network(text, 1, false)
    }

    #[test]
    fn subdomain_matches_but_apex_does_not() {
        let mut trie = WildcardTrie::new();
        trie.insert("*.ads.com", network_rule("*.ads.com"));

        assert_eq!(trie.lookup("sub.ads.com").len(), 1);
        assert!(trie.lookup("ads.com").is_empty());
    }

    #[test]
    fn unrelated_domain_does_not_match() {
        let mut trie = WildcardTrie::new();
        trie.insert("*.ads.com", network_rule("*.ads.com"));
        assert!(trie.lookup("example.com").is_empty());
    }
}
