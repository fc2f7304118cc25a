use std::net::IpAddr;

use crate::qtype::QType;

/// What a `RewriteEntry` resolves to.
///
/// `Ip(None)` is the "nil IP" exception of §4.4 step 5: an A/AAAA entry with
/// no address, signaling "stop rewriting" rather than supplying an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteAnswer {
    Ip(Option<IpAddr>),
    Host(String),
}

/// A user-configured rewrite (§3, GLOSSARY).
///
/// `domain` may carry a wildcard prefix `"*."`. An entry whose `answer`
/// equals its `domain` is an exception suppressing rewriting (the CNAME
/// self-exception of §4.4 step 4); an A/AAAA entry with a nil IP is the
/// distinct "IP exception" of §4.4 step 5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteEntry {
    pub domain: String,
    pub record_type: QType,
    pub answer: RewriteAnswer,
}

impl RewriteEntry {
    pub fn new(domain: impl Into<String>, record_type: QType, answer: RewriteAnswer) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            answer,
        }
    }

    /// True if this entry's answer equals its own domain — the CNAME
    /// self-exception described in §4.4 and the GLOSSARY.
    pub fn is_exception(&self) -> bool {
        matches!(&self.answer, RewriteAnswer::Host(h) if h.eq_ignore_ascii_case(&self.domain))
    }

    /// True if this is the "nil IP" exception of §4.4 step 5.
    pub fn is_ip_exception(&self) -> bool {
        matches!(&self.answer, RewriteAnswer::Ip(None))
    }

    /// True if `host` is covered by this entry's pattern: exact match, or
    /// wildcard-prefix match against a `"*."`-prefixed domain.
    pub fn matches_host(&self, host: &str) -> bool {
        if let Some(suffix) = self.domain.strip_prefix("*.") {
            host.to_ascii_lowercase()
                .ends_with(&format!(".{}", suffix.to_ascii_lowercase()))
        } else {
            host.eq_ignore_ascii_case(&self.domain)
        }
    }
}

/// Ordered list of user rewrites (§2, §3).
///
/// Entries are kept in the order supplied so that "first matching entry"
/// semantics (§4.4) are well-defined; exact matches are also indexed for
/// O(1) lookup before falling back to a wildcard scan.
#[derive(Debug, Clone, Default)]
pub struct RewriteTable {
    entries: Vec<RewriteEntry>,
}

impl RewriteTable {
    pub fn new(entries: Vec<RewriteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RewriteEntry] {
        &self.entries
    }

    pub fn set_entries(&mut self, entries: Vec<RewriteEntry>) {
        self.entries = entries;
    }

    pub fn push(&mut self, entry: RewriteEntry) {
        self.entries.push(entry);
    }

    /// All entries matching `host` (exact first, then wildcard), in table
    /// order, restricted to nothing in particular — callers filter by type
    /// as needed (§4.4 step 5 looks at both CNAME and the query's own type).
    pub fn lookup(&self, host: &str) -> Vec<&RewriteEntry> {
        let mut exact: Vec<&RewriteEntry> = Vec::new();
        let mut wildcard: Vec<&RewriteEntry> = Vec::new();
        for entry in &self.entries {
            if entry.domain.starts_with("*.") {
                if entry.matches_host(host) {
                    wildcard.push(entry);
                }
            } else if entry.matches_host(host) {
                exact.push(entry);
            }
        }
        if exact.is_empty() {
            wildcard
        } else {
            exact
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_subdomains_only() {
        let entry = RewriteEntry::new(
            "*.example.com",
            QType::Cname,
            RewriteAnswer::Host("target.example.com".into()),
        );
        assert!(entry.matches_host("foo.example.com"));
        assert!(!entry.matches_host("example.com"));
    }

    #[test]
    fn self_answer_is_exception() {
        let entry = RewriteEntry::new(
            "evil.com",
            QType::Cname,
            RewriteAnswer::Host("evil.com".into()),
        );
        assert!(entry.is_exception());
    }

    #[test]
    fn nil_ip_is_ip_exception() {
        let entry = RewriteEntry::new("ads.com", QType::A, RewriteAnswer::Ip(None));
        assert!(entry.is_ip_exception());
        assert!(!entry.is_exception());
    }
}
