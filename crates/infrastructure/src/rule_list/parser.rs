use std::net::IpAddr;
use std::sync::Arc;

use dnsfilter_domain::DnsRewriteValue;

/// One line of filter-source text, parsed into the shape the compiler needs
/// to build a `Rule`. Line syntax is a minimal adblock/hosts hybrid (`||
/// domain^`, `@@||domain^`, `*.domain`, `ip domain`, `/substring/`, plus a
/// `$dnsrewrite=KIND:value` modifier) — the rule-list syntax itself is
/// out of scope for the core to design; this is this crate's stand-in
/// implementation of "the rule-list library" referenced but not designed
/// there.
#[derive(Debug, PartialEq)]
pub enum ParsedLine {
    NetworkExact { domain: String, whitelist: bool },
    NetworkWildcard { pattern: String, whitelist: bool },
    NetworkPattern { substring: String },
    Host { domain: String, ip: IpAddr },
    DnsRewriteExact { domain: String, value: DnsRewriteValue },
    DnsRewriteWildcard { pattern: String, value: DnsRewriteValue },
}

fn parse_dnsrewrite_value(spec: &str) -> Option<DnsRewriteValue> {
    let mut parts = spec.splitn(2, ':');
    let kind = parts.next()?;
    let arg = parts.next();
    match kind.to_ascii_uppercase().as_str() {
        "CNAME" => Some(DnsRewriteValue::Cname(Arc::from(arg?))),
        "A" => Some(DnsRewriteValue::A(arg?.parse().ok()?)),
        "AAAA" => Some(DnsRewriteValue::Aaaa(arg?.parse().ok()?)),
        "NXDOMAIN" => Some(DnsRewriteValue::NxDomain),
        "REFUSED" => Some(DnsRewriteValue::Refused),
        _ => None,
    }
}

/// Parse one line. Returns `None` for comments, blanks, and anything that
/// doesn't match a recognized form.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
        return None;
    }

    if line.starts_with('/') && line.ends_with('/') && line.len() > 2 {
        return Some(ParsedLine::NetworkPattern {
            substring: line[1..line.len() - 1].to_ascii_lowercase(),
        });
    }

    let whitelist = line.starts_with("@@");
    let rest = if whitelist { &line[2..] } else { line };

    if let Some(rest) = rest.strip_prefix("||") {
        let (domain_part, modifier) = match rest.split_once('$') {
            Some((d, m)) => (d, Some(m)),
            None => (rest, None),
        };
        let domain = domain_part.trim_end_matches('^').to_ascii_lowercase();

        if let Some(modifier) = modifier {
            let spec = modifier.strip_prefix("dnsrewrite=")?;
            let value = parse_dnsrewrite_value(spec)?;
            return Some(if domain.starts_with("*.") {
                ParsedLine::DnsRewriteWildcard { pattern: domain, value }
            } else {
                ParsedLine::DnsRewriteExact { domain, value }
            });
        }

        return Some(if domain.starts_with("*.") {
            ParsedLine::NetworkWildcard { pattern: domain, whitelist }
        } else {
            ParsedLine::NetworkExact { domain, whitelist }
        });
    }

    if let Some(rest) = line.strip_prefix("*.") {
        if rest.contains('.') {
            return Some(ParsedLine::NetworkWildcard {
                pattern: line.to_ascii_lowercase(),
                whitelist: false,
            });
        }
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() >= 2 {
        if let Ok(ip) = parts[0].parse::<IpAddr>() {
            let domain = parts[1].to_ascii_lowercase();
            if domain.contains('.') {
                return Some(ParsedLine::Host { domain, ip });
            }
        }
    }

    if parts.len() == 1 && parts[0].contains('.') {
        return Some(ParsedLine::NetworkExact {
            domain: parts[0].to_ascii_lowercase(),
            whitelist: false,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_domain_is_exact_block() {
        assert_eq!(
            parse_line("ads.example.com"),
            Some(ParsedLine::NetworkExact {
                domain: "ads.example.com".into(),
                whitelist: false
            })
        );
    }

    #[test]
    fn adblock_network_rule() {
        assert_eq!(
            parse_line("||ads.com^"),
            Some(ParsedLine::NetworkExact {
                domain: "ads.com".into(),
                whitelist: false
            })
        );
    }

    #[test]
    fn adblock_allowlist_rule() {
        assert_eq!(
            parse_line("@@||ads.com^"),
            Some(ParsedLine::NetworkExact {
                domain: "ads.com".into(),
                whitelist: true
            })
        );
    }

    #[test]
    fn wildcard_rule() {
        assert_eq!(
            parse_line("*.ads.com"),
            Some(ParsedLine::NetworkWildcard {
                pattern: "*.ads.com".into(),
                whitelist: false
            })
        );
    }

    #[test]
    fn hosts_file_entry() {
        assert_eq!(
            parse_line("1.2.3.4 foo.example.com"),
            Some(ParsedLine::Host {
                domain: "foo.example.com".into(),
                ip: "1.2.3.4".parse().unwrap(),
            })
        );
    }

    #[test]
    fn dnsrewrite_modifier() {
        let parsed = parse_line("||target.example.com^$dnsrewrite=A:1.2.3.4").unwrap();
        match parsed {
            ParsedLine::DnsRewriteExact { domain, value } => {
                assert_eq!(domain, "target.example.com");
                assert_eq!(value, DnsRewriteValue::A("1.2.3.4".parse().unwrap()));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn pattern_rule() {
        assert_eq!(
            parse_line("/tracker/"),
            Some(ParsedLine::NetworkPattern {
                substring: "tracker".into()
            })
        );
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        assert!(parse_line("# comment").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }
}
