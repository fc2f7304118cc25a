use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;

/// A single blocked-service rule: a domain pattern the service's traffic is
/// known to use (§4.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRule {
    pub pattern: Arc<str>,
}

impl ServiceRule {
    pub fn new(pattern: impl Into<Arc<str>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Wildcard-prefix (`"*.domain"`) or exact match against `host`.
    pub fn matches(&self, host: &str) -> bool {
        if let Some(suffix) = self.pattern.strip_prefix("*.") {
            host.eq_ignore_ascii_case(suffix)
                || host
                    .to_ascii_lowercase()
                    .ends_with(&format!(".{}", suffix.to_ascii_lowercase()))
        } else {
            host.eq_ignore_ascii_case(&self.pattern)
        }
    }
}

/// One service's ordered rule list, as carried per-query in `Settings`.
#[derive(Debug, Clone)]
pub struct ServiceRules {
    pub service_name: Arc<str>,
    pub rules: Vec<ServiceRule>,
}

/// The master switches gating each stage of the pipeline (§3).
///
/// `protection_enabled` gates blocked-services and block-list checks;
/// `$dnsrewrite` rewrites still apply when protection is off (GLOSSARY).
#[derive(Debug, Clone, Copy)]
pub struct ProtectionFlags {
    pub protection_enabled: bool,
    pub filtering_enabled: bool,
    pub safe_search_enabled: bool,
    pub safe_browsing_enabled: bool,
    pub parental_enabled: bool,
}

impl Default for ProtectionFlags {
    fn default() -> Self {
        Self {
            protection_enabled: true,
            filtering_enabled: true,
            safe_search_enabled: false,
            safe_browsing_enabled: false,
            parental_enabled: false,
        }
    }
}

/// Per-query client settings (§3).
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_name: Arc<str>,
    pub client_ip: Option<IpAddr>,
    pub client_tags: BTreeSet<String>,
    pub services_rules: Vec<ServiceRules>,
    pub flags: ProtectionFlags,
}

impl Settings {
    pub fn new(client_name: impl Into<Arc<str>>, flags: ProtectionFlags) -> Self {
        Self {
            client_name: client_name.into(),
            client_ip: None,
            client_tags: BTreeSet::new(),
            services_rules: Vec::new(),
            flags,
        }
    }
}
