use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dnsfilter_domain::{FilterError, MatchResult, QType, Settings};

use crate::chain::HostChecker;
use crate::ports::ReputationChecker;

/// Which per-query flag gates a `ReputationCheckerAdapter` (§4.2: safe
/// browsing and parental share this contract, differing only in which flag
/// they consult and which port they forward to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationGate {
    SafeBrowsing,
    Parental,
}

impl ReputationGate {
    fn is_enabled(&self, settings: &Settings) -> bool {
        match self {
            ReputationGate::SafeBrowsing => settings.flags.safe_browsing_enabled,
            ReputationGate::Parental => settings.flags.parental_enabled,
        }
    }
}

/// Safe-browsing and parental checkers (§4.2): both are thin, flag-gated
/// wrappers over an injected `ReputationChecker` port.
pub struct ReputationCheckerAdapter {
    gate: ReputationGate,
    inner: Arc<dyn ReputationChecker>,
}

impl ReputationCheckerAdapter {
    pub fn new(gate: ReputationGate, inner: Arc<dyn ReputationChecker>) -> Self {
        Self { gate, inner }
    }
}

#[async_trait]
impl HostChecker for ReputationCheckerAdapter {
    async fn check(
        &self,
        host: &str,
        _client_tags: &BTreeSet<String>,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        if !self.gate.is_enabled(settings) {
            return Ok(MatchResult::not_found());
        }
        self.inner.check(host, qtype, settings).await
    }
}
