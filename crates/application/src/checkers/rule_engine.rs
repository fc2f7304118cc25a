use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dnsfilter_domain::{FilterError, MatchResult, QType, Settings};

use crate::chain::HostChecker;
use crate::engine::{self, EngineSwap};

/// `matchHost` (§4.2, §4.3), wrapped as a chain member.
pub struct RuleEngineChecker {
    engine: Arc<EngineSwap>,
}

impl RuleEngineChecker {
    pub fn new(engine: Arc<EngineSwap>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl HostChecker for RuleEngineChecker {
    async fn check(
        &self,
        host: &str,
        client_tags: &BTreeSet<String>,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        engine::match_host(&self.engine, host, client_tags, qtype, settings)
    }
}
