use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dnsfilter_domain::{FilterError, MatchResult, QType, Settings};

/// One stage of the filtering pipeline (§4.1, §4.5).
///
/// A checker reports `MatchResult::not_found()` to mean "no opinion, try the
/// next checker" — any other reason wins the chain outright.
#[async_trait]
pub trait HostChecker: Send + Sync {
    async fn check(
        &self,
        host: &str,
        client_tags: &BTreeSet<String>,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError>;
}

/// The fixed, named sequence of checkers `CheckHost` runs (§4.1, §4.5).
///
/// Order matters: the first checker to return something other than
/// `NotFilteredNotFound` wins. A checker's error is wrapped with its name so
/// the caller knows which stage failed (§7).
pub struct HostCheckerChain {
    checkers: Vec<(&'static str, Arc<dyn HostChecker>)>,
}

impl HostCheckerChain {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    pub fn with_checker(mut self, name: &'static str, checker: Arc<dyn HostChecker>) -> Self {
        self.checkers.push((name, checker));
        self
    }

    pub async fn check(
        &self,
        host: &str,
        client_tags: &BTreeSet<String>,
        qtype: QType,
        settings: &Settings,
    ) -> Result<MatchResult, FilterError> {
        for (name, checker) in &self.checkers {
            let result = checker
                .check(host, client_tags, qtype, settings)
                .await
                .map_err(|e| FilterError::Checker {
                    name,
                    source: Box::new(e),
                })?;
            if !result.is_not_found() {
                return Ok(result);
            }
        }
        Ok(MatchResult::not_found())
    }
}

impl Default for HostCheckerChain {
    fn default() -> Self {
        Self::new()
    }
}
