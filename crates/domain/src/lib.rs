//! DNS Filter Domain Layer
//!
//! Types shared by every layer of the filter: the typed verdict
//! (`MatchResult`), the rule and rewrite data model, per-query settings, and
//! the closed `Reason` enum. Nothing in this crate performs I/O or matching —
//! that is the job of `dnsfilter-application` and `dnsfilter-infrastructure`.

pub mod errors;
pub mod filter_source;
pub mod qtype;
pub mod reason;
pub mod result;
pub mod rewrite;
pub mod rule;
pub mod services;
pub mod settings;

pub use errors::FilterError;
pub use filter_source::FilterSource;
pub use qtype::QType;
pub use reason::Reason;
pub use result::{DnsRewriteRecord, DnsRewriteResult, MatchResult, RuleResult};
pub use rewrite::{RewriteAnswer, RewriteEntry, RewriteTable};
pub use rule::{DnsRewriteValue, Rule, RuleKind};
pub use services::{is_known_service, KNOWN_SERVICES};
pub use settings::{ProtectionFlags, ServiceRule, ServiceRules, Settings};
