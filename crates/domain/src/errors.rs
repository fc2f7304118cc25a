use thiserror::Error;

/// Errors surfaced by the filter. Mirrors §7's closed set of error kinds.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Rule-list compilation or non-"not found" file I/O during `SetFilters`.
    #[error("failed to build rule storage: {0}")]
    ConfigBuild(String),

    /// A rule-engine match violated the "at least one rule set is non-empty"
    /// invariant matchHostProcessAllowList depends on.
    #[error("invalid dns result: rules are empty")]
    InvalidDnsResult,

    /// A checker in the chain returned an error; iteration stopped.
    #[error("checker {name} failed: {source}")]
    Checker {
        name: &'static str,
        #[source]
        source: Box<FilterError>,
    },

    /// An external port (reputation lookup, resolver, hosts container)
    /// failed.
    #[error("external port error: {0}")]
    Port(String),
}
