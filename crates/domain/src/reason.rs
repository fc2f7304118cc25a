use std::fmt;

use serde::{Serialize, Serializer};

/// The closed set of verdicts a match can produce (§3).
///
/// `is_filtered` is true iff `reason == FilteredBlockList` — other filtered
/// reasons set `is_filtered = false` even though the query is effectively
/// blocked. This is a stable wire contract (§3 invariant); do not "fix" it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    NotFilteredNotFound,
    NotFilteredAllowList,
    NotFilteredError,
    FilteredBlockList,
    FilteredSafeBrowsing,
    FilteredParental,
    FilteredInvalid,
    FilteredSafeSearch,
    FilteredBlockedService,
    Rewritten,
    RewrittenAutoHosts,
    RewrittenRule,
}

impl Reason {
    /// True iff this reason is `FilteredBlockList` (§3 invariant).
    pub fn is_filtered(&self) -> bool {
        matches!(self, Reason::FilteredBlockList)
    }

    /// The historical wire name, preserved verbatim for back-compat with UI
    /// consumers (§6, §9). Several names diverge from the enum variant name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Reason::NotFilteredNotFound => "NotFilteredNotFound",
            Reason::NotFilteredAllowList => "NotFilteredWhiteList",
            Reason::NotFilteredError => "NotFilteredError",
            Reason::FilteredBlockList => "FilteredBlackList",
            Reason::FilteredSafeBrowsing => "FilteredSafeBrowsing",
            Reason::FilteredParental => "FilteredParental",
            Reason::FilteredInvalid => "FilteredInvalid",
            Reason::FilteredSafeSearch => "FilteredSafeSearch",
            Reason::FilteredBlockedService => "FilteredBlockedService",
            Reason::Rewritten => "Rewrite",
            Reason::RewrittenAutoHosts => "RewriteAutoHosts",
            Reason::RewrittenRule => "RewriteRule",
        }
    }
}

impl Default for Reason {
    fn default() -> Self {
        Reason::NotFilteredNotFound
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_filtered_iff_block_list() {
        for reason in [
            Reason::NotFilteredNotFound,
            Reason::NotFilteredAllowList,
            Reason::NotFilteredError,
            Reason::FilteredSafeBrowsing,
            Reason::FilteredParental,
            Reason::FilteredInvalid,
            Reason::FilteredSafeSearch,
            Reason::FilteredBlockedService,
            Reason::Rewritten,
            Reason::RewrittenAutoHosts,
            Reason::RewrittenRule,
        ] {
            assert!(!reason.is_filtered());
        }
        assert!(Reason::FilteredBlockList.is_filtered());
    }

    #[test]
    fn wire_names_preserve_back_compat() {
        assert_eq!(Reason::NotFilteredAllowList.wire_name(), "NotFilteredWhiteList");
        assert_eq!(Reason::FilteredBlockList.wire_name(), "FilteredBlackList");
    }
}
