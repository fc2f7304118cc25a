use std::path::PathBuf;

/// Built-in filter IDs, assigned monotonically from zero downward (§6).
pub const CUSTOM_LIST_ID: i32 = 0;
pub const SYSTEM_HOSTS_ID: i32 = -1;
pub const BLOCKED_SERVICES_ID: i32 = -2;
pub const PARENTAL_ID: i32 = -3;
pub const SAFE_BROWSING_ID: i32 = -4;
pub const SAFE_SEARCH_ID: i32 = -5;

/// A single filter list source handed to `SetFilters`.
///
/// `id < 0` is reserved for built-in lists. A filter whose `data` is empty
/// and whose `file_path` does not exist is silently skipped during build.
#[derive(Debug, Clone)]
pub struct FilterSource {
    pub id: i32,
    pub data: Option<Vec<u8>>,
    pub file_path: Option<PathBuf>,
}

impl FilterSource {
    pub fn from_data(id: i32, data: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            data: Some(data.into()),
            file_path: None,
        }
    }

    pub fn from_file(id: i32, file_path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            data: None,
            file_path: Some(file_path.into()),
        }
    }
}
