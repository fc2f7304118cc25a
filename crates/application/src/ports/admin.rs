use std::sync::Arc;

use crate::coordinator::FilterCoordinator;

/// Optional HTTP admin registrar (§4.1, §6).
///
/// The HTTP admin surface itself is out of scope (§1); this trait only
/// documents the seam `Start()` uses when a registrar is supplied.
pub trait AdminRegistrar: Send + Sync {
    fn register(&self, coordinator: Arc<FilterCoordinator>);
}
