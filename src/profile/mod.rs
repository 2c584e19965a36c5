// ABOUTME: Profile module - per-identity entitlements and the lookup seam
// ABOUTME: through which the bridge reads them from external storage.

mod entitlement;
mod lookup;

pub use entitlement::*;
pub use lookup::*;
