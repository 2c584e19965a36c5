// ABOUTME: Permission module - per-call authorization against the catalog
// ABOUTME: and role gates for administrative operations.

mod elevated;
mod guard;

pub use elevated::*;
pub use guard::*;
