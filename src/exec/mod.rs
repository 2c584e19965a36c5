// ABOUTME: Exec module - execution context, normalized results and the
// ABOUTME: HTTP bridge to the external automation engine.

mod bridge;
mod cancel;
mod context;
mod result;

pub use bridge::*;
pub use cancel::*;
pub use context::*;
pub use result::*;

#[cfg(test)]
mod bridge_test;
