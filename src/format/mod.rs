// ABOUTME: Format module - renders execution results as agent-protocol
// ABOUTME: tool messages and as short human-readable text.

mod display;
mod protocol;

pub use display::*;
pub use protocol::*;

#[cfg(test)]
mod display_test;
