// ABOUTME: Chat module - wire types for the function-calling chat protocol.
// ABOUTME: Covers tool advertisement, tool calls and completion responses.

mod types;

pub use types::*;
