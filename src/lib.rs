// ABOUTME: Root module for flowbridge - exposes automation workflows to AI
// ABOUTME: agents as role-scoped function tools. Re-exports the main types.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod exec;
pub mod format;
pub mod intercept;
pub mod permission;
pub mod prelude;
pub mod profile;
pub mod service;
pub mod telemetry;
pub mod tool;

pub use error::BridgeError;
pub use service::{Identity, ToolBridge};
