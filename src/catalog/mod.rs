// ABOUTME: Catalog module - static workflow definitions and their schemas.
// ABOUTME: Loaded once at startup and read-only thereafter.

mod builtin;
mod definition;
mod registry;
mod schema;

pub use definition::*;
pub use registry::*;
pub use schema::*;
