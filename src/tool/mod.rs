// ABOUTME: Tool module - materialization of workflows into agent tools,
// ABOUTME: the per-role descriptor cache, and the native Tool surface.

mod descriptor;
mod materializer;
mod registry;
mod result;
mod traits;
mod workflow_tool;

pub use descriptor::*;
pub use materializer::*;
pub use registry::*;
pub use result::*;
pub use traits::*;
pub use workflow_tool::*;
