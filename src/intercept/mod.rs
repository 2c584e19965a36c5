// ABOUTME: Intercept module - claims a model response's tool calls that
// ABOUTME: belong to an identity's workflows and attaches their results.

mod interceptor;

pub use interceptor::*;
