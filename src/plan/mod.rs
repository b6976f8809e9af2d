//! Plan input module.
//!
//! This module defines the decoded plan document and the decoder that
//! validates raw plan JSON before it reaches the renderer.

mod decoder;
mod types;

pub use decoder::PlanDecoder;
pub use types::{ActionSet, Change, Plan, ResourceChange, ResourceMode};
