//! Canonical chat types shared with callers of the adapter
//!
//! These types are vendor-agnostic: prompts flow in, normalized responses flow
//! out, and nothing here depends on the `DashScope` wire format.

pub mod message;
pub mod prompt;
pub mod response;
pub mod tool;

pub use message::{Message, Role};
pub use prompt::{ChatOptions, Prompt};
pub use response::{ChatResponse, FinishReason, Generation, ResponseMetadata, Usage};
pub use tool::{FunctionDefinition, ToolDefinition};
