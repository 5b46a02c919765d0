//! Conversion between the `DashScope` wire format and the normalized chat model

mod generation;

pub use generation::{chat_response, chunk_response, completion_request};
