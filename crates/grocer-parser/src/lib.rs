//! Free-text grocery list parsing through an `OpenAI` chat model.
//!
//! The model is forced to call a single function whose arguments are the
//! structured list, so the reply is machine-readable by construction.

pub mod client;
pub mod error;

pub use client::ListParser;
pub use error::ParserError;
