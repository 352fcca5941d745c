//! Error types for chatwin
//!
//! Every fallible operation in this crate returns [`ChatResult`]. Budget
//! pressure never produces an error: only configuration problems, storage
//! problems and failures of the primary LLM response reach the caller.

mod constructors;
mod conversions;
mod types;

pub use types::{ChatError, ChatResult, ResultExt};
