//! Core types and trait definitions for the Roster members directory.
//!
//! Holds the member model, input validation, the storage trait, pagination
//! and the procedure caller. No HTTP or SQL lives here; the store and API
//! crates build on it.

pub mod caller;
pub mod error;
pub mod input;
pub mod member;
pub mod pagination;
pub mod repo;
pub mod store;

#[cfg(test)]
mod testing;

pub use caller::Caller;
pub use error::{Error, ErrorCode, Result};
