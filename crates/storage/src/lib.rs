//! SQLite persistence for the kokoro coaching backend.
//!
//! Three tables — `users`, `sessions`, `goals` — with versioned in-crate
//! migrations. A partial unique index guarantees at most one active goal per
//! user; the goal confirmation transaction leans on it to turn a concurrent
//! activation race into a detectable `Duplicate` error.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]

mod error;
mod migrations;
mod store;

#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use store::Storage;
