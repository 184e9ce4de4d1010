//! Core types and pure functions for the kokoro coaching backend
//!
//! This crate contains domain types shared across all other crates, plus the
//! side-effect-free building blocks: safety keyword detection, prompt
//! normalization and hashing, edit metrics, and KPI aggregation.

mod edit_metrics;
mod env_config;
mod goal;
mod kpi;
mod prompt_hash;
mod safety;
mod session;
mod user;

pub use edit_metrics::*;
pub use env_config::*;
pub use goal::*;
pub use kpi::*;
pub use prompt_hash::*;
pub use safety::*;
pub use session::*;
pub use user::*;
