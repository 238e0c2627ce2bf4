//! Prelude module for the today crate.
//!
//! Re-exports the derive_more macros used across modules.

pub use derive_more::{Deref, Display};
