//! Domain rules for the agora discussion board.
//!
//! Nothing in this crate performs I/O. It holds the identifier and time types,
//! the error taxonomy, content rules, the bearer-credential permission state
//! machine, snapshot ordering, and pagination helpers shared by the store and
//! HTTP layers.

pub mod account;
pub mod content;
pub mod error;
pub mod pagination;
pub mod permission;
pub mod snapshot;
pub mod types;
