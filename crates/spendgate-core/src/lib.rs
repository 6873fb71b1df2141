//! spendgate core: the spending-policy codec and its primitives.
//!
//! This crate validates, encodes, and decodes the fixed-shape transfer policy
//! handed to a remote action executor. It is pure and synchronous and carries
//! no runtime dependencies, so encode/decode calls can run in parallel freely.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed input of
//! any kind (user records or wire bytes) surfaces as `SpendGateError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod policy;

/// Shared result type.
pub use error::{ErrorCode, Result, SpendGateError};
