//! spendgate agent library entry.
//!
//! Wires the policy codec into an agent-toolkit action provider: config,
//! content-address resolution, the session/execution collaborator seams, and
//! the built-in actions. Consumed by the `spendgate` binary and by
//! integration tests.

pub mod actions;
pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod dryrun;
pub mod executor;
pub mod resolver;
pub mod session;
