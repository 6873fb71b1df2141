//! Top-level facade crate for spendgate.
//!
//! Re-exports the policy codec and the agent library so users can depend on a single crate.

pub mod core {
    pub use spendgate_core::*;
}

pub mod agent {
    pub use spendgate_agent::*;
}
