//! Action registry exports.

pub mod provider;

pub use provider::ActionProvider;
