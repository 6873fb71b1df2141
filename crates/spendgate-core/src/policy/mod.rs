//! Spending-policy modules.
//!
//! - `record`: caller-facing record, validation, and the validated value type.
//! - `codec`: ABI-style tuple encoding of a validated policy.
//! - `address`: account parsing; the wire primitives themselves are
//!   `alloy_primitives::{Address, U256}`.
//!
//! Readers never index raw buffers; every length is checked against
//! `remaining()` before a read, so hostile bytes become `DecodingError`.

pub mod address;
pub mod codec;
pub mod record;

pub use address::{parse_address, AddressError};
pub use alloy_primitives::{Address, U256};
pub use codec::{decode, decode_hex, encode, encode_hex};
pub use record::{validate, MaxAmount, TransferPolicy, ValidPolicy};

/// Discriminator every transfer policy must carry.
pub const POLICY_KIND: &str = "ERC20Transfer";

/// Canonical version reinstated on decode (the wire form does not carry it).
pub const POLICY_VERSION: &str = "1.0.0";
