//! Account address parsing on top of `alloy_primitives::Address`.
//!
//! All-lowercase and all-uppercase digits are taken as-is; mixed case must
//! carry a valid EIP-55 checksum.

use alloy_primitives::Address;
use thiserror::Error;

/// Byte width of an address.
pub const ADDRESS_LEN: usize = 20;

/// Why a string is not a well-formed address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("expected 40 hex digits, got {0}")]
    BadLength(usize),
    #[error("non-hex character")]
    NotHex,
    #[error("mixed-case address fails checksum")]
    BadChecksum,
}

/// Parse `0x` + 40 hex digits.
pub fn parse_address(s: &str) -> Result<Address, AddressError> {
    let digits = s.strip_prefix("0x").ok_or(AddressError::MissingPrefix)?;
    if digits.len() != 2 * ADDRESS_LEN {
        return Err(AddressError::BadLength(digits.len()));
    }
    if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::NotHex);
    }

    let has_lower = digits.bytes().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(s, None).map_err(|_| AddressError::BadChecksum);
    }

    let mut bytes = [0u8; ADDRESS_LEN];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| AddressError::NotHex)?;
    Ok(Address::from(bytes))
}
