//! Transfer policy record and validation.
//!
//! `TransferPolicy` is what callers build from user input (JSON field names
//! match the executor's policy schema). `validate` turns it into an immutable
//! `ValidPolicy`, the only thing the codec accepts.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use alloy_primitives::{Address, U256};

use super::address::parse_address;
use super::{POLICY_KIND, POLICY_VERSION};
use crate::error::{Result, SpendGateError};

/// Caller-facing policy record (unvalidated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransferPolicy {
    /// Policy family discriminator (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    /// Token decimals, accepted as a JSON string or integer.
    #[serde(rename = "erc20Decimals", deserialize_with = "string_or_int")]
    pub decimal_places: String,
    /// Human-denominated maximum, or smallest units after a decode.
    pub max_amount: String,
    pub allowed_tokens: Vec<String>,
    pub allowed_recipients: Vec<String>,
}

impl TransferPolicy {
    /// Build a record with the canonical discriminator and version.
    pub fn erc20(
        decimal_places: u8,
        max_amount: impl Into<String>,
        allowed_tokens: Vec<String>,
        allowed_recipients: Vec<String>,
    ) -> Self {
        Self {
            kind: POLICY_KIND.to_string(),
            version: POLICY_VERSION.to_string(),
            decimal_places: decimal_places.to_string(),
            max_amount: max_amount.into(),
            allowed_tokens,
            allowed_recipients,
        }
    }

    pub fn validate(&self) -> Result<ValidPolicy> {
        validate(self)
    }
}

fn string_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

/// Maximum transfer amount carried by a validated policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxAmount {
    /// Human-denominated: `whole.fraction`, fraction no longer than the decimals.
    Human { whole: String, fraction: String },
    /// Already in smallest units (what `decode` yields).
    Scaled(U256),
}

impl MaxAmount {
    /// Smallest-unit value: `whole.fraction * 10^decimals`.
    pub fn scaled(&self, decimals: u8) -> Result<U256> {
        match self {
            MaxAmount::Scaled(v) => Ok(*v),
            MaxAmount::Human { whole, fraction } => {
                let frac_digits = u8::try_from(fraction.len())
                    .ok()
                    .filter(|&n| n <= decimals)
                    .ok_or_else(|| {
                        SpendGateError::Encoding(format!(
                            "maxAmount has {} fractional digits, decimals is {decimals}",
                            fraction.len()
                        ))
                    })?;
                let overflow = || {
                    SpendGateError::Encoding(format!(
                        "maxAmount {self} scaled by 10^{decimals} overflows uint256"
                    ))
                };
                let parse = |digits: &str| {
                    U256::from_str_radix(digits, 10).map_err(|e| {
                        SpendGateError::Encoding(format!("maxAmount {self} not encodable: {e}"))
                    })
                };

                let whole = parse(whole.as_str())?;
                let fraction = if fraction.is_empty() { U256::ZERO } else { parse(fraction.as_str())? };
                let ten = U256::from(10u64);
                let scale = ten.checked_pow(U256::from(u64::from(decimals))).ok_or_else(overflow)?;
                let frac_scale = ten
                    .checked_pow(U256::from(u64::from(decimals - frac_digits)))
                    .ok_or_else(overflow)?;

                whole
                    .checked_mul(scale)
                    .zip(fraction.checked_mul(frac_scale))
                    .and_then(|(w, f)| w.checked_add(f))
                    .ok_or_else(overflow)
            }
        }
    }
}

impl fmt::Display for MaxAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxAmount::Human { whole, fraction } if fraction.is_empty() => f.write_str(whole),
            MaxAmount::Human { whole, fraction } => write!(f, "{whole}.{fraction}"),
            MaxAmount::Scaled(v) => write!(f, "{v}"),
        }
    }
}

/// Validated, immutable policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPolicy {
    version: String,
    decimals: u8,
    max_amount: MaxAmount,
    allowed_tokens: Vec<Address>,
    allowed_recipients: Vec<Address>,
}

impl ValidPolicy {
    /// Reconstruct from wire fields; `kind`/`version` fall back to canonical values.
    pub(crate) fn from_wire(
        decimals: u8,
        max_amount: U256,
        allowed_tokens: Vec<Address>,
        allowed_recipients: Vec<Address>,
    ) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            decimals,
            max_amount: MaxAmount::Scaled(max_amount),
            allowed_tokens,
            allowed_recipients,
        }
    }

    pub fn kind(&self) -> &'static str {
        POLICY_KIND
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn decimals(&self) -> u8 {
        self.decimals
    }
    pub fn max_amount(&self) -> &MaxAmount {
        &self.max_amount
    }
    pub fn allowed_tokens(&self) -> &[Address] {
        &self.allowed_tokens
    }
    pub fn allowed_recipients(&self) -> &[Address] {
        &self.allowed_recipients
    }

    /// Max amount in smallest units, exactly as `encode` writes it.
    pub fn scaled_max_amount(&self) -> Result<U256> {
        self.max_amount.scaled(self.decimals)
    }

    /// Back to the caller-facing record (addresses in checksum form).
    pub fn to_record(&self) -> TransferPolicy {
        TransferPolicy {
            kind: POLICY_KIND.to_string(),
            version: self.version.clone(),
            decimal_places: self.decimals.to_string(),
            max_amount: self.max_amount.to_string(),
            allowed_tokens: self.allowed_tokens.iter().map(|a| a.to_checksum(None)).collect(),
            allowed_recipients: self.allowed_recipients.iter().map(|a| a.to_checksum(None)).collect(),
        }
    }
}

/// Validate a record. The first offending field is reported; nothing is recovered.
pub fn validate(record: &TransferPolicy) -> Result<ValidPolicy> {
    if record.kind != POLICY_KIND {
        return Err(SpendGateError::schema(
            "type",
            format!("expected {POLICY_KIND:?}, got {:?}", record.kind),
        ));
    }
    if record.version.is_empty() {
        return Err(SpendGateError::schema("version", "must not be empty"));
    }

    let decimals = parse_decimals(&record.decimal_places)?;
    let max_amount = parse_max_amount(&record.max_amount, decimals)?;
    let allowed_tokens = parse_addresses("allowedTokens", &record.allowed_tokens)?;
    let allowed_recipients = parse_addresses("allowedRecipients", &record.allowed_recipients)?;

    Ok(ValidPolicy {
        version: record.version.clone(),
        decimals,
        max_amount,
        allowed_tokens,
        allowed_recipients,
    })
}

fn parse_decimals(raw: &str) -> Result<u8> {
    const FIELD: &str = "erc20Decimals";
    if raw.starts_with('-') {
        return Err(SpendGateError::schema(FIELD, format!("must be non-negative, got {raw}")));
    }
    if raw.is_empty() || !raw.bytes().all(|c| c.is_ascii_digit()) {
        return Err(SpendGateError::schema(FIELD, format!("not an integer: {raw:?}")));
    }
    raw.parse::<u8>()
        .map_err(|_| SpendGateError::schema(FIELD, format!("must be in 0..=255, got {raw}")))
}

fn parse_max_amount(raw: &str, decimals: u8) -> Result<MaxAmount> {
    const FIELD: &str = "maxAmount";
    if raw.starts_with('-') {
        return Err(SpendGateError::schema(FIELD, format!("must be non-negative, got {raw}")));
    }

    let (whole, fraction) = match raw.split_once('.') {
        Some((w, f)) => (w, f),
        None => (raw, ""),
    };
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || (raw.contains('.') && !is_digits(fraction)) {
        return Err(SpendGateError::schema(FIELD, format!("not a decimal number: {raw:?}")));
    }
    if fraction.len() > usize::from(decimals) {
        return Err(SpendGateError::schema(
            FIELD,
            format!("{raw} has more fractional digits than decimals ({decimals})"),
        ));
    }

    Ok(MaxAmount::Human {
        whole: whole.to_string(),
        fraction: fraction.to_string(),
    })
}

fn parse_addresses(field: &str, raw: &[String]) -> Result<Vec<Address>> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            parse_address(s)
                .map_err(|e| SpendGateError::schema(format!("{field}[{i}]"), format!("{s:?}: {e}")))
        })
        .collect()
}
