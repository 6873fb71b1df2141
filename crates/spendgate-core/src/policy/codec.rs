//! ABI-style tuple codec for `(uint8, uint256, address[], address[])`.
//!
//! Layout (32-byte words, standard head/tail encoding of a flat parameter list):
//! ```text
//! word 0   decimals          uint8, left-padded
//! word 1   maxAmount         uint256 big-endian, smallest units
//! word 2   tokens offset     byte offset from start of input
//! word 3   recipients offset
//! tail     for each array: length word, then one left-padded address per word
//! ```
//!
//! Parsing rules:
//! - Never index raw input; use `get(..)`, `Buf` and `remaining()` checks.
//! - Padding bytes must be zero; trailing bytes after the last array are rejected.
//! - Only the canonical layout is accepted: tokens start right after the head,
//!   recipients right after tokens. Aliased or gapped offsets are rejected.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use alloy_primitives::{Address, U256};

use super::address::ADDRESS_LEN;
use super::record::ValidPolicy;
use crate::error::{Result, SpendGateError};

const WORD: usize = 32;
const HEAD_LEN: usize = 4 * WORD;

/// Encode a validated policy. Same policy, same bytes.
pub fn encode(policy: &ValidPolicy) -> Result<Bytes> {
    let max_amount = policy.scaled_max_amount()?;
    let tokens = policy.allowed_tokens();
    let recipients = policy.allowed_recipients();

    let tokens_off = HEAD_LEN;
    let recipients_off = tokens_off + array_len(tokens.len());
    let total = recipients_off + array_len(recipients.len());

    let mut buf = BytesMut::with_capacity(total);
    put_u64_word(&mut buf, u64::from(policy.decimals()));
    buf.put_slice(&max_amount.to_be_bytes::<WORD>());
    put_u64_word(&mut buf, tokens_off as u64);
    put_u64_word(&mut buf, recipients_off as u64);
    put_address_array(&mut buf, tokens);
    put_address_array(&mut buf, recipients);

    debug_assert_eq!(buf.len(), total);
    Ok(buf.freeze())
}

/// `0x`-prefixed hex of `encode`.
pub fn encode_hex(policy: &ValidPolicy) -> Result<String> {
    Ok(format!("0x{}", hex::encode(encode(policy)?)))
}

/// Decode wire bytes into a policy carrying the already-scaled amount.
///
/// `kind` and `version` are not on the wire; the result reports the
/// canonical values.
pub fn decode(input: &[u8]) -> Result<ValidPolicy> {
    let mut head = input.get(..HEAD_LEN).ok_or_else(|| {
        SpendGateError::Decoding(format!(
            "input is {} bytes, tuple head needs {HEAD_LEN}",
            input.len()
        ))
    })?;

    let decimals = read_u64_word(&mut head, "decimals")?;
    let decimals = u8::try_from(decimals)
        .map_err(|_| SpendGateError::Decoding(format!("decimals {decimals} exceeds uint8")))?;
    let max_amount = U256::from_be_bytes::<WORD>(read_word(&mut head, "maxAmount")?);
    let tokens_off = read_offset(&mut head, input.len(), "allowedTokens")?;
    let recipients_off = read_offset(&mut head, input.len(), "allowedRecipients")?;

    if tokens_off != HEAD_LEN {
        return Err(SpendGateError::Decoding(format!(
            "allowedTokens offset {tokens_off}, expected {HEAD_LEN}"
        )));
    }
    let (tokens, tokens_end) = read_address_array(input, tokens_off, "allowedTokens")?;

    if recipients_off != tokens_end {
        return Err(SpendGateError::Decoding(format!(
            "allowedRecipients offset {recipients_off}, expected {tokens_end}"
        )));
    }
    let (recipients, end) = read_address_array(input, recipients_off, "allowedRecipients")?;

    if end != input.len() {
        return Err(SpendGateError::Decoding(format!(
            "{} trailing bytes after last array",
            input.len() - end
        )));
    }

    Ok(ValidPolicy::from_wire(decimals, max_amount, tokens, recipients))
}

/// Decode from hex, with or without the `0x` prefix.
pub fn decode_hex(s: &str) -> Result<ValidPolicy> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let raw = hex::decode(digits).map_err(|e| SpendGateError::Decoding(format!("invalid hex: {e}")))?;
    decode(&raw)
}

fn array_len(n: usize) -> usize {
    WORD * (1 + n)
}

fn put_u64_word(buf: &mut BytesMut, v: u64) {
    buf.put_bytes(0, WORD - 8);
    buf.put_u64(v);
}

fn put_address_array(buf: &mut BytesMut, addrs: &[Address]) {
    put_u64_word(buf, addrs.len() as u64);
    for a in addrs {
        buf.put_bytes(0, WORD - ADDRESS_LEN);
        buf.put_slice(a.as_slice());
    }
}

fn read_word(buf: &mut &[u8], what: &str) -> Result<[u8; WORD]> {
    if buf.remaining() < WORD {
        return Err(SpendGateError::Decoding(format!("truncated {what} word")));
    }
    let mut w = [0u8; WORD];
    buf.copy_to_slice(&mut w);
    Ok(w)
}

/// A word whose value must fit in 64 bits (small ints, offsets, lengths).
fn read_u64_word(buf: &mut &[u8], what: &str) -> Result<u64> {
    let w = read_word(buf, what)?;
    let mut padded = &w[..];
    if padded[..WORD - 8].iter().any(|&b| b != 0) {
        return Err(SpendGateError::Decoding(format!("{what} word has non-zero high bytes")));
    }
    padded.advance(WORD - 8);
    Ok(padded.get_u64())
}

fn read_offset(buf: &mut &[u8], input_len: usize, what: &str) -> Result<usize> {
    let off = read_u64_word(buf, what)?;
    let off = usize::try_from(off)
        .map_err(|_| SpendGateError::Decoding(format!("{what} offset {off} out of range")))?;
    if off < HEAD_LEN || off % WORD != 0 || off >= input_len {
        return Err(SpendGateError::Decoding(format!(
            "{what} offset {off} invalid for {input_len}-byte input"
        )));
    }
    Ok(off)
}

fn read_address_array(input: &[u8], off: usize, what: &str) -> Result<(Vec<Address>, usize)> {
    let mut cur = input
        .get(off..)
        .ok_or_else(|| SpendGateError::Decoding(format!("{what} offset {off} out of range")))?;

    let len = read_u64_word(&mut cur, what)?;
    let needed = usize::try_from(len)
        .ok()
        .and_then(|n| n.checked_mul(WORD))
        .filter(|&n| n <= cur.remaining())
        .ok_or_else(|| {
            SpendGateError::Decoding(format!(
                "{what} length prefix {len} overruns input ({} bytes left)",
                cur.remaining()
            ))
        })?;

    let mut out = Vec::with_capacity(needed / WORD);
    for i in 0..needed / WORD {
        let w = read_word(&mut cur, what)?;
        if w[..WORD - ADDRESS_LEN].iter().any(|&b| b != 0) {
            return Err(SpendGateError::Decoding(format!(
                "{what}[{i}] has non-zero padding"
            )));
        }
        out.push(Address::from_slice(&w[WORD - ADDRESS_LEN..]));
    }

    Ok((out, off + WORD + needed))
}
