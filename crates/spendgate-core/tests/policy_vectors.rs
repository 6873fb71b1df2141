//! Wire-format vector tests for the policy codec.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use spendgate_core::policy::{decode, encode, parse_address, Address};

use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

fn addrs(v: &serde_json::Value) -> Vec<Address> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|a| parse_address(a.as_str().unwrap()).unwrap())
        .collect()
}

#[test]
fn policy_vectors() {
    let files = [
        "policy_one_token.json",
        "policy_empty_recipients.json",
        "policy_truncated_head.json",
        "policy_length_overrun.json",
        "policy_trailing_bytes.json",
        "policy_decimals_overflow.json",
        "policy_misaligned_offset.json",
        "policy_dirty_address_padding.json",
        "policy_aliased_offset.json",
        "policy_gap_between_arrays.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let res = decode(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let policy = res.expect("expected ok policy");
        let ex = v.expect.expect("missing expect block");

        assert_eq!(policy.decimals() as u64, ex["decimals"].as_u64().unwrap(), "vector={}", v.description);
        assert_eq!(
            policy.scaled_max_amount().unwrap().to_string(),
            ex["max_amount"].as_str().unwrap(),
            "vector={}",
            v.description
        );
        assert_eq!(policy.allowed_tokens(), addrs(&ex["allowed_tokens"]).as_slice(), "vector={}", v.description);
        assert_eq!(
            policy.allowed_recipients(),
            addrs(&ex["allowed_recipients"]).as_slice(),
            "vector={}",
            v.description
        );

        // canonical bytes re-encode unchanged
        assert_eq!(encode(&policy).unwrap().as_ref(), raw.as_slice(), "vector={}", v.description);
    }
}
