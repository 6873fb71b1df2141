#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use spendgate_core::policy::{parse_address, AddressError};

// EIP-55 reference addresses.
const CHECKSUMMED: [&str; 4] = [
    "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
    "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
    "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
];

#[test]
fn checksum_matches_reference() {
    for s in CHECKSUMMED {
        let lower = parse_address(&s.to_lowercase()).unwrap();
        assert_eq!(lower.to_checksum(None), s);
        assert_eq!(parse_address(s).unwrap(), lower);
    }
}

#[test]
fn uniform_case_skips_checksum() {
    let upper = format!("0x{}", &CHECKSUMMED[0][2..].to_uppercase());
    let lower = CHECKSUMMED[0].to_lowercase();
    assert_eq!(parse_address(&upper).unwrap(), parse_address(&lower).unwrap());
}

#[test]
fn reports_reason() {
    assert_eq!(parse_address("aaaa"), Err(AddressError::MissingPrefix));
    assert_eq!(parse_address("0xaaaa"), Err(AddressError::BadLength(4)));
    assert_eq!(
        parse_address("0xgggggggggggggggggggggggggggggggggggggggg"),
        Err(AddressError::NotHex)
    );
    assert_eq!(
        parse_address("0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
        Err(AddressError::BadChecksum)
    );
}
