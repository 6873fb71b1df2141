#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use spendgate_agent::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
session:
  chain: ethereum
  expiration_minute: 10 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.network, "datil-dev");
    assert_eq!(cfg.session.chain, "ethereum");
    assert_eq!(cfg.session.expiration_minutes, 10);
    assert_eq!(cfg.session.resource_prefix, "lit-litaction");
    assert_eq!(cfg.session.ability, "lit-action-execution");
    assert!(cfg.deployments.manifest.is_none());
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn rejects_expiration_out_of_range() {
    let bad = r#"
version: 1
session:
  expiration_minutes: 0
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_malformed_override_cid() {
    let bad = r#"
version: 1
deployments:
  overrides:
    datil-dev:
      ERC20Transfer: "not-a-cid"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("datil-dev.ERC20Transfer"), "{err}");
}

#[test]
fn reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendgate.yaml");
    std::fs::write(&path, "version: 1\nnetwork: datil-test\n").unwrap();

    let cfg = config::load_from_file(&path).unwrap();
    assert_eq!(cfg.network, "datil-test");

    let err = config::load_from_file(dir.path().join("missing.yaml")).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}
