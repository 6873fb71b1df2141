//! Built-in deployment table, used when no manifest entry exists.
//!
//! These identifiers are placeholders for local and dry-run use. Real
//! deployments are supplied through a manifest or `deployments.overrides`.

/// Tool name of the policy-gated token transfer program.
pub const ERC20_TRANSFER_TOOL: &str = "ERC20Transfer";

/// (network, tool, cid)
pub const DEFAULT_DEPLOYMENTS: &[(&str, &str, &str)] = &[
    ("datil-dev", ERC20_TRANSFER_TOOL, "QmfFihjgjQt7Rn3e8bNcT57hqAGHEGEePetzGc2rHFJxJ5"),
    ("datil-test", ERC20_TRANSFER_TOOL, "QmcSPcRhd1ywozhePREsFaZZXcPPRJgd43ZDKDRiyoKt1W"),
    ("datil", ERC20_TRANSFER_TOOL, "QmTNCL5uaqeemX7zjrVFtibs1ngjVv2y9Nke87DyLEWDpL"),
];
