//! Agent config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use spendgate_core::error::{Result, SpendGateError};

pub use schema::{AgentConfig, DeploymentsSection, SessionSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<AgentConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        SpendGateError::BadConfig(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| SpendGateError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
