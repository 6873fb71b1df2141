use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use spendgate_core::error::{Result, SpendGateError};

use crate::resolver::Cid;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default = "default_network")]
    pub network: String,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub deployments: DeploymentsSection,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SpendGateError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        if self.network.is_empty() {
            return Err(SpendGateError::BadConfig("network must not be empty".into()));
        }

        self.session.validate()?;
        self.deployments.validate()?;

        Ok(())
    }
}

/// Parameters of the session credential request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_chain")]
    pub chain: String,

    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: u32,

    #[serde(default = "default_resource")]
    pub resource: String,

    #[serde(default = "default_resource_prefix")]
    pub resource_prefix: String,

    #[serde(default = "default_ability")]
    pub ability: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            chain: default_chain(),
            expiration_minutes: default_expiration_minutes(),
            resource: default_resource(),
            resource_prefix: default_resource_prefix(),
            ability: default_ability(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1440).contains(&self.expiration_minutes) {
            return Err(SpendGateError::BadConfig(
                "session.expiration_minutes must be between 1 and 1440".into(),
            ));
        }
        for (name, v) in [
            ("chain", &self.chain),
            ("resource", &self.resource),
            ("resource_prefix", &self.resource_prefix),
            ("ability", &self.ability),
        ] {
            if v.is_empty() {
                return Err(SpendGateError::BadConfig(format!(
                    "session.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

fn default_network() -> String {
    "datil-dev".into()
}
fn default_chain() -> String {
    "ethereum".into()
}
fn default_expiration_minutes() -> u32 {
    10
}
fn default_resource() -> String {
    "*".into()
}
fn default_resource_prefix() -> String {
    "lit-litaction".into()
}
fn default_ability() -> String {
    "lit-action-execution".into()
}

/// Where program identifiers come from: overrides, then manifest, then built-ins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentsSection {
    /// JSON deployment manifest; a missing file falls back to the built-in table.
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// network -> tool -> cid
    #[serde(default)]
    pub overrides: BTreeMap<String, BTreeMap<String, String>>,
}

impl DeploymentsSection {
    pub fn validate(&self) -> Result<()> {
        for (network, tools) in &self.overrides {
            for (tool, cid) in tools {
                Cid::parse(cid).map_err(|e| {
                    SpendGateError::BadConfig(format!(
                        "deployments.overrides.{network}.{tool}: {e}"
                    ))
                })?;
            }
        }
        Ok(())
    }
}
