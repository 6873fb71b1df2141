//! Content-address resolver: (network, tool) -> program CID.
//!
//! Lookup order is config overrides, then the deployment manifest, then the
//! built-in table in `defaults`. The table is explicit data owned by the
//! resolver; nothing is patched into global state.

pub mod cid;
pub mod defaults;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use spendgate_core::error::{Result, SpendGateError};

use crate::config::DeploymentsSection;

pub use cid::{Cid, CidError};
pub use defaults::{DEFAULT_DEPLOYMENTS, ERC20_TRANSFER_TOOL};

/// Where a resolved CID came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidSource {
    Override,
    Manifest,
    BuiltIn,
}

/// Manifest entry: `{ "<network>": { "<tool>": { "ipfsCid": "..." } } }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry {
    ipfs_cid: String,
}

type Table = BTreeMap<String, BTreeMap<String, Cid>>;

#[derive(Debug, Default)]
pub struct CidResolver {
    overrides: Table,
    manifest: Option<Table>,
    builtin: Table,
}

impl CidResolver {
    /// Built-in table only.
    pub fn builtin() -> Result<Self> {
        let mut builtin = Table::new();
        for (network, tool, cid) in DEFAULT_DEPLOYMENTS {
            let cid = Cid::parse(cid).map_err(|e| SpendGateError::Internal(e.to_string()))?;
            builtin
                .entry((*network).to_string())
                .or_default()
                .insert((*tool).to_string(), cid);
        }
        Ok(Self {
            builtin,
            ..Self::default()
        })
    }

    pub fn from_config(cfg: &DeploymentsSection) -> Result<Self> {
        let mut resolver = Self::builtin()?;

        for (network, tools) in &cfg.overrides {
            for (tool, raw) in tools {
                let cid = Cid::parse(raw).map_err(|e| {
                    SpendGateError::BadConfig(format!("deployments.overrides.{network}.{tool}: {e}"))
                })?;
                resolver
                    .overrides
                    .entry(network.clone())
                    .or_default()
                    .insert(tool.clone(), cid);
            }
        }

        if let Some(path) = &cfg.manifest {
            resolver.manifest = load_manifest(path)?;
        }

        Ok(resolver)
    }

    pub fn resolve(&self, network: &str, tool: &str) -> Result<Cid> {
        self.resolve_with_source(network, tool).map(|(cid, _)| cid)
    }

    pub fn resolve_with_source(&self, network: &str, tool: &str) -> Result<(Cid, CidSource)> {
        if let Some(cid) = lookup(&self.overrides, network, tool) {
            return Ok((cid, CidSource::Override));
        }
        if let Some(cid) = self.manifest.as_ref().and_then(|m| lookup(m, network, tool)) {
            return Ok((cid, CidSource::Manifest));
        }
        if let Some(cid) = lookup(&self.builtin, network, tool) {
            tracing::warn!(%network, %tool, %cid, "no configured deployment; using built-in placeholder");
            return Ok((cid, CidSource::BuiltIn));
        }
        Err(SpendGateError::BadConfig(format!(
            "no deployment of tool {tool} for network {network}"
        )))
    }

    /// Tool names known for a network, across all sources.
    pub fn tool_names(&self, network: &str) -> Vec<String> {
        let mut names = BTreeSet::new();
        for table in [Some(&self.overrides), self.manifest.as_ref(), Some(&self.builtin)]
            .into_iter()
            .flatten()
        {
            if let Some(tools) = table.get(network) {
                names.extend(tools.keys().cloned());
            }
        }
        names.into_iter().collect()
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }
}

fn lookup(table: &Table, network: &str, tool: &str) -> Option<Cid> {
    table.get(network).and_then(|t| t.get(tool)).cloned()
}

fn load_manifest(path: &Path) -> Result<Option<Table>> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "deployment manifest not found; using built-in table");
            return Ok(None);
        }
        Err(e) => {
            return Err(SpendGateError::BadConfig(format!(
                "read manifest {} failed: {e}",
                path.display()
            )))
        }
    };

    let parsed: BTreeMap<String, BTreeMap<String, ManifestEntry>> = serde_json::from_str(&raw)
        .map_err(|e| SpendGateError::BadConfig(format!("invalid manifest {}: {e}", path.display())))?;

    let mut table = Table::new();
    for (network, tools) in parsed {
        for (tool, entry) in tools {
            let cid = Cid::parse(&entry.ipfs_cid).map_err(|e| {
                SpendGateError::BadConfig(format!("manifest {network}.{tool}: {e}"))
            })?;
            table.entry(network.clone()).or_default().insert(tool, cid);
        }
    }
    Ok(Some(table))
}
