//! Remote action executor seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use spendgate_core::error::Result;

use crate::resolver::Cid;
use crate::session::SessionSigs;

/// Program submitted for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Program {
    /// Inline source.
    Code(String),
    /// Immutable program hosted under a content address.
    IpfsId(Cid),
}

/// What the executor hands back. Both fields are opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub response: Value,
    #[serde(default)]
    pub logs: String,
}

/// Runs a program remotely under session credentials.
///
/// Implementations report transport and remote failures through
/// `SpendGateError::remote`; callers pass them on untouched.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(
        &self,
        sigs: &SessionSigs,
        program: &Program,
        js_params: Value,
    ) -> Result<ExecutionResult>;
}
