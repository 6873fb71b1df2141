//! Local stand-ins for the remote network.
//!
//! They log what would be sent and answer deterministically, so the CLI and
//! tests can exercise the whole action path without a network connection.

use async_trait::async_trait;
use serde_json::{json, Value};

use spendgate_core::error::Result;

use crate::executor::{ActionExecutor, ExecutionResult, Program};
use crate::session::{SessionAuthenticator, SessionRequest, SessionSigs, SigningKey};

#[derive(Debug, Default)]
pub struct DryRunAuthenticator;

#[async_trait]
impl SessionAuthenticator for DryRunAuthenticator {
    async fn session_sigs(&self, _key: &SigningKey, req: &SessionRequest) -> Result<SessionSigs> {
        tracing::info!(chain = %req.chain, expiration = %req.expiration, "dry-run session request");
        Ok(SessionSigs(json!({
            "dryRun": true,
            "chain": req.chain,
            "expiration": req.expiration,
        })))
    }
}

/// Echoes the submitted program and parameters as the response.
#[derive(Debug, Default)]
pub struct DryRunExecutor;

#[async_trait]
impl ActionExecutor for DryRunExecutor {
    async fn execute(
        &self,
        _sigs: &SessionSigs,
        program: &Program,
        js_params: Value,
    ) -> Result<ExecutionResult> {
        let program = match program {
            Program::Code(code) => json!({ "codeBytes": code.len() }),
            Program::IpfsId(cid) => json!({ "ipfsId": cid }),
        };
        tracing::info!(%program, "dry-run execute");
        Ok(ExecutionResult {
            response: json!({ "dryRun": true, "program": program, "jsParams": js_params }),
            logs: String::new(),
        })
    }
}
