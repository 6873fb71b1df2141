//! Agent actions.
//!
//! Each action parses its own JSON arguments and talks to the network only
//! through the collaborators carried by `ActionCtx`.

pub mod erc20_transfer;
pub mod hello;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;

use spendgate_core::error::{Result, SpendGateError};

use crate::config::SessionSection;
use crate::executor::{ActionExecutor, ExecutionResult, Program};
use crate::resolver::CidResolver;
use crate::session::{SessionAuthenticator, SessionRequest, SessionSigs, SigningKey};

pub use erc20_transfer::Erc20TransferAction;
pub use hello::HelloAction;

#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn invoke(&self, ctx: ActionCtx, args: Value) -> Result<String>;
}

/// Everything an action may use. Cheap to clone.
#[derive(Clone)]
pub struct ActionCtx {
    pub network: String,
    pub session: SessionSection,
    pub key: Arc<SigningKey>,
    pub resolver: Arc<CidResolver>,
    pub authenticator: Arc<dyn SessionAuthenticator>,
    pub executor: Arc<dyn ActionExecutor>,
}

impl ActionCtx {
    /// Fresh session credentials, expiring `session.expiration_minutes` from now.
    pub async fn session_sigs(&self) -> Result<SessionSigs> {
        let req = SessionRequest::from_config(&self.session, Utc::now());
        self.authenticator.session_sigs(&self.key, &req).await
    }

    pub async fn execute(&self, program: Program, js_params: Value) -> Result<ExecutionResult> {
        let sigs = self.session_sigs().await?;
        self.executor.execute(&sigs, &program, js_params).await
    }
}

pub(crate) fn parse_args<T: DeserializeOwned>(action: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| SpendGateError::InvalidArgument(format!("{action}: {e}")))
}
