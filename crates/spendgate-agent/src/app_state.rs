//! Shared application state for the spendgate agent.
//!
//! Wires config, resolver, collaborators, and the built-in actions. Startup
//! errors are returned, not panicked on.

use std::sync::Arc;

use serde_json::Value;

use spendgate_core::error::Result;

use crate::actions::{ActionCtx, Erc20TransferAction, HelloAction};
use crate::config::AgentConfig;
use crate::dispatch::ActionProvider;
use crate::dryrun::{DryRunAuthenticator, DryRunExecutor};
use crate::executor::ActionExecutor;
use crate::resolver::{CidResolver, ERC20_TRANSFER_TOOL};
use crate::session::{SessionAuthenticator, SigningKey};

pub const PROVIDER_NAME: &str = "lit-agent-wallet-provider";

/// Provider with every built-in action registered.
pub fn builtin_provider() -> ActionProvider {
    let provider = ActionProvider::new(PROVIDER_NAME);
    provider.register(Arc::new(HelloAction::new()));
    provider.register(Arc::new(Erc20TransferAction::new()));
    provider
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AgentConfig,
    resolver: Arc<CidResolver>,
    key: Arc<SigningKey>,
    authenticator: Arc<dyn SessionAuthenticator>,
    executor: Arc<dyn ActionExecutor>,
    provider: ActionProvider,
}

impl AppState {
    pub fn new(
        cfg: AgentConfig,
        key: SigningKey,
        authenticator: Arc<dyn SessionAuthenticator>,
        executor: Arc<dyn ActionExecutor>,
    ) -> Result<Self> {
        let resolver = CidResolver::from_config(&cfg.deployments)?;

        // The transfer action cannot run without a program for this network.
        if resolver.resolve(&cfg.network, ERC20_TRANSFER_TOOL).is_err() {
            tracing::warn!(
                network = %cfg.network,
                tool = ERC20_TRANSFER_TOOL,
                "no deployment for configured network; transfer action will fail"
            );
        }

        let provider = builtin_provider();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                resolver: Arc::new(resolver),
                key: Arc::new(key),
                authenticator,
                executor,
                provider,
            }),
        })
    }

    /// State backed by the local dry-run collaborators.
    pub fn dry_run(cfg: AgentConfig, key: SigningKey) -> Result<Self> {
        Self::new(
            cfg,
            key,
            Arc::new(DryRunAuthenticator),
            Arc::new(DryRunExecutor),
        )
    }

    pub fn resolver(&self) -> Arc<CidResolver> {
        Arc::clone(&self.inner.resolver)
    }

    pub fn provider(&self) -> &ActionProvider {
        &self.inner.provider
    }

    pub fn ctx(&self) -> ActionCtx {
        ActionCtx {
            network: self.inner.cfg.network.clone(),
            session: self.inner.cfg.session.clone(),
            key: Arc::clone(&self.inner.key),
            resolver: self.resolver(),
            authenticator: Arc::clone(&self.inner.authenticator),
            executor: Arc::clone(&self.inner.executor),
        }
    }

    pub async fn run(&self, action: &str, args: Value) -> Result<String> {
        tracing::debug!(provider = self.inner.provider.name(), %action, "dispatching action");
        self.inner.provider.dispatch(action, self.ctx(), args).await
    }
}
