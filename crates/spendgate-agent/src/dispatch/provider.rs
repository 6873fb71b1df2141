use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use spendgate_core::error::{Result, SpendGateError};

use crate::actions::{Action, ActionCtx};

/// Named set of actions an agent toolkit can call.
pub struct ActionProvider {
    name: &'static str,
    actions: DashMap<&'static str, Arc<dyn Action>>,
}

impl ActionProvider {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            actions: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn register(&self, action: Arc<dyn Action>) {
        self.actions.insert(action.name(), action);
    }

    /// (name, description), sorted by name.
    pub fn describe(&self) -> Vec<(&'static str, &'static str)> {
        let mut out: Vec<_> = self
            .actions
            .iter()
            .map(|e| (*e.key(), e.value().description()))
            .collect();
        out.sort_unstable();
        out
    }

    /// Actions here are network-agnostic.
    pub fn supports_network(&self, _network: &str) -> bool {
        true
    }

    pub async fn dispatch(&self, name: &str, ctx: ActionCtx, args: Value) -> Result<String> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| SpendGateError::UnknownAction(name.to_string()))?
            .value()
            .clone();
        action.invoke(ctx, args).await
    }
}
