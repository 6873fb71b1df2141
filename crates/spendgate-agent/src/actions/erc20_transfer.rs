//! Policy-gated token transfer through the hosted `ERC20Transfer` program.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use spendgate_core::error::{Result, SpendGateError};
use spendgate_core::policy::{encode_hex, parse_address, Address, TransferPolicy};

use super::{parse_args, Action, ActionCtx};
use crate::executor::Program;
use crate::resolver::ERC20_TRANSFER_TOOL;

#[derive(Debug, Default)]
pub struct Erc20TransferAction;

impl Erc20TransferAction {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransferArgs {
    pkp_eth_address: String,
    token_address: String,
    recipient_address: String,
    amount: String,
    rpc_url: String,
    chain_id: u64,
    #[serde(default = "default_decimals")]
    decimals: u8,
}

fn default_decimals() -> u8 {
    18
}

fn checked_address(raw: &str) -> Result<Address> {
    parse_address(raw)
        .map_err(|e| SpendGateError::InvalidArgument(format!("invalid Ethereum address {raw}: {e}")))
}

/// Positive decimal amount (`digits` or `digits.digits`).
fn checked_amount(raw: &str) -> Result<&str> {
    let invalid = || {
        SpendGateError::InvalidArgument(format!("invalid amount: {raw}. Must be a positive number."))
    };
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, "0"));
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    if !digits(whole) || !digits(fraction) {
        return Err(invalid());
    }
    if whole.bytes().chain(fraction.bytes()).all(|c| c == b'0') {
        return Err(invalid());
    }
    Ok(raw)
}

#[async_trait]
impl Action for Erc20TransferAction {
    fn name(&self) -> &'static str {
        "execute-erc20-transfer"
    }

    fn description(&self) -> &'static str {
        "Execute an ERC20 token transfer using Lit Agent Wallet"
    }

    async fn invoke(&self, ctx: ActionCtx, args: Value) -> Result<String> {
        let args: TransferArgs = parse_args(self.name(), args)?;

        let pkp = checked_address(&args.pkp_eth_address)?.to_checksum(None);
        let token = checked_address(&args.token_address)?.to_checksum(None);
        let recipient = checked_address(&args.recipient_address)?.to_checksum(None);
        let amount = checked_amount(&args.amount)?;

        let policy = TransferPolicy::erc20(
            args.decimals,
            amount,
            vec![token.clone()],
            vec![recipient.clone()],
        )
        .validate()?;
        let policy_hex = encode_hex(&policy)?;

        let cid = ctx.resolver.resolve(&ctx.network, ERC20_TRANSFER_TOOL)?;
        tracing::info!(
            action = self.name(),
            network = %ctx.network,
            %cid,
            %token,
            %recipient,
            chain_id = args.chain_id,
            "executing transfer program"
        );

        let js_params = json!({
            "params": {
                "pkpEthAddress": pkp,
                "tokenIn": token,
                "recipientAddress": recipient,
                "amountIn": amount,
                "chainId": args.chain_id.to_string(),
                "rpcUrl": args.rpc_url,
                "policy": policy_hex,
            }
        });

        let result = ctx.execute(Program::IpfsId(cid), js_params).await.map_err(|e| {
            tracing::warn!(action = self.name(), error = %e, "transfer execution failed");
            e
        })?;

        serde_json::to_string(&result)
            .map_err(|e| SpendGateError::Internal(format!("serialize execution result: {e}")))
    }
}
