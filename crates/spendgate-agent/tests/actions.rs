#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use spendgate_agent::app_state::AppState;
use spendgate_agent::config;
use spendgate_agent::dryrun::DryRunAuthenticator;
use spendgate_agent::executor::{ActionExecutor, ExecutionResult, Program};
use spendgate_agent::session::{SessionRequest, SessionSigs, SigningKey};
use spendgate_core::error::{Result, SpendGateError};
use spendgate_core::policy::{decode_hex, U256};

const PKP: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
const TOKEN: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
const RECIPIENT: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";

#[derive(Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<(Program, Value)>>,
}

#[async_trait]
impl ActionExecutor for RecordingExecutor {
    async fn execute(&self, _sigs: &SessionSigs, program: &Program, js_params: Value) -> Result<ExecutionResult> {
        self.calls.lock().unwrap().push((program.clone(), js_params));
        Ok(ExecutionResult {
            response: json!("{\"magicNumber\":42}"),
            logs: "The magic number is: 42\n".into(),
        })
    }
}

struct FailingExecutor;

#[async_trait]
impl ActionExecutor for FailingExecutor {
    async fn execute(&self, _: &SessionSigs, _: &Program, _: Value) -> Result<ExecutionResult> {
        Err(SpendGateError::remote(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "node unreachable",
        )))
    }
}

fn key() -> SigningKey {
    SigningKey::parse(&format!("0x{}", "11".repeat(32))).unwrap()
}

fn state_with(executor: Arc<dyn ActionExecutor>) -> AppState {
    let cfg = config::load_from_str("version: 1").unwrap();
    AppState::new(cfg, key(), Arc::new(DryRunAuthenticator), executor).unwrap()
}

fn transfer_args(amount: &str) -> Value {
    json!({
        "pkp_eth_address": PKP.to_lowercase(),
        "token_address": TOKEN,
        "recipient_address": RECIPIENT,
        "amount": amount,
        "rpc_url": "https://sepolia.base.org",
        "chain_id": 84532,
        "decimals": 6
    })
}

#[tokio::test]
async fn hello_action_formats_response_and_logs() {
    let exec = Arc::new(RecordingExecutor::default());
    let state = state_with(exec.clone());

    let out = state
        .run("execute-lit-action", json!({ "magic_number": 42 }))
        .await
        .unwrap();
    assert_eq!(
        out,
        "Lit Action executed. Response: {\"magicNumber\":42}, Logs: The magic number is: 42\n"
    );

    let calls = exec.calls.lock().unwrap();
    let (program, params) = &calls[0];
    match program {
        Program::Code(code) => assert!(code.contains("const magicNumber = 42;")),
        other => panic!("expected inline code, got {other:?}"),
    }
    assert_eq!(params, &json!({ "magicNumber": 42 }));
}

#[tokio::test]
async fn transfer_submits_encoded_policy_to_resolved_program() {
    let exec = Arc::new(RecordingExecutor::default());
    let state = state_with(exec.clone());

    state
        .run("execute-erc20-transfer", transfer_args("2.5"))
        .await
        .unwrap();

    let calls = exec.calls.lock().unwrap();
    let (program, params) = &calls[0];
    let expected_cid = state.resolver().resolve("datil-dev", "ERC20Transfer").unwrap();
    assert_eq!(program, &Program::IpfsId(expected_cid));

    let p = &params["params"];
    assert_eq!(p["pkpEthAddress"], PKP);
    assert_eq!(p["tokenIn"], TOKEN);
    assert_eq!(p["recipientAddress"], RECIPIENT);
    assert_eq!(p["amountIn"], "2.5");
    assert_eq!(p["chainId"], "84532");
    assert_eq!(p["rpcUrl"], "https://sepolia.base.org");

    let policy = decode_hex(p["policy"].as_str().unwrap()).unwrap();
    assert_eq!(policy.decimals(), 6);
    assert_eq!(policy.scaled_max_amount().unwrap(), U256::from(2_500_000u64));
    assert_eq!(policy.allowed_tokens()[0].to_checksum(None), TOKEN);
    assert_eq!(policy.allowed_recipients()[0].to_checksum(None), RECIPIENT);
}

#[tokio::test]
async fn transfer_rejects_bad_input_before_submitting() {
    let exec = Arc::new(RecordingExecutor::default());
    let state = state_with(exec.clone());

    for amount in ["0", "-1", "abc", "0.000"] {
        let err = state
            .run("execute-erc20-transfer", transfer_args(amount))
            .await
            .expect_err("must fail");
        assert_eq!(err.code().as_str(), "INVALID_ARGUMENT", "amount={amount}");
    }

    let mut args = transfer_args("1");
    args["token_address"] = json!("0x1234");
    let err = state.run("execute-erc20-transfer", args).await.expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_ARGUMENT");

    // more fractional digits than the token supports
    let err = state
        .run("execute-erc20-transfer", transfer_args("1.0000001"))
        .await
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "SCHEMA_VIOLATION");

    assert!(exec.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn executor_failure_surfaces_unmodified() {
    let state = state_with(Arc::new(FailingExecutor));
    let err = state
        .run("execute-erc20-transfer", transfer_args("1"))
        .await
        .expect_err("must fail");

    assert_eq!(err.code().as_str(), "REMOTE");
    assert_eq!(err.to_string(), "node unreachable");
}

#[tokio::test]
async fn unknown_action_and_bad_args() {
    let state = state_with(Arc::new(RecordingExecutor::default()));

    let err = state.run("execute-swap", json!({})).await.expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNKNOWN_ACTION");

    let err = state
        .run("execute-lit-action", json!({ "magic": 1 }))
        .await
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_ARGUMENT");
}

#[tokio::test]
async fn dry_run_echoes_program_and_params() {
    let cfg = config::load_from_str("version: 1").unwrap();
    let state = AppState::dry_run(cfg, key()).unwrap();

    let out = state
        .run("execute-erc20-transfer", transfer_args("1"))
        .await
        .unwrap();
    let result: ExecutionResult = serde_json::from_str(&out).unwrap();
    assert_eq!(result.response["dryRun"], true);
    assert!(result.response["program"]["ipfsId"].as_str().unwrap().starts_with("Qm"));
    assert!(result.response["jsParams"]["params"]["policy"].as_str().unwrap().starts_with("0x"));
}

#[test]
fn session_request_follows_config() {
    let cfg = config::load_from_str("version: 1\nsession:\n  expiration_minutes: 15\n").unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 31, 23, 50, 0).unwrap();
    let req = SessionRequest::from_config(&cfg.session, now);

    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({
            "chain": "ethereum",
            "expiration": "2024-02-01T00:05:00Z",
            "resourceAbilityRequests": [{
                "resource": { "resource": "*", "resourcePrefix": "lit-litaction" },
                "ability": "lit-action-execution"
            }]
        })
    );
}

#[test]
fn signing_key_is_never_printed() {
    let k = key();
    assert_eq!(format!("{k:?}"), "SigningKey(<redacted>)");
    assert!(SigningKey::parse("0x1234").is_err());
    assert_eq!(k.expose_hex().len(), 66);
}

#[test]
fn provider_lists_builtin_actions() {
    let state = state_with(Arc::new(RecordingExecutor::default()));
    let names: Vec<_> = state.provider().describe().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["execute-erc20-transfer", "execute-lit-action"]);
    assert!(state.provider().supports_network("base-sepolia"));
}
