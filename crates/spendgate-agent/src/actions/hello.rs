use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use spendgate_core::error::Result;

use super::{parse_args, Action, ActionCtx};
use crate::executor::Program;

/// Runs an inline program that reports a magic number back.
#[derive(Debug, Default)]
pub struct HelloAction;

impl HelloAction {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HelloArgs {
    magic_number: i64,
}

/// Inline program source for a given magic number.
pub fn hello_program(magic_number: i64) -> String {
    format!(
        r#"(async () => {{
  const magicNumber = {magic_number};
  console.log("The magic number is:", magicNumber);
  Lit.Actions.setResponse({{ response: JSON.stringify({{ magicNumber }}) }});
}})();
"#
    )
}

#[async_trait]
impl Action for HelloAction {
    fn name(&self) -> &'static str {
        "execute-lit-action"
    }

    fn description(&self) -> &'static str {
        "Execute a hello Lit Action with a magic number"
    }

    async fn invoke(&self, ctx: ActionCtx, args: Value) -> Result<String> {
        let args: HelloArgs = parse_args(self.name(), args)?;
        tracing::info!(action = self.name(), magic_number = args.magic_number, "executing inline program");

        let result = ctx
            .execute(
                Program::Code(hello_program(args.magic_number)),
                json!({ "magicNumber": args.magic_number }),
            )
            .await?;

        Ok(format!(
            "Lit Action executed. Response: {}, Logs: {}",
            display_value(&result.response),
            result.logs
        ))
    }
}

fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
