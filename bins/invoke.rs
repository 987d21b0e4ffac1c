//! One-shot serverless invocation: read a function event (JSON) from the file
//! given as the first argument, or from stdin, run it against a freshly seeded
//! store and print the function response as JSON on stdout.
//!
//! Every run is a cold start, so mutations never outlive the invocation.

use std::io::Read;

use anyhow::Context;
use service::function::{self, FunctionEvent};
use service::{MemoryStore, ResourceHandler};
use tracing::{error, info};

fn read_event() -> anyhow::Result<FunctionEvent> {
    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("cannot read event file {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("cannot read event from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("event is not a valid function event")
}

async fn invoke_once() -> anyhow::Result<String> {
    let event = read_event()?;
    let handler = ResourceHandler::new(MemoryStore::seeded()?);
    info!(service = "invoke", event = "cold_start", method = %event.http_method, path = %event.path, "invoking handler");
    let resp = function::invoke(&handler, event).await;
    Ok(serde_json::to_string_pretty(&resp)?)
}

fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    // stdout 只输出响应，日志写到 stderr
    common::utils::logging::init_logging_stderr();

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "invoke", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(invoke_once()) {
        Ok(out) => {
            println!("{out}");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "invoke", event = "invoke_failed", error = %format!("{e:#}"), "invocation failed");
            std::process::ExitCode::FAILURE
        }
    }
}
