//! Command-line entry point: one prediction from `key=value` form fields.

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, anyhow, bail};
#[cfg(not(target_arch = "wasm32"))]
use vetta_client::{ClientConfig, PredictionOutcome, PredictionSession};
#[cfg(not(target_arch = "wasm32"))]
use vetta_core::{RawFields, normalize};

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: vetta [--json] field=value ...
fields: vehicle_name model machine_type machine_age total_kilometers
        Air_temperature Process_temperature Rotational_speed Torque Tool_wear";

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vetta_observability::init();

    let config = ClientConfig::from_env().context("invalid client configuration")?;

    let mut json = false;
    let mut fields = RawFields::default();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
            continue;
        }
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected field=value, got `{arg}`\n{USAGE}"))?;
        fields
            .set(key, value)
            .with_context(|| format!("cannot set `{key}`\n{USAGE}"))?;
    }

    tracing::info!(endpoint = %config.endpoint, timeout = ?config.timeout, "submitting prediction");

    let session = PredictionSession::from_config(&config);
    match session.submit(&normalize(&fields)).await {
        PredictionOutcome::Succeeded(result) => {
            let model = vetta_report::classify(&result);
            if json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                println!("{model}");
            }
            Ok(())
        }
        PredictionOutcome::Failed(err) => bail!(err.user_message()),
        other => bail!("prediction did not settle: {other:?}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
