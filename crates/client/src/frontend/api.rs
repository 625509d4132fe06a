//! Glue between the Leptos signals and the prediction session.

use std::rc::Rc;

use leptos::*;
use vetta_core::{RawFields, normalize};

use crate::config::{ClientConfig, ConfigError, ENDPOINT_VAR, TIMEOUT_VAR};
use crate::outcome::PredictionOutcome;
use crate::session::PredictionSession;
use crate::transport::HttpTransport;

pub type BrowserSession = Rc<PredictionSession<HttpTransport>>;

/// The browser has no process environment; overrides are baked in at build time.
pub fn build_session() -> Result<BrowserSession, ConfigError> {
    let config = ClientConfig::from_lookup(|key| match key {
        ENDPOINT_VAR => option_env!("VETTA_ENDPOINT").map(str::to_string),
        TIMEOUT_VAR => option_env!("VETTA_TIMEOUT_SECS").map(str::to_string),
        _ => None,
    })?;
    Ok(Rc::new(PredictionSession::from_config(&config)))
}

/// Submit the current form. `outcome` shows `Loading` right away and is then
/// refreshed from the session, which ignores superseded replies.
pub fn run_prediction(
    session: BrowserSession,
    fields: RwSignal<RawFields>,
    outcome: RwSignal<PredictionOutcome>,
) {
    let request = fields.with_untracked(normalize);
    let ticket = session.begin();
    outcome.set(session.outcome());

    spawn_local(async move {
        session.complete(&ticket, &request).await;
        outcome.set(session.outcome());
    });
}
