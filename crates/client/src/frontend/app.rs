//! Manual-entry form and risk report view.

use leptos::*;
use vetta_core::RawFields;
use vetta_report::{Card, REPORT_HEADING, RenderModel, Verdict};

use crate::frontend::api::{self, BrowserSession};
use crate::outcome::PredictionOutcome;

/// (field id, label, placeholder)
const NUMERIC_FIELDS: [(&str, &str, &str); 7] = [
    ("machine_age", "Machine Age (Yrs)", "e.g. 5.5"),
    ("total_kilometers", "Total Kilometers", "e.g. 150000"),
    ("Air_temperature", "Air Temperature (K)", "e.g. 298.1"),
    ("Process_temperature", "Process Temp (K)", "e.g. 308.6"),
    ("Rotational_speed", "Rotational Speed (RPM)", "e.g. 1551"),
    ("Torque", "Torque (Nm)", "e.g. 42.8"),
    ("Tool_wear", "Tool Wear (min)", "e.g. 120"),
];

#[component]
pub fn App() -> impl IntoView {
    match api::build_session() {
        Ok(session) => view! { <PredictPage session=session/> }.into_view(),
        Err(e) => view! { <div class="error">{format!("Configuration error: {e}")}</div> }
            .into_view(),
    }
}

#[component]
fn PredictPage(session: BrowserSession) -> impl IntoView {
    let fields = create_rw_signal(RawFields::default());
    let outcome = create_rw_signal(PredictionOutcome::Idle);
    let is_loading = move || outcome.with(PredictionOutcome::is_loading);

    let submit = move |_| {
        if is_loading() {
            return;
        }
        api::run_prediction(session.clone(), fields, outcome);
    };

    view! {
        <section id="predict">
            <h2>"Manual Entry"</h2>
            <p>"Input real-time sensor data parameters"</p>

            <form on:submit=|ev| ev.prevent_default()>
                <Field fields=fields id="vehicle_name" label="Vehicle Name" placeholder="e.g. Truck-01" kind="text"/>
                <Field fields=fields id="model" label="Vehicle Model" placeholder="e.g. Volvo FH16" kind="text"/>

                <div class="field">
                    <label for="machine_type">"Machine Type"</label>
                    <select
                        id="machine_type"
                        prop:value=move || fields.with(|f| f.machine_type.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            fields.update(|f| f.machine_type = value);
                        }
                    >
                        <option value="L">"Type L (Low)"</option>
                        <option value="M">"Type M (Medium)"</option>
                    </select>
                </div>

                {NUMERIC_FIELDS
                    .into_iter()
                    .map(|(id, label, placeholder)| {
                        view! { <Field fields=fields id=id label=label placeholder=placeholder/> }
                    })
                    .collect_view()}

                <button type="button" on:click=submit disabled=is_loading>
                    {move || if is_loading() { "Processing..." } else { "Run Prediction" }}
                </button>

                {move || {
                    outcome
                        .with(PredictionOutcome::message)
                        .map(|msg| view! { <div class="error">{msg}</div> })
                }}
            </form>

            {move || outcome.with(PredictionOutcome::render).map(|model| view! { <Report model=model/> })}
        </section>
    }
}

#[component]
fn Field(
    fields: RwSignal<RawFields>,
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
    #[prop(default = "number")] kind: &'static str,
) -> impl IntoView {
    view! {
        <div class="field">
            <label for=id>{label}</label>
            <input
                id=id
                type=kind
                step="any"
                placeholder=placeholder
                prop:value=move || fields.with(|f| f.get(id).unwrap_or_default().to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    fields.update(|f| {
                        let _ = f.set(id, value);
                    });
                }
            />
        </div>
    }
}

#[component]
fn Report(model: RenderModel) -> impl IntoView {
    let verdict_class = match model.verdict {
        Verdict::Healthy => "verdict healthy",
        Verdict::MaintenanceRequired => "verdict failure",
    };

    view! {
        <div class="result">
            <div class=verdict_class>
                <h3>{model.title}</h3>
                <p>{model.summary}</p>
            </div>

            <div class="cards">
                {model
                    .cards
                    .iter()
                    .map(|card| {
                        let class = match card {
                            Card::OverallRisk { .. } => "card overall",
                            Card::FailureMode { .. } => "card mode",
                            Card::NoModeDetected => "card placeholder",
                        };
                        view! {
                            <div class=class>
                                <span class="card-heading">{card.heading()}</span>
                                <span class="card-value">{card.value().to_string()}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="report">
                <h4>{REPORT_HEADING}</h4>
                // Rendered as text, never as markup.
                <pre>{model.report.clone()}</pre>
            </div>
        </div>
    }
}
