use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use reqwest::Url;
use serde_json::{Value, json};

use vetta_client::error::{GENERIC_MESSAGE, TIMEOUT_MESSAGE};
use vetta_client::{ClientConfig, PredictionError, PredictionOutcome, PredictionSession};
use vetta_core::{RawFields, normalize};
use vetta_report::Verdict;

struct TestServer {
    endpoint: Url,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let endpoint = Url::parse(&format!("http://{}/predict", addr)).unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { endpoint, handle }
    }

    /// Replies to every `POST /predict` with the given status and body.
    async fn replying(status: StatusCode, body: &'static str) -> Self {
        let app = axum::Router::new().route(
            "/predict",
            post(move || async move {
                (status, [("content-type", "application/json")], body)
            }),
        );
        Self::spawn(app).await
    }

    fn session(&self, timeout: Duration) -> PredictionSession<vetta_client::HttpTransport> {
        PredictionSession::from_config(&ClientConfig::new(self.endpoint.clone(), timeout))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn filled_fields() -> RawFields {
    let mut raw = RawFields::default();
    for (id, value) in [
        ("vehicle_name", "Truck-01"),
        ("model", ""),
        ("machine_type", "L"),
        ("machine_age", "5.5"),
        ("total_kilometers", "150000"),
        ("Air_temperature", "298.1"),
        ("Process_temperature", "308.6"),
        ("Rotational_speed", "1551"),
        ("Torque", "42.8"),
        ("Tool_wear", "abc"),
    ] {
        raw.set(id, value).unwrap();
    }
    raw
}

#[tokio::test]
async fn posts_normalized_payload_and_renders_result() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let app = axum::Router::new()
        .route(
            "/predict",
            post(
                |State(seen): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                    *seen.lock().unwrap() = Some(body);
                    Json(json!({
                        "prediction": {
                            "failure": 1,
                            "failure_probability": 0.87,
                            "failure_types": { "TWF": 0.6, "HDF": 0.3 }
                        },
                        "report": "# Report\nReplace the cutting tool."
                    }))
                },
            ),
        )
        .with_state(seen.clone());
    let srv = TestServer::spawn(app).await;
    let session = srv.session(Duration::from_secs(5));

    let outcome = session.submit(&normalize(&filled_fields())).await;

    let body = seen.lock().unwrap().clone().expect("server saw no request");
    assert_eq!(body["vehicle_name"], "Truck-01");
    assert_eq!(body["model"], "Unknown");
    assert_eq!(body["machine_age"], 5.5);
    assert_eq!(body["Tool_wear"], 0.0);
    assert_eq!(body["Type_L"], true);
    assert_eq!(body["Type_M"], false);

    let model = outcome.render().expect("expected a successful outcome");
    assert_eq!(model.verdict, Verdict::MaintenanceRequired);
    assert_eq!(model.cards[0].value(), "87.0%");
    assert_eq!(model.mode_cards().count(), 2);
    assert_eq!(model.report, "# Report\nReplace the cutting tool.");
    assert_eq!(session.outcome(), outcome);
}

#[tokio::test]
async fn healthy_response_renders_single_card() {
    let srv = TestServer::replying(
        StatusCode::OK,
        r#"{"prediction":{"failure":0,"failure_probability":0.02},"report":"ok"}"#,
    )
    .await;
    let session = srv.session(Duration::from_secs(5));

    let model = session
        .submit(&normalize(&RawFields::default()))
        .await
        .render()
        .unwrap();
    assert_eq!(model.verdict, Verdict::Healthy);
    assert_eq!(model.cards.len(), 1);
    assert_eq!(model.cards[0].value(), "2.0%");
}

#[tokio::test]
async fn non_success_status_is_a_service_failure() {
    let srv = TestServer::replying(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"prediction":{"failure":0},"report":"ignored"}"#,
    )
    .await;
    let session = srv.session(Duration::from_secs(5));

    let outcome = session.submit(&normalize(&RawFields::default())).await;
    assert_eq!(
        outcome,
        PredictionOutcome::Failed(PredictionError::Service { status: 500 })
    );
    assert_eq!(outcome.message(), Some(GENERIC_MESSAGE));
}

#[tokio::test]
async fn malformed_body_is_a_parse_failure() {
    for body in [r#"{"unexpected":true}"#, "not json", r#"{"prediction":{"failure":7}}"#] {
        let srv = TestServer::replying(StatusCode::OK, body).await;
        let session = srv.session(Duration::from_secs(5));

        let outcome = session.submit(&normalize(&RawFields::default())).await;
        assert!(
            matches!(outcome.error(), Some(PredictionError::Parse(_))),
            "body {body:?} gave {outcome:?}"
        );
        assert_eq!(outcome.message(), Some(GENERIC_MESSAGE));
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{}/predict", addr)).unwrap();
    let session =
        PredictionSession::from_config(&ClientConfig::new(endpoint, Duration::from_secs(5)));

    let outcome = session.submit(&normalize(&RawFields::default())).await;
    assert!(matches!(outcome.error(), Some(PredictionError::Transport(_))));
    assert_eq!(outcome.message(), Some(GENERIC_MESSAGE));
}

#[tokio::test]
async fn slow_service_times_out() {
    let app = axum::Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StatusCode::OK
        }),
    );
    let srv = TestServer::spawn(app).await;
    let session = srv.session(Duration::from_millis(100));

    let outcome = session.submit(&normalize(&RawFields::default())).await;
    assert_eq!(
        outcome,
        PredictionOutcome::Failed(PredictionError::Timeout(Duration::from_millis(100)))
    );
    assert_eq!(outcome.message(), Some(TIMEOUT_MESSAGE));
}
