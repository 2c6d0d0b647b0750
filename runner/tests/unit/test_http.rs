//! Full runs against a local controller stub

mod common;

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use common::no_shutdown;
use template_runner::app::options::RunOptions;
use template_runner::app::run::{run, InputSource, Job, RunOutcome, Target, INPUT_DATA_KEY};
use template_runner::authn::credentials::CredentialSource;
use template_runner::deploy::poller;
use template_runner::deploy::state::DeploymentState;
use template_runner::errors::RunnerError;
use template_runner::http::client::ClientOptions;

const TOKEN: &str = "tok-123";

// admin:secret
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

#[derive(Clone, Default)]
struct Stub {
    status_checks: Arc<AtomicUsize>,
    deploys: Arc<Mutex<Vec<Value>>>,

    /// Replace the normal answer of an endpoint
    template_lookup_status: Option<StatusCode>,
    device_lookup_status: Option<StatusCode>,
    preview_status: Option<StatusCode>,
    preview_body: Option<Value>,
    deploy_status: Option<StatusCode>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("x-auth-token").and_then(|v| v.to_str().ok()) == Some(TOKEN)
}

async fn token(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(BASIC_AUTH) => (StatusCode::OK, Json(json!({ "Token": TOKEN }))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Authentication has failed" })),
        ),
    }
}

async fn templates(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if let Some(code) = stub.template_lookup_status {
        return (code, Json(json!({ "response": [] })));
    }
    let found = query.get("name").map(String::as_str) == Some("banner")
        && query.get("projectName").map(String::as_str) == Some("Onboarding")
        && query.get("unCommitted").map(String::as_str) == Some("true");
    let response = if found {
        json!([{
            "id": "tmpl-1",
            "name": "banner",
            "projectName": "Onboarding",
            "templateParams": [
                { "parameterName": "__deviceName", "binding": "" },
                { "parameterName": "vlan", "binding": "" }
            ]
        }])
    } else {
        json!([])
    };
    (StatusCode::OK, Json(json!({ "response": response })))
}

async fn devices(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if let Some(code) = stub.device_lookup_status {
        return (code, Json(json!({ "error": "device service unavailable" })));
    }
    let response = match query.get("hostname").map(String::as_str) {
        Some("edge-1") => json!([{ "id": "dev-1", "hostname": "edge-1" }]),
        _ => json!([]),
    };
    (StatusCode::OK, Json(json!({ "response": response })))
}

async fn preview(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    let rendered = format!("hostname {}", body["deviceId"].as_str().unwrap_or("?"));
    let body = stub
        .preview_body
        .clone()
        .unwrap_or_else(|| json!({ "cliPreview": rendered }));
    (stub.preview_status.unwrap_or(StatusCode::OK), Json(body))
}

async fn deploy(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    stub.deploys.lock().unwrap().push(body);
    (
        stub.deploy_status.unwrap_or(StatusCode::ACCEPTED),
        Json(json!({ "deploymentId": "Template Deployemnt Id: dep-42" })),
    )
}

async fn deploy_status(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) || id != "dep-42" {
        return (StatusCode::NOT_FOUND, Json(json!({})));
    }
    let status = match stub.status_checks.fetch_add(1, Ordering::SeqCst) {
        0 => "IN_PROGRESS",
        _ => "SUCCESS",
    };
    (
        StatusCode::ACCEPTED,
        Json(json!({ "deploymentId": id, "status": status, "devices": [{ "deviceId": "dev-1" }] })),
    )
}

async fn start_stub() -> (String, Stub) {
    start_stub_with(Stub::default()).await
}

async fn start_stub_with(stub: Stub) -> (String, Stub) {
    let app = Router::new()
        .route("/api/system/v1/auth/token", post(token))
        .route("/dna/intent/api/v2/template-programmer/template", get(templates))
        .route("/dna/intent/api/v1/network-device", get(devices))
        .route(
            "/dna/intent/api/v1/template-programmer/template/preview",
            put(preview),
        )
        .route(
            "/dna/intent/api/v1/template-programmer/template/deploy",
            post(deploy),
        )
        .route(
            "/dna/intent/api/v1/template-programmer/template/deploy/status/{id}",
            get(deploy_status),
        )
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr.to_string(), stub)
}

fn options(server: &str) -> RunOptions {
    RunOptions {
        client: ClientOptions {
            server: server.to_string(),
            scheme: "http".to_string(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
        poller: poller::Options {
            interval: Duration::from_millis(10),
            max_attempts: Some(5),
        },
        ..Default::default()
    }
}

fn credentials(password: &str) -> CredentialSource {
    CredentialSource {
        username: "admin".to_string(),
        password: Some(SecretString::from(password.to_string())),
    }
}

fn job(template: &str, input: InputSource, preview: bool) -> Job {
    Job {
        target: Target::ByName {
            project: "Onboarding".to_string(),
            template: template.to_string(),
            device: "edge-1".to_string(),
        },
        input,
        params_key: INPUT_DATA_KEY,
        preview,
    }
}

#[tokio::test]
async fn test_full_deployment_from_csv() {
    let (server, stub) = start_stub().await;
    let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv, "vlan,additional_config\n10,description users\\nno shutdown").unwrap();

    let job = job("banner", InputSource::File(csv.path().to_path_buf()), false);
    let outcome = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap();

    let RunOutcome::Deployed(status) = &outcome else {
        panic!("expected a deployment, got {:?}", outcome);
    };
    assert_eq!(status.deployment_id, "dep-42");
    assert_eq!(status.state, DeploymentState::Success);
    assert_eq!(status.attempts, 2);
    assert_eq!(status.body["devices"][0]["deviceId"], "dev-1");
    assert_eq!(outcome.exit_code(), 0);

    let deploys = stub.deploys.lock().unwrap();
    assert_eq!(deploys.len(), 1);
    assert_eq!(deploys[0]["templateId"], "tmpl-1");
    assert_eq!(deploys[0]["forcePushTemplate"], true);
    assert_eq!(
        deploys[0]["targetInfo"][0]["params"]["input_data"][0]["additional_config"],
        "description users\nno shutdown"
    );
    assert_eq!(
        deploys[0]["resourceParams"],
        json!([{ "type": "MANAGED_DEVICE_UUID", "scope": "RUNTIME", "value": "dev-1" }])
    );
}

#[tokio::test]
async fn test_bad_credentials_fail_authentication() {
    let (server, stub) = start_stub().await;

    let job = job("banner", InputSource::None, false);
    let err = run(&job, credentials("wrong"), &options(&server), no_shutdown())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::AuthError(_)));
    assert_eq!(err.exit_code(), 1);
    assert!(stub.deploys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_preview_renders_without_deploying() {
    let (server, stub) = start_stub().await;

    let job = job("banner", InputSource::None, true);
    let outcome = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap();

    match outcome {
        RunOutcome::Preview { rendered } => assert_eq!(rendered, "hostname dev-1"),
        other => panic!("expected a preview, got {:?}", other),
    }
    assert!(stub.deploys.lock().unwrap().is_empty());
    assert_eq!(stub.status_checks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_template_is_a_lookup_error() {
    let (server, stub) = start_stub().await;

    let job = job("missing", InputSource::None, false);
    let err = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::LookupError(_)));
    assert!(stub.deploys.lock().unwrap().is_empty());
}

async fn deploy_rejected_with(code: StatusCode) {
    let (server, stub) = start_stub_with(Stub {
        deploy_status: Some(code),
        ..Default::default()
    })
    .await;

    let job = job("banner", InputSource::None, false);
    let err = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::DeployError(_)), "got {:?}", err);
    assert_eq!(err.exit_code(), 1);
    assert_eq!(stub.deploys.lock().unwrap().len(), 1);
    assert_eq!(stub.status_checks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_deploy_answered_with_ok_is_rejected() {
    // 200 is fine for lookups and previews but not for a deploy submission
    deploy_rejected_with(StatusCode::OK).await;
}

#[tokio::test]
async fn test_deploy_server_error_is_rejected() {
    deploy_rejected_with(StatusCode::INTERNAL_SERVER_ERROR).await;
}

#[tokio::test]
async fn test_device_lookup_server_error_stops_the_run() {
    let (server, stub) = start_stub_with(Stub {
        device_lookup_status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..Default::default()
    })
    .await;

    let job = job("banner", InputSource::None, false);
    let err = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::LookupError(_)), "got {:?}", err);
    assert_eq!(err.exit_code(), 1);
    assert!(stub.deploys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_template_lookup_unexpected_status_stops_the_run() {
    let (server, stub) = start_stub_with(Stub {
        template_lookup_status: Some(StatusCode::NO_CONTENT),
        ..Default::default()
    })
    .await;

    let job = job("banner", InputSource::None, true);
    let err = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::LookupError(_)), "got {:?}", err);
    assert!(stub.deploys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_preview_without_cli_preview_is_an_error() {
    let (server, stub) = start_stub_with(Stub {
        preview_body: Some(json!({})),
        ..Default::default()
    })
    .await;

    let job = job("banner", InputSource::None, true);
    let err = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::PreviewError(_)), "got {:?}", err);
    assert_eq!(err.exit_code(), 1);
    assert!(stub.deploys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_preview_rejected_status_is_an_error() {
    let (server, _stub) = start_stub_with(Stub {
        preview_status: Some(StatusCode::BAD_REQUEST),
        ..Default::default()
    })
    .await;

    let job = job("banner", InputSource::None, true);
    let err = run(&job, credentials("secret"), &options(&server), no_shutdown())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::PreviewError(_)), "got {:?}", err);
}
