//! Shared helpers for e2e tests. Received bodies are logged with `[e2e] received: ...`.

use std::sync::Arc;

use config::Settings;
use scoring::MockCompletion;
use serve::{run_serve_on_listener, AppState};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const KEY: &str = "sk-test-0123456789abcdef";
pub const IDEA: &str = "A marketplace that matches dog owners with vetted local walkers";
pub const SCORES_JSON: &str = r#"{"profitability":82,"demand":77,"execution":65,
"profitabilityReasoning":"Recurring bookings","demandReasoning":"Busy urban owners",
"executionReasoning":"Needs trust and a two-sided launch"}"#;

/// Loads .env from the current directory so local runs can override settings.
pub fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// A running server. Dropping it stops the server.
pub struct TestServer {
    pub base: String,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Settings with `key` as the credential and defaults for everything else.
pub fn settings(key: Option<&str>) -> Settings {
    let key = key.map(str::to_string);
    Settings::from_lookup(move |k| match k {
        "OPENAI_API_KEY" => key.clone(),
        _ => None,
    })
}

/// Binds 127.0.0.1:0 and serves a gateway over `mock`.
pub async fn spawn_server(mock: Arc<MockCompletion>, key: Option<&str>) -> TestServer {
    let state = AppState::with_client(&settings(key), mock);
    spawn_state(state).await
}

pub async fn spawn_state(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(run_serve_on_listener(listener, state, async move {
        let _ = rx.await;
    }));
    TestServer {
        base: format!("http://{}", addr),
        _shutdown: tx,
    }
}

/// Client that does not follow redirects, so tests can see 303s.
pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

pub async fn received(resp: reqwest::Response) -> (reqwest::StatusCode, reqwest::header::HeaderMap, String) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.text().await.unwrap();
    eprintln!("[e2e] received: {} {}", status, body.chars().take(200).collect::<String>());
    (status, headers, body)
}

pub fn assert_cors(headers: &reqwest::header::HeaderMap) {
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        headers
            .get("access-control-allow-headers")
            .and_then(|v| v.to_str().ok()),
        Some("authorization, x-client-info, apikey, content-type")
    );
}
