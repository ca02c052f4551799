use std::sync::Arc;

use scoring::{MockCompletion, ScoreBreakdown};
use serde_json::{json, Value};

use super::common::{self, assert_cors, http, received, spawn_server, IDEA, KEY, SCORES_JSON};

#[tokio::test]
async fn e2e_validate_idea_returns_scores() {
    common::load_dotenv();
    let mock = Arc::new(MockCompletion::with_content(SCORES_JSON));
    let server = spawn_server(mock.clone(), Some(KEY)).await;

    let resp = http()
        .post(server.url("/validate-idea"))
        .json(&json!({ "idea": IDEA }))
        .send()
        .await
        .unwrap();
    let (status, headers, body) = received(resp).await;

    assert_eq!(status, 200);
    assert_cors(&headers);
    let scores: ScoreBreakdown = serde_json::from_str(&body).unwrap();
    assert_eq!((scores.profitability, scores.demand, scores.execution), (82, 77, 65));
    assert_eq!(scores.execution_reasoning, "Needs trust and a two-sided launch");
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn e2e_short_idea_is_400_without_upstream_call() {
    let mock = Arc::new(MockCompletion::with_content(SCORES_JSON));
    let server = spawn_server(mock.clone(), Some(KEY)).await;

    let resp = http()
        .post(server.url("/validate-idea"))
        .json(&json!({ "idea": "hello" }))
        .send()
        .await
        .unwrap();
    let (status, headers, body) = received(resp).await;

    assert_eq!(status, 400);
    assert_cors(&headers);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        v["error"],
        "Please provide a more detailed business idea (at least 10 characters)"
    );
    assert!(v.get("debug").is_none());
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn e2e_malformed_body_is_400() {
    let mock = Arc::new(MockCompletion::with_content(SCORES_JSON));
    let server = spawn_server(mock.clone(), Some(KEY)).await;

    let resp = http()
        .post(server.url("/validate-idea"))
        .header("content-type", "application/json")
        .body("not valid json")
        .send()
        .await
        .unwrap();
    let (status, _, body) = received(resp).await;

    assert_eq!(status, 400);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert!(v["error"].as_str().unwrap_or_default().contains("\"idea\""));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn e2e_missing_credential_is_500() {
    let mock = Arc::new(MockCompletion::with_content(SCORES_JSON));
    let server = spawn_server(mock.clone(), None).await;

    let resp = http()
        .post(server.url("/validate-idea"))
        .json(&json!({ "idea": IDEA }))
        .send()
        .await
        .unwrap();
    let (status, headers, body) = received(resp).await;

    assert_eq!(status, 500);
    assert_cors(&headers);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert!(v["error"].as_str().unwrap_or_default().contains("not configured"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn e2e_upstream_rejection_is_500() {
    let server = spawn_server(Arc::new(MockCompletion::unauthorized()), Some(KEY)).await;

    let resp = http()
        .post(server.url("/validate-idea"))
        .json(&json!({ "idea": IDEA }))
        .send()
        .await
        .unwrap();
    let (status, _, body) = received(resp).await;

    assert_eq!(status, 500);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        v["error"],
        "Invalid OpenAI API key. Please check your API key configuration."
    );
}

#[tokio::test]
async fn e2e_wrong_method_still_has_cors() {
    let server = spawn_server(Arc::new(MockCompletion::with_content("{}")), Some(KEY)).await;
    let resp = http().get(server.url("/validate-idea")).send().await.unwrap();
    let (status, headers, _) = received(resp).await;
    assert_eq!(status, 405);
    assert_cors(&headers);
}
