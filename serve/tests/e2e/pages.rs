use std::sync::Arc;

use scoring::MockCompletion;

use super::common::{assert_cors, http, received, spawn_server, IDEA, KEY, SCORES_JSON};

#[tokio::test]
async fn e2e_index_serves_form() {
    let server = spawn_server(Arc::new(MockCompletion::with_content("{}")), Some(KEY)).await;
    let resp = http().get(server.url("/")).send().await.unwrap();
    let (status, headers, body) = received(resp).await;

    assert_eq!(status, 200);
    assert_cors(&headers);
    assert!(headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("text/html"));
    assert!(body.contains("name=\"idea\""));
    assert!(body.contains("minlength=\"20\""));
}

#[tokio::test]
async fn e2e_new_redirects_to_index() {
    let server = spawn_server(Arc::new(MockCompletion::with_content("{}")), Some(KEY)).await;
    let resp = http().get(server.url("/new")).send().await.unwrap();
    let (status, headers, _) = received(resp).await;

    assert_eq!(status, 303);
    assert_eq!(
        headers.get("location").and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
async fn e2e_unknown_path_renders_index_with_404() {
    let server = spawn_server(Arc::new(MockCompletion::with_content("{}")), Some(KEY)).await;
    let resp = http().get(server.url("/nope")).send().await.unwrap();
    let (status, headers, body) = received(resp).await;

    assert_eq!(status, 404);
    assert_cors(&headers);
    assert!(body.contains("id=\"idea-form\""));
}

#[tokio::test]
async fn e2e_short_form_submission_stays_on_form() {
    let mock = Arc::new(MockCompletion::with_content(SCORES_JSON));
    let server = spawn_server(mock.clone(), Some(KEY)).await;

    let resp = http()
        .post(server.url("/"))
        .form(&[("idea", "too short idea")])
        .send()
        .await
        .unwrap();
    let (status, _, body) = received(resp).await;

    assert_eq!(status, 200);
    assert!(body.contains("class=\"error\""));
    assert!(body.contains("too short idea</textarea>"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn e2e_form_submission_renders_results() {
    let mock = Arc::new(MockCompletion::with_content(SCORES_JSON));
    let server = spawn_server(mock.clone(), Some(KEY)).await;

    let resp = http()
        .post(server.url("/"))
        .form(&[("idea", IDEA)])
        .send()
        .await
        .unwrap();
    let (status, _, body) = received(resp).await;

    assert_eq!(status, 200);
    assert!(body.contains(">B+<"));
    assert!(body.contains("75/100"));
    assert!(body.contains("Very promising"));
    assert!(body.contains("Recurring bookings"));
    assert!(body.contains("href=\"/new\""));
    assert!(!body.contains("class=\"notice\""));
    assert_eq!(mock.calls(), 1);

    let req = mock.last_request().unwrap();
    assert_eq!(
        req.messages[1],
        scoring::Message::user(format!("Analyze this business idea: {}", IDEA))
    );
}

#[tokio::test]
async fn e2e_form_falls_back_to_placeholder_on_gateway_error() {
    let mock = Arc::new(MockCompletion::with_content(SCORES_JSON));
    let server = spawn_server(mock.clone(), None).await;

    let resp = http()
        .post(server.url("/"))
        .form(&[("idea", IDEA)])
        .send()
        .await
        .unwrap();
    let (status, _, body) = received(resp).await;

    assert_eq!(status, 200);
    assert!(body.contains("class=\"notice\""));
    assert!(body.contains("Overall Validation Score"));
    assert_eq!(mock.calls(), 0);
}
