use std::sync::Arc;

use scoring::MockCompletion;

use super::common::{assert_cors, http, received, spawn_server, KEY};

#[tokio::test]
async fn e2e_preflight_is_empty_200() {
    let mock = Arc::new(MockCompletion::with_content("{}"));
    let server = spawn_server(mock.clone(), Some(KEY)).await;

    let resp = http()
        .request(reqwest::Method::OPTIONS, server.url("/validate-idea"))
        .header("origin", "https://example.test")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    let (status, headers, body) = received(resp).await;

    assert_eq!(status, 200);
    assert!(body.is_empty());
    assert_cors(&headers);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn e2e_options_on_any_path_short_circuits() {
    let server = spawn_server(Arc::new(MockCompletion::with_content("{}")), None).await;
    for path in ["/", "/new", "/does-not-exist"] {
        let resp = http()
            .request(reqwest::Method::OPTIONS, server.url(path))
            .send()
            .await
            .unwrap();
        let (status, headers, body) = received(resp).await;
        assert_eq!(status, 200, "path {}", path);
        assert!(body.is_empty());
        assert_cors(&headers);
    }
}
