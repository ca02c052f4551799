//! `HttpGatewayClient` against a live server, and the client's placeholder substitution.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use scoring::{resolve, ClientError, HttpGatewayClient, IdeaIntake, IntakeState, MockCompletion, ScoreOrigin};

use super::common::{spawn_server, IDEA, KEY, SCORES_JSON};

#[tokio::test]
async fn e2e_client_receives_scores() {
    let server = spawn_server(Arc::new(MockCompletion::with_content(SCORES_JSON)), Some(KEY)).await;
    let client = HttpGatewayClient::new(server.url("/validate-idea"));

    let scores = client.score(IDEA).await.unwrap();
    assert_eq!((scores.profitability, scores.demand, scores.execution), (82, 77, 65));
}

#[tokio::test]
async fn e2e_client_sees_rejection_and_falls_back() {
    let server = spawn_server(Arc::new(MockCompletion::with_content(SCORES_JSON)), None).await;
    let client = HttpGatewayClient::new(server.url("/validate-idea"));

    let result = client.score(IDEA).await;
    match &result {
        Err(ClientError::Rejected { status, message }) => {
            assert_eq!(*status, 500);
            assert!(message.contains("not configured"));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }

    let mut rng = StdRng::seed_from_u64(7);
    let (report, origin) = resolve(result, &mut rng);
    assert_eq!(origin, ScoreOrigin::Placeholder);
    for row in &report.rows {
        assert!((60..100).contains(&row.score), "score {}", row.score);
    }
}

#[tokio::test]
async fn e2e_intake_settles_to_placeholder_when_gateway_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpGatewayClient::new(format!("http://{}/validate-idea", addr));

    let mut intake = IdeaIntake::new();
    intake.set_text(IDEA);
    let idea = intake.begin_submit().unwrap();
    assert!(intake.is_loading());

    let result = client.score(&idea).await;
    assert!(matches!(result, Err(ClientError::Transport(_))));
    intake.settle(result, &mut StdRng::seed_from_u64(1));

    match intake.state() {
        IntakeState::Results { origin, .. } => assert_eq!(*origin, ScoreOrigin::Placeholder),
        other => panic!("expected results, got {:?}", other),
    }
}
