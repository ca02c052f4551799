//! Router, handlers and the cross-cutting layers (CORS headers, preflight, tracing, panics).

use std::any::Any;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue, Method, StatusCode,
    },
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use scoring::{ErrorBody, IdeaIntake, IntakeState, INTERNAL_ERROR_MESSAGE};
use serde::Deserialize;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::app::AppState;
use crate::page;

/// Value of `Access-Control-Allow-Headers` on every response.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Builds the app: gateway endpoint, client pages, 404 fallback, and the outer layers.
///
/// Layers run outermost first: trace, CORS headers, preflight short-circuit, panic catcher. The
/// panic response therefore still carries the CORS headers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/new", get(new_idea))
        .route("/validate-idea", post(validate_idea))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Any `OPTIONS` request is a preflight: 200, empty body, no routing.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
            debug: None,
        }),
    )
        .into_response()
}

/// `POST /validate-idea`: the raw body goes to the gateway untouched so malformed JSON is
/// reported by the gateway itself.
async fn validate_idea(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("validate_idea", %request_id);
    let reply = state.gateway.handle(&body).instrument(span).await;
    (reply.status, Json(reply.body)).into_response()
}

async fn index() -> Html<String> {
    Html(page::index_page("", None))
}

#[derive(Debug, Deserialize)]
struct IdeaForm {
    #[serde(default)]
    idea: String,
}

/// `POST /`: the client flow. Short ideas are re-rendered with an inline error and never reach
/// the gateway; any gateway failure is replaced by placeholder scores.
async fn submit(State(state): State<AppState>, Form(form): Form<IdeaForm>) -> Response {
    let mut intake = IdeaIntake::new();
    intake.set_text(form.idea);
    let idea = match intake.begin_submit() {
        Ok(idea) => idea,
        Err(e) => {
            info!(chars = intake.char_count(), "form rejected before submission");
            return Html(page::index_page(intake.text(), Some(&e.to_string()))).into_response();
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("validate_idea", %request_id, source = "form");
    let result = state
        .gateway
        .score_idea(&idea)
        .instrument(span)
        .await
        .into_client_result();
    intake.settle(result, &mut rand::thread_rng());

    match intake.state() {
        IntakeState::Results { report, origin } => {
            Html(page::results_page(&idea, report, *origin)).into_response()
        }
        _ => Html(page::index_page(intake.text(), None)).into_response(),
    }
}

async fn new_idea() -> Redirect {
    Redirect::to("/")
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(page::index_page("", None)))
}
