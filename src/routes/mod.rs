use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::chain::EventWriter;
use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::landing::{landing_page, view_created_events};
use crate::handlers::wizard::{
    close_wizard, next_step, open_wizard, previous_step, show_wizard, update_draft,
};
use crate::handlers::{health_check, theme};
use crate::state::AppState;

pub fn create_routes<W: EventWriter>(state: Arc<AppState<W>>) -> Router {
    let include_hsts = state.config.production;
    let cors = create_cors_layer(&state.config.allowed_origins);

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/theme", get(theme::<W>))
        .route("/landing", get(landing_page))
        .route("/landing/view-created", post(view_created_events))
        .route("/wizard", post(open_wizard::<W>))
        .route("/wizard/:id", get(show_wizard::<W>).delete(close_wizard::<W>))
        .route("/wizard/:id/draft", patch(update_draft::<W>))
        .route("/wizard/:id/next", post(next_step::<W>))
        .route("/wizard/:id/back", post(previous_step::<W>))
        .with_state(state);

    create_security_headers_layer(include_hsts)
        .into_iter()
        .fold(router, |router, layer| router.layer(layer))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::chain::testing::{GatedWriter, StubWriter};
    use crate::config::Config;

    const ORGANIZER: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn app<W: EventWriter>(writer: W) -> (Router, Arc<AppState<W>>) {
        let state = Arc::new(AppState::new(Config::default(), writer));
        (create_routes(state.clone()), state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn open_at_tickets(app: &Router) -> String {
        let (status, body) = send(app, Method::POST, "/wizard", Some(json!({ "address": ORGANIZER }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();
        for _ in 0..3 {
            let (status, _) = send(app, Method::POST, &format!("/wizard/{id}/next"), None).await;
            assert_eq!(status, StatusCode::OK);
        }
        id
    }

    #[tokio::test]
    async fn test_health_has_security_headers() {
        let (app, _) = app(StubWriter::accepting("0xABC"));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert!(response.headers().get("strict-transport-security").is_none());
    }

    #[tokio::test]
    async fn test_theme_is_forced() {
        let (app, _) = app(StubWriter::accepting("0xABC"));
        let (status, body) = send(&app, Method::GET, "/theme", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["forced_theme"], "zkonnect");
    }

    #[tokio::test]
    async fn test_landing_depends_on_connection() {
        let (app, _) = app(StubWriter::accepting("0xABC"));

        let (_, body) = send(&app, Method::GET, "/landing", None).await;
        assert_eq!(body["data"]["links"].as_array().unwrap().len(), 3);
        assert!(body["data"]["connected_as"].is_null());

        let (_, body) = send(&app, Method::GET, &format!("/landing?address={ORGANIZER}"), None).await;
        assert_eq!(body["data"]["connected_as"]["address"], ORGANIZER);
        assert_eq!(
            body["data"]["view_created_events"]["route"],
            format!("/create-event/viewAll?id={ORGANIZER}")
        );

        let (status, _) = send(&app, Method::POST, "/landing/view-created", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/landing/view-created?address={ORGANIZER}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["navigation"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_draft_and_navigation() {
        let (app, _) = app(StubWriter::accepting("0xABC"));
        let (_, body) = send(&app, Method::POST, "/wizard", Some(json!({}))).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["step"], 1);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/wizard/{id}/draft"),
            Some(json!({ "step": "basic_info", "name": "ETH Lisbon" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["draft"]["name"], "ETH Lisbon");

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/wizard/{id}/draft"),
            Some(json!({ "step": "tickets", "max_attendees": 10 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, body) = send(&app, Method::POST, &format!("/wizard/{id}/back"), None).await;
        assert_eq!(body["data"]["step"], 1);
        let (_, body) = send(&app, Method::POST, &format!("/wizard/{id}/next"), None).await;
        assert_eq!(body["data"]["step"], 2);
        assert_eq!(body["data"]["draft"]["name"], "ETH Lisbon");

        let (status, _) = send(&app, Method::DELETE, &format!("/wizard/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, &format!("/wizard/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_successful_submission_closes_session() {
        let (app, state) = app(StubWriter::accepting("0xABC"));
        let id = open_at_tickets(&app).await;

        let (status, body) = send(&app, Method::POST, &format!("/wizard/{id}/next"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["submission"]["status"], "success");
        assert_eq!(body["data"]["submission"]["tx_hash"], "0xABC");
        assert_eq!(body["data"]["navigation"], json!(["/events"]));
        assert_eq!(body["data"]["view_all"], format!("/viewAll?id={ORGANIZER}"));
        assert!(body["data"]["notifications"][0]["message"]
            .as_str()
            .unwrap()
            .contains("0xABC"));

        assert_eq!(state.writer.calls().len(), 1);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_session() {
        let (app, state) = app(StubWriter::rejecting("insufficient funds"));
        let id = open_at_tickets(&app).await;

        let (status, body) = send(&app, Method::POST, &format!("/wizard/{id}/next"), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "WRITE_REJECTED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("insufficient funds"));
        assert_eq!(body["error"]["details"]["step"], 4);
        assert_eq!(body["error"]["details"]["notifications"][0]["level"], "error");

        let (status, body) = send(&app, Method::GET, &format!("/wizard/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["step"], 4);
        assert_eq!(body["data"]["submission"]["status"], "idle");
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_address_is_bad_request() {
        let (app, _) = app(StubWriter::accepting("0xABC"));
        let (status, body) = send(&app, Method::POST, "/wizard", Some(json!({ "address": "bob" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_close_refused_while_submission_pending() {
        let (app, state) = app(GatedWriter::default());
        let id = open_at_tickets(&app).await;

        let pending = tokio::spawn({
            let app = app.clone();
            let uri = format!("/wizard/{id}/next");
            async move { send(&app, Method::POST, &uri, None).await }
        });
        state.writer.entered.notified().await;

        let (status, body) = send(&app, Method::DELETE, &format!("/wizard/{id}"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        let (status, body) = send(&app, Method::GET, &format!("/wizard/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mining"], true);

        state.writer.release.notify_one();
        let (status, body) = pending.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["submission"]["tx_hash"], "0xGATED");
        assert_eq!(body["data"]["navigation"], json!(["/events"]));

        let (status, _) = send(&app, Method::GET, &format!("/wizard/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
