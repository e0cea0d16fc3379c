//! HTTP route handlers for Onetap.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::CorsConfig;
use crate::state::AppState;

mod codes;
mod health;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        // Health & Status
        .route("/", get(health::liveness))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))

        // Code lifecycle
        .route("/generate-code", get(codes::generate_code))
        .route("/verify-code", post(codes::verify_code))

        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // Add shared state
        .with_state(state)
}

/// Build the CORS layer; no configured origins means any origin
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    use crate::config::AppConfig;

    fn test_state() -> AppState {
        AppState::new(AppConfig::default())
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn verify_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/verify-code")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn generate(app: &Router) -> String {
        let req = Request::builder()
            .uri("/generate-code")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["message"], "Code generated successfully");
        body["code"].as_str().unwrap().to_string()
    }

    async fn verify(app: &Router, code: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "code": code }).to_string();
        let resp = app.clone().oneshot(verify_request(&body)).await.unwrap();
        let status = resp.status();
        (status, json_body(resp).await)
    }

    #[tokio::test]
    async fn test_liveness() {
        let app = create_router(test_state());
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"Onetap code service is running");
    }

    #[tokio::test]
    async fn test_generate_registers_code() {
        let state = test_state();
        let app = create_router(state.clone());

        let code = generate(&app).await;
        assert_eq!(code.len(), 15);
        assert!(onetap_common::Code::is_well_formed(&code));
        assert!(state.store.contains(&code));
    }

    #[tokio::test]
    async fn test_verify_round_trip() {
        let state = test_state();
        let app = create_router(state.clone());
        let code = generate(&app).await;

        let (status, body) = verify(&app, &code).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Code verified successfully");
        assert!(!state.store.contains(&code));

        let (status, body) = verify(&app, &code).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid or expired code");
    }

    #[tokio::test]
    async fn test_verify_unknown_code() {
        let app = create_router(test_state());
        let (status, body) = verify(&app, "Ab3!xZ9@qR2#mN1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid or expired code");
    }

    #[tokio::test]
    async fn test_verify_missing_code() {
        let state = test_state();
        let app = create_router(state.clone());

        for body in ["{}", r#"{"code":""}"#, r#"{"code":null}"#, r#"{"code":42}"#, "not json"] {
            let resp = app.clone().oneshot(verify_request(body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json_body(resp).await["message"], "Code is required");
        }

        // Rejected before reaching the store
        assert_eq!(state.store.stats().rejected, 0);
    }

    #[tokio::test]
    async fn test_verify_without_content_type() {
        let app = create_router(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/verify-code")
            .body(Body::from(r#"{"code":"Ab3!xZ9@qR2#mN1"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_verify_single_winner() {
        let app = create_router(test_state());
        let code = generate(&app).await;

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let app = app.clone();
                let code = code.clone();
                tokio::spawn(async move { verify(&app, &code).await.0 })
            })
            .collect();

        let mut ok = 0;
        let mut unauthorized = 0;
        for task in tasks {
            let status = task.await.unwrap();
            if status == StatusCode::OK {
                ok += 1;
            } else if status == StatusCode::UNAUTHORIZED {
                unauthorized += 1;
            } else {
                panic!("unexpected status {status}");
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(unauthorized, 15);
    }

    #[tokio::test]
    async fn test_metrics() {
        let app = create_router(test_state());
        let code = generate(&app).await;
        generate(&app).await;
        verify(&app, &code).await;
        verify(&app, &code).await;

        let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["outstanding"], 1);
        assert_eq!(body["issued"], 2);
        assert_eq!(body["redeemed"], 1);
        assert_eq!(body["rejected"], 1);
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_state());
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_cors_permissive_by_default() {
        let app = create_router(test_state());
        let req = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://anywhere.example.com")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_allow_list() {
        let mut config = AppConfig::default();
        config.cors.allowed_origins = vec!["https://app.example.com".to_string()];
        let app = create_router(AppState::new(config));

        let req = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://app.example.com")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );

        let req = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://evil.example.com")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
