//! Test harness driving the Axum router in-process.
//!
//! Every backend is a mock from `TestDependencies`; requests go through
//! `tower::ServiceExt::oneshot`, so no socket is bound.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use search_core::kernel::TestDependencies;
use search_core::server::build_app;
use serde_json::Value;
use test_context::AsyncTestContext;
use tower::ServiceExt;

/// Test harness holding the mocks and the router built on top of them.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let (status, body) = ctx.get("/health").await;
///     // ... assertions
/// }
/// ```
pub struct TestHarness {
    /// Mock handles; clones share recorded calls with the router's copies.
    pub deps: TestDependencies,
    pub app: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    async fn teardown(self) {}
}

impl TestHarness {
    /// Build a harness around pre-configured mocks.
    pub fn with_deps(deps: TestDependencies) -> Self {
        Self::with_request_timeout(deps, Duration::from_secs(5))
    }

    /// Same as [`TestHarness::with_deps`] with a custom request deadline.
    pub fn with_request_timeout(deps: TestDependencies, request_timeout: Duration) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let app = build_app(deps.clone().into_server_deps(), Vec::new(), request_timeout);
        Self { deps, app }
    }

    /// POST /search with the given user input.
    pub async fn post_search(&self, user_input: &str) -> (StatusCode, Value) {
        let body = serde_json::json!({ "user_input": user_input }).to_string();
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri("/search")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("valid request"),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// Send a raw request; a non-JSON body comes back as `Value::Null`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
