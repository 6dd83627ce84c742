#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use serde_json::json;
use shortlink::prelude::*;
use shortlink::routes::api_router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const DOMAIN: &str = "sho.rt";

/// State with the given quotas on both scopes.
pub fn create_test_state(policy: RateLimitPolicy, behind_proxy: bool) -> AppState {
    let shortener = ShortenerService::new(
        Arc::new(InMemoryUrlRepository::new()),
        Arc::new(InMemoryRateLimiter::new(policy)),
        IdCodec::new(6),
        DOMAIN,
    );

    AppState::new(Arc::new(shortener), behind_proxy)
}

/// State without rate limits.
pub fn create_unlimited_state() -> AppState {
    create_test_state(RateLimitPolicy::unlimited(), false)
}

/// Full router with every request arriving from `127.0.0.1`.
pub fn create_test_server(state: AppState) -> TestServer {
    create_test_server_from(state, "127.0.0.1:12345".parse().unwrap())
}

pub fn create_test_server_from(state: AppState, peer: SocketAddr) -> TestServer {
    let app = api_router(state).layer(MockConnectInfoLayer(peer));
    TestServer::new(app).unwrap()
}

/// Encodes `url` and returns the issued short URL.
pub async fn encode(server: &TestServer, url: &str) -> String {
    let response = server.post("/encode").json(&json!({ "url": url })).await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["url"]
        .as_str()
        .unwrap()
        .to_string()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
