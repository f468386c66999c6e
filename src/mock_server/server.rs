//! Mock Twitter API server.
//!
//! Provides an axum-based HTTP server that simulates the REST and Search
//! surfaces on one listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, error_response};
use super::state::MockState;
use crate::config::{Config, Protocol};

/// A mock Twitter API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `config()` to point a client at it.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            addr,
            handle,
            state: shared_state,
        }
    }

    /// Base URL of the mock server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Configuration with both surfaces pointed at this server.
    pub fn config(&self) -> Config {
        let host = self.addr.ip().to_string();
        Config {
            protocol: Protocol::Http,
            host: host.clone(),
            port: self.addr.port(),
            search_protocol: Protocol::Http,
            search_host: host,
            search_port: self.addr.port(),
            ..Config::default()
        }
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new().with_authenticated_user(scenario.me);

        for user in scenario.users {
            state = state.with_user(user);
        }

        for status in scenario.statuses {
            state = state.with_status(status);
        }

        for (follower, followed) in scenario.following {
            state = state.with_following(follower, followed);
        }

        for location in scenario.locations {
            state = state.with_location(location);
        }

        state.incoming = scenario.incoming;
        state.outgoing = scenario.outgoing;
        state.with_trends(scenario.trends)
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        let api = Router::new()
            // Status routes
            .route("/statuses/show.json", get(handlers::show_status))
            .route("/statuses/update.json", post(handlers::update_status))
            .route("/statuses/destroy.json", delete(handlers::destroy_status))
            .route("/statuses/friends/:user", get(handlers::list_friends))
            .route("/statuses/followers/:user", get(handlers::list_followers))
            // User routes
            .route("/users/show.json", get(handlers::show_user))
            // Friendship routes
            .route("/friendships/create/:user", post(handlers::create_friendship))
            .route("/friendships/destroy/:user", post(handlers::destroy_friendship))
            .route("/friendships/incoming.json", get(handlers::incoming_friendships))
            .route("/friendships/outgoing.json", get(handlers::outgoing_friendships))
            // Account routes
            .route(
                "/account/verify_credentials.json",
                get(handlers::verify_credentials),
            )
            .route("/account/rate_limit_status", get(handlers::rate_limit_status))
            .route("/account/update_profile", post(handlers::update_profile))
            .route(
                "/account/update_profile_colors",
                post(handlers::update_profile_colors),
            )
            .route(
                "/account/update_delivery_device",
                post(handlers::update_delivery_device),
            )
            // Search
            .route("/search.json", get(handlers::search))
            // Trends
            .route("/trends.json", get(handlers::global_trends))
            .route("/trends/available.json", get(handlers::available_trends))
            .route("/trends/current.json", get(handlers::current_trends))
            .route("/trends/daily.json", get(handlers::daily_trends))
            .route("/trends/weekly.json", get(handlers::weekly_trends))
            .route("/trends/:woeid", get(handlers::local_trends))
            .route_layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn_with_state(state.clone(), authorize)),
            );

        api
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Count the request and, when a consumer key is required, reject requests
/// not signed with it.
async fn authorize(
    State(state): State<Arc<RwLock<MockState>>>,
    request: Request,
    next: Next,
) -> Response {
    let consumer_key = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(oauth_consumer_key);

    {
        let mut state = state.write().await;
        state.requests += 1;
        if let Some(required) = state.required_consumer_key.as_deref() {
            if consumer_key.as_deref() != Some(required) {
                return error_response(
                    StatusCode::UNAUTHORIZED,
                    request.uri().path(),
                    "Could not authenticate you.",
                );
            }
        }
    }

    next.run(request).await
}

/// Extract `oauth_consumer_key` from an `OAuth k="v", ...` header.
fn oauth_consumer_key(header: &str) -> Option<String> {
    header
        .strip_prefix("OAuth ")?
        .split(',')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == "oauth_consumer_key")
        .map(|(_, value)| value.trim_matches('"'))
        .and_then(|value| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::fixtures::DEFAULT_USER_ID;
    use crate::{Get, Status, TwitterClient, User};

    fn client(server: &MockServer) -> TwitterClient {
        TwitterClient::builder()
            .oauth_consumer("test-consumer", "consumer-secret")
            .oauth_access("test-access", "access-secret")
            .config(server.config())
            .build()
    }

    #[test]
    fn test_oauth_consumer_key() {
        let header = r#"OAuth oauth_consumer_key="K%201", oauth_nonce="abc", oauth_version="1.0""#;
        assert_eq!(oauth_consumer_key(header).as_deref(), Some("K 1"));
        assert_eq!(oauth_consumer_key("Bearer token"), None);
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let response = reqwest::Client::new()
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_status_with_client() {
        let server = MockServer::start().await;
        let client = client(&server);

        let status = Status::get(&client, 107786772)
            .await
            .expect("Failed to get status");

        assert_eq!(status.text, "Word of the day: serendipity");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_verify_credentials_returns_me() {
        let server = MockServer::start().await;
        let client = client(&server);

        let me = User::get(&client, DEFAULT_USER_ID.into())
            .await
            .expect("Failed to get user");
        assert_eq!(me.screen_name, "t4ruby");
        assert!(client.authenticate("t4ruby", "secret").await.unwrap());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = client(&server);

        let result = Status::get(&client, 1).await;

        assert!(result.is_err());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_consumer_key() {
        let state = MockState::new().with_required_consumer_key("other-consumer");
        let server = MockServer::with_state(state).await;
        let client = client(&server);

        assert!(!client.authenticate("t4ruby", "secret").await.unwrap());
        assert_eq!(server.state().read().await.requests, 1);

        server.shutdown().await;
    }
}
