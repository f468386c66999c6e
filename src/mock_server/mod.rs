//! Mock Twitter API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Twitter
//! REST and Search APIs for integration and end-to-end testing. Unlike
//! wiremock which mocks at the HTTP level per-test, this server maintains
//! state across requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use twitter_rest::mock_server::MockServer;
//! use twitter_rest::{Get, Status, TwitterClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = TwitterClient::builder()
//!         .oauth_consumer("key", "secret")
//!         .oauth_access("token", "token-secret")
//!         .config(server.config())
//!         .build();
//!
//!     // Server comes with default fixtures
//!     let status = Status::get(&client, 107786772).await.unwrap();
//!     assert_eq!(status.text, "Word of the day: serendipity");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, DEFAULT_USER_ID};
pub use server::MockServer;
pub use state::MockState;
