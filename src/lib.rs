//! Twitter REST API client library.
//!
//! A typed client for the Twitter REST and Search APIs. Every request is
//! signed with OAuth 1.0a, non-2xx responses become typed [`RestError`]s, and
//! returned models stay bound to the client that produced them so they can
//! make follow-up calls.
//!
//! # Quick Start
//!
//! ```no_run
//! use twitter_rest::{FriendAction, SearchOptions, StatusAction, StatusValue, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> twitter_rest::Result<()> {
//!     // Access token from the environment, consumer key from the configuration
//!     let client = TwitterClient::from_env()?;
//!
//!     // Post a status
//!     let status = client
//!         .status(StatusAction::Post, StatusValue::from("Hello from Rust"))
//!         .await?;
//!
//!     // Follow someone, then list who they follow
//!     let user = client.friend(FriendAction::Add, "dictionary").await?;
//!     for friend in user.friends().await? {
//!         println!("{}", friend.screen_name);
//!     }
//!
//!     // Search
//!     let results = client.search(SearchOptions::query("coworking")).await?;
//!     println!("{} results, posted {:?}", results.len(), status.map(|s| s.id));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Clients use the process-wide default [`Config`] unless one is given to
//! [`ClientBuilder::config`]. Change the default with [`configure`]:
//!
//! ```
//! twitter_rest::configure(|config| {
//!     config.oauth_consumer_token = Some("consumer-key".to_string());
//!     config.oauth_consumer_secret = Some("consumer-secret".to_string());
//! });
//! # twitter_rest::reset_config();
//! ```
//!
//! Tokens and default headers are derived from the configuration on first
//! use and then cached; later changes do not reach clients that have already
//! made a request.
//!
//! [`TwitterClient::from_env`] reads:
//!
//! - `TWITTER_ACCESS_KEY` / `TWITTER_ACCESS_SECRET` (required) - access token
//! - `TWITTER_CONSUMER_KEY` / `TWITTER_CONSUMER_SECRET` - consumer credentials
//! - `TWITTER_HOST`, `TWITTER_PORT`, `TWITTER_SEARCH_HOST`, `TWITTER_SEARCH_PORT`,
//!   `TWITTER_PROXY_HOST`, `TWITTER_PROXY_PORT`, `TWITTER_PROXY_USER`,
//!   `TWITTER_PROXY_PASS`, `TWITTER_TIMEOUT_SECS` (optional)

mod auth;
mod bless;
mod client;
mod config;
mod error;
mod models;
mod oauth;
mod params;
mod resources;
mod response;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::{AccessToken, Consumer, Credentials};
pub use client::{reset_default_headers, ClientBuilder, HttpMethod, Surface, TwitterClient};
pub use config::{configure, current as current_config, reset as reset_config, Config, Protocol};
pub use error::{ErrorRegistry, RestError, RestErrorKind, Result, TwitterError};
pub use params::Params;
pub use response::{classify, ApiResponse};

// Model binding
pub use bless::{Bindable, Bless, ClientHandle};

// Re-export traits
pub use traits::Get;

// Re-export models
pub use models::{
    IdList, Location, PlaceType, RateLimitStatus, Status, Trend, Trendline, User, UserRef,
};

// Re-export resource arguments
pub use resources::{
    AccountInfo, DeliveryDevice, FriendAction, FriendshipDirection, ProfileColors, ProfileInfo,
    ProfileSection, ProfileUpdate, SearchOptions, StatusAction, StatusUpdate, StatusValue,
    TrendResults, TrendType,
};
