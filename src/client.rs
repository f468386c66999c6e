//! Twitter API client.
//!
//! [`TwitterClient`] owns the per-instance credentials and lazily built
//! OAuth tokens, and dispatches signed requests to the REST and Search
//! surfaces. Higher-level operations live in `resources` and on the model
//! types.

use std::env;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::auth::{resolve_consumer, AccessToken, Consumer, Credentials, TokenCache};
use crate::bless::{Bless, ClientHandle};
use crate::config::{self, Config};
use crate::error::{Result, TwitterError};
use crate::params::Params;
use crate::response::{classify, ApiResponse};

const LIBRARY_NAME: &str = env!("CARGO_PKG_NAME");
const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
const ACCEPT_JSON: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

static GLOBAL_HEADERS: Lazy<HeaderCache> = Lazy::new(HeaderCache::default);

/// One of the two independent endpoint groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Rest,
    Search,
}

/// HTTP verbs the dispatcher issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Read verbs carry parameters in the query string; writes in the body.
    pub fn is_read(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Initialize-once holder for the default request headers.
#[derive(Default)]
struct HeaderCache {
    headers: RwLock<Option<Arc<HeaderMap>>>,
}

impl HeaderCache {
    fn get_or_build(&self, config: &Config) -> Result<Arc<HeaderMap>> {
        if let Some(headers) = self.headers.read().as_ref() {
            return Ok(headers.clone());
        }
        let mut slot = self.headers.write();
        if let Some(headers) = slot.as_ref() {
            return Ok(headers.clone());
        }
        let headers = Arc::new(default_headers(config)?);
        *slot = Some(headers.clone());
        Ok(headers)
    }

    fn clear(&self) {
        *self.headers.write() = None;
    }
}

/// Drop the process-wide default header cache.
///
/// The next request from a client using the global configuration rebuilds
/// the headers from the configuration current at that moment. Headers are
/// otherwise computed once and never refreshed.
pub fn reset_default_headers() {
    GLOBAL_HEADERS.clear();
}

fn default_headers(config: &Config) -> Result<HeaderMap> {
    fn value(v: &str) -> Result<HeaderValue> {
        HeaderValue::from_str(v).map_err(|_| TwitterError::InvalidHeader(v.to_string()))
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        value(&format!(
            "{LIBRARY_NAME} v{LIBRARY_VERSION} [{}]",
            config.user_agent
        ))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
    headers.insert(
        HeaderName::from_static("x-twitter-client"),
        value(&config.application_name)?,
    );
    headers.insert(
        HeaderName::from_static("x-twitter-client-version"),
        value(&config.application_version)?,
    );
    headers.insert(
        HeaderName::from_static("x-twitter-client-url"),
        value(&config.application_url)?,
    );
    Ok(headers)
}

/// Where a client reads its configuration from.
enum ConfigSource {
    /// The live process-wide default.
    Global,
    /// A configuration supplied to the builder.
    Fixed {
        config: Arc<Config>,
        headers: HeaderCache,
    },
}

pub(crate) struct ClientInner {
    login: Option<String>,
    password: Option<String>,
    oauth_consumer: Option<Credentials>,
    oauth_access: Option<Credentials>,
    source: ConfigSource,
    tokens: TokenCache,
}

/// Twitter API client.
///
/// Signs every request with OAuth 1.0a using the consumer credentials
/// (per-instance override, else configuration) and the access credentials
/// given at construction.
///
/// This struct is cheaply cloneable; clones share the same cached tokens.
/// Models returned by the resource methods hold a non-owning handle back to
/// the client that produced them.
///
/// # Example
///
/// ```no_run
/// use twitter_rest::{FriendAction, TwitterClient};
///
/// # async fn example() -> twitter_rest::Result<()> {
/// let client = TwitterClient::builder()
///     .oauth_consumer("consumer-key", "consumer-secret")
///     .oauth_access("access-key", "access-secret")
///     .build();
///
/// let user = client.friend(FriendAction::Add, "dictionary").await?;
/// println!("Now following {}", user.screen_name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TwitterClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.inner.source {
            ConfigSource::Global => "global",
            ConfigSource::Fixed { .. } => "fixed",
        };
        f.debug_struct("TwitterClient")
            .field("login", &self.inner.login)
            .field("password", &self.inner.password.as_ref().map(|_| "XXXX"))
            .field("oauth_consumer", &self.inner.oauth_consumer)
            .field("oauth_access", &self.inner.oauth_access)
            .field("config", &source)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TwitterClient`].
#[derive(Default)]
pub struct ClientBuilder {
    login: Option<String>,
    password: Option<String>,
    oauth_consumer: Option<Credentials>,
    oauth_access: Option<Credentials>,
    config: Option<Config>,
}

impl ClientBuilder {
    /// Legacy login name.
    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Legacy password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Override the configured consumer key/secret for this client.
    pub fn oauth_consumer(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.oauth_consumer = Some(Credentials::new(key, secret));
        self
    }

    /// Access key/secret of the authorized user.
    pub fn oauth_access(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.oauth_access = Some(Credentials::new(key, secret));
        self
    }

    /// Use `config` instead of the process-wide default.
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> TwitterClient {
        let source = match self.config {
            Some(config) => ConfigSource::Fixed {
                config: Arc::new(config),
                headers: HeaderCache::default(),
            },
            None => ConfigSource::Global,
        };
        TwitterClient {
            inner: Arc::new(ClientInner {
                login: self.login,
                password: self.password,
                oauth_consumer: self.oauth_consumer,
                oauth_access: self.oauth_access,
                source,
                tokens: TokenCache::default(),
            }),
        }
    }
}

impl TwitterClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client with the given access credentials and the global configuration.
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Self {
        Self::builder().oauth_access(access_key, access_secret).build()
    }

    /// Create a client from environment variables.
    ///
    /// Uses `TWITTER_ACCESS_KEY` and `TWITTER_ACCESS_SECRET` for the access
    /// token and [`Config::from_env`] for everything else.
    ///
    /// # Errors
    ///
    /// Returns an error if the access variables are not set or a
    /// configuration variable is malformed.
    pub fn from_env() -> Result<Self> {
        let access_key = env::var("TWITTER_ACCESS_KEY").map_err(|_| {
            TwitterError::ConfigMissing("TWITTER_ACCESS_KEY environment variable not set".to_string())
        })?;
        let access_secret = env::var("TWITTER_ACCESS_SECRET").map_err(|_| {
            TwitterError::ConfigMissing(
                "TWITTER_ACCESS_SECRET environment variable not set".to_string(),
            )
        })?;

        Ok(Self::builder()
            .oauth_access(access_key, access_secret)
            .config(Config::from_env()?)
            .build())
    }

    pub fn login(&self) -> Option<&str> {
        self.inner.login.as_deref()
    }

    /// Configuration in effect for this client right now.
    pub fn config(&self) -> Arc<Config> {
        match &self.inner.source {
            ConfigSource::Global => config::current(),
            ConfigSource::Fixed { config, .. } => config.clone(),
        }
    }

    /// Default headers sent with every request.
    ///
    /// Computed on first use and cached: process-wide for clients on the
    /// global configuration, per client otherwise.
    pub fn http_headers(&self) -> Result<Arc<HeaderMap>> {
        match &self.inner.source {
            ConfigSource::Global => GLOBAL_HEADERS.get_or_build(&config::current()),
            ConfigSource::Fixed { config, headers } => headers.get_or_build(config),
        }
    }

    /// Access token for the REST surface, built on first use.
    pub fn rest_token(&self) -> Result<Arc<AccessToken>> {
        self.token(Surface::Rest)
    }

    /// Access token for the Search surface, built on first use.
    pub fn search_token(&self) -> Result<Arc<AccessToken>> {
        self.token(Surface::Search)
    }

    fn token(&self, surface: Surface) -> Result<Arc<AccessToken>> {
        self.inner.tokens.get_or_build(surface, || {
            let config = self.config();
            let consumer_credentials = resolve_consumer(self.inner.oauth_consumer.as_ref(), &config);
            let consumer = Consumer::new(&config, surface, consumer_credentials)?;
            let access = self.inner.oauth_access.clone().unwrap_or_default();
            if access.is_incomplete() {
                tracing::warn!(?surface, "OAuth access credentials are empty");
            }
            Ok(AccessToken::new(consumer, access))
        })
    }

    /// Non-owning handle to this client, as stored on bound models.
    pub fn handle(&self) -> ClientHandle {
        ClientHandle::new(Arc::downgrade(&self.inner))
    }

    /// Bind `model` (or every model in a collection) to this client.
    pub fn bless<B: Bless>(&self, model: B) -> B {
        model.bless(self)
    }

    /// Issue a signed request and classify the response.
    ///
    /// `path` is appended to the surface's configured path prefix. For
    /// `GET`/`DELETE` the params form the query string; for `POST` they are
    /// the form-encoded body. `headers` are merged over the default headers.
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Rest`] for any non-2xx response and
    /// [`TwitterError::HttpError`] for transport failures.
    #[tracing::instrument(skip(self, params, headers))]
    pub async fn dispatch(
        &self,
        surface: Surface,
        method: HttpMethod,
        path: &str,
        params: &Params,
        headers: &HeaderMap,
    ) -> Result<ApiResponse> {
        let config = self.config();

        let mut uri = format!("{}{}", config.path_prefix(surface), path);
        if method.is_read() && !params.is_empty() {
            uri.push('?');
            uri.push_str(&params.encode());
        }

        let token = self.token(surface)?;
        let url = token.consumer().site().join(&uri)?;

        let mut request_headers = (*self.http_headers()?).clone();
        request_headers.extend(headers.clone());

        let signed_params = if method.is_read() {
            Params::new()
        } else {
            params.clone()
        };
        let authorization = token.authorization(method, &url, &signed_params);

        tracing::debug!(url = %url, "dispatching request");

        let mut request = token
            .consumer()
            .http()
            .request(method.into(), url)
            .headers(request_headers)
            .header(AUTHORIZATION, authorization);
        if !method.is_read() {
            request = request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(params.encode());
        }

        let response = request.send().await?;
        let response = ApiResponse::read(response).await?;
        classify(response, &uri, &config.error_registry)
    }

    /// [`dispatch`](Self::dispatch) against the REST surface without extra headers.
    pub(crate) async fn rest_request(&self, method: HttpMethod, path: &str, params: &Params) -> Result<ApiResponse> {
        self.dispatch(Surface::Rest, method, path, params, &HeaderMap::new())
            .await
    }

    /// [`dispatch`](Self::dispatch) against the Search surface without extra headers.
    pub(crate) async fn search_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<ApiResponse> {
        self.dispatch(Surface::Search, method, path, params, &HeaderMap::new())
            .await
    }
}
