//! OAuth consumer and access-token handles.
//!
//! Each client lazily builds one [`AccessToken`] per [`Surface`]. A token
//! owns its [`Consumer`], which in turn owns the HTTP connection settings
//! (site, proxy, timeout) captured when it was built. Once built, a token is
//! kept for the lifetime of the client; later configuration changes are not
//! picked up.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::redirect::Policy;
use reqwest::{Client, Proxy};
use url::Url;

use crate::client::{HttpMethod, Surface};
use crate::config::Config;
use crate::error::Result;
use crate::oauth::{self, SigningKeys};
use crate::params::Params;

/// An OAuth key/secret pair.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Whether either half is empty.
    pub fn is_incomplete(&self) -> bool {
        self.key.is_empty() || self.secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"XXXX")
            .finish()
    }
}

/// Consumer credentials for a client: the per-instance override when given,
/// else the configured defaults, else empty strings.
pub(crate) fn resolve_consumer(overrides: Option<&Credentials>, config: &Config) -> Credentials {
    let resolved = match overrides {
        Some(creds) => creds.clone(),
        None => Credentials::new(
            config.oauth_consumer_token.clone().unwrap_or_default(),
            config.oauth_consumer_secret.clone().unwrap_or_default(),
        ),
    };
    if resolved.is_incomplete() {
        tracing::warn!("OAuth consumer credentials are empty; requests will be rejected by the server");
    }
    resolved
}

/// Application identity plus the connection it signs requests for.
pub struct Consumer {
    credentials: Credentials,
    site: Url,
    proxy: Option<String>,
    timeout: Duration,
    request_token_path: String,
    access_token_path: String,
    authorize_path: String,
    http: Client,
}

impl fmt::Debug for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("key", &self.credentials.key)
            .field("site", &self.site.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Consumer {
    /// Build a consumer for `surface` from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the site or proxy URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &Config, surface: Surface, credentials: Credentials) -> Result<Self> {
        let site = Url::parse(&config.site_url(surface))?;
        let proxy = config.proxy_url();

        let mut builder = Client::builder()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .redirect(Policy::none())
            .timeout(config.timeout);
        if let Some(proxy_url) = &proxy {
            builder = builder.proxy(Proxy::all(proxy_url.as_str())?);
        }
        let http = builder.build()?;

        tracing::debug!(site = %site, ?surface, proxied = proxy.is_some(), "built OAuth consumer");

        Ok(Self {
            credentials,
            site,
            proxy,
            timeout: config.timeout,
            request_token_path: config.oauth_request_token_path.clone(),
            access_token_path: config.oauth_access_token_path.clone(),
            authorize_path: config.oauth_authorize_path.clone(),
            http,
        })
    }

    pub fn key(&self) -> &str {
        &self.credentials.key
    }

    pub fn secret(&self) -> &str {
        &self.credentials.secret
    }

    pub fn site(&self) -> &Url {
        &self.site
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Read timeout applied to every request through this consumer.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// URL of the OAuth request-token endpoint.
    pub fn request_token_url(&self) -> Result<Url> {
        Ok(self.site.join(&self.request_token_path)?)
    }

    /// URL of the OAuth access-token endpoint.
    pub fn access_token_url(&self) -> Result<Url> {
        Ok(self.site.join(&self.access_token_path)?)
    }

    /// URL the user visits to authorize `request_token`.
    pub fn authorize_url(&self, request_token: &str) -> Result<Url> {
        let mut url = self.site.join(&self.authorize_path)?;
        url.query_pairs_mut().append_pair("oauth_token", request_token);
        Ok(url)
    }
}

/// A user's access credentials bound to a consumer.
pub struct AccessToken {
    consumer: Consumer,
    credentials: Credentials,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("consumer", &self.consumer)
            .field("token", &self.credentials.key)
            .finish_non_exhaustive()
    }
}

impl AccessToken {
    pub fn new(consumer: Consumer, credentials: Credentials) -> Self {
        Self {
            consumer,
            credentials,
        }
    }

    pub fn consumer(&self) -> &Consumer {
        &self.consumer
    }

    pub fn key(&self) -> &str {
        &self.credentials.key
    }

    pub(crate) fn secret(&self) -> &str {
        &self.credentials.secret
    }

    /// `Authorization` header value for one request.
    pub(crate) fn authorization(&self, method: HttpMethod, url: &Url, params: &Params) -> String {
        let keys = SigningKeys {
            consumer_key: self.consumer.key(),
            consumer_secret: self.consumer.secret(),
            token: self.key(),
            token_secret: self.secret(),
        };
        oauth::authorization_header(&keys, method, url, params)
    }
}

/// Per-client, per-surface token slots, each filled at most once.
#[derive(Default)]
pub(crate) struct TokenCache {
    rest: OnceCell<Arc<AccessToken>>,
    search: OnceCell<Arc<AccessToken>>,
}

impl TokenCache {
    fn slot(&self, surface: Surface) -> &OnceCell<Arc<AccessToken>> {
        match surface {
            Surface::Rest => &self.rest,
            Surface::Search => &self.search,
        }
    }

    /// Cached token for `surface`, building it on first use.
    pub(crate) fn get_or_build<F>(&self, surface: Surface, build: F) -> Result<Arc<AccessToken>>
    where
        F: FnOnce() -> Result<AccessToken>,
    {
        self.slot(surface)
            .get_or_try_init(|| build().map(Arc::new))
            .cloned()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, surface: Surface) -> Option<&Arc<AccessToken>> {
        self.slot(surface).get()
    }
}
