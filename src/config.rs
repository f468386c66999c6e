//! Connection configuration.
//!
//! A [`Config`] describes where the REST and Search surfaces live, how to
//! reach them (proxy, timeout) and how the client identifies itself. A
//! process-wide default is shared by every client that is not given its own
//! configuration; see [`configure`], [`current`] and [`reset`].

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::client::Surface;
use crate::error::{ErrorRegistry, TwitterError};

const DEFAULT_APPLICATION_URL: &str = "https://github.com/twitter-rest/twitter-rest";

static DEFAULT_CONFIG: Lazy<RwLock<Arc<Config>>> =
    Lazy::new(|| RwLock::new(Arc::new(Config::default())));

/// Transport protocol for a surface or proxy.
///
/// `Ssl` is accepted as an alias for `Https`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
    Ssl,
}

impl Protocol {
    /// URL scheme for this protocol.
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https | Protocol::Ssl => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for Protocol {
    type Err = TwitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            "ssl" => Ok(Protocol::Ssl),
            other => Err(TwitterError::InvalidArgument(format!(
                "unknown protocol '{other}'"
            ))),
        }
    }
}

/// Connection parameters for the REST and Search surfaces.
#[derive(Clone)]
pub struct Config {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub path_prefix: String,

    pub search_protocol: Protocol,
    pub search_host: String,
    pub search_port: u16,
    pub search_path_prefix: String,

    pub proxy_protocol: Protocol,
    pub proxy_host: Option<String>,
    pub proxy_port: u16,
    pub proxy_user: Option<String>,
    pub proxy_pass: Option<String>,

    /// Appended in brackets to the library's own `User-Agent`.
    pub user_agent: String,
    pub application_name: String,
    pub application_version: String,
    pub application_url: String,
    /// Source tag attached to every posted status.
    pub source: String,
    pub timeout: Duration,

    pub oauth_consumer_token: Option<String>,
    pub oauth_consumer_secret: Option<String>,
    pub oauth_request_token_path: String,
    pub oauth_access_token_path: String,
    pub oauth_authorize_path: String,

    pub error_registry: Arc<ErrorRegistry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: Protocol::Ssl,
            host: "twitter.com".to_string(),
            port: 443,
            path_prefix: String::new(),
            search_protocol: Protocol::Http,
            search_host: "search.twitter.com".to_string(),
            search_port: 80,
            search_path_prefix: String::new(),
            proxy_protocol: Protocol::Http,
            proxy_host: None,
            proxy_port: 8080,
            proxy_user: None,
            proxy_pass: None,
            user_agent: "default".to_string(),
            application_name: env!("CARGO_PKG_NAME").to_string(),
            application_version: env!("CARGO_PKG_VERSION").to_string(),
            application_url: DEFAULT_APPLICATION_URL.to_string(),
            source: env!("CARGO_PKG_NAME").to_string(),
            timeout: Duration::from_secs(20),
            oauth_consumer_token: None,
            oauth_consumer_secret: None,
            oauth_request_token_path: "/oauth/request_token".to_string(),
            oauth_access_token_path: "/oauth/access_token".to_string(),
            oauth_authorize_path: "/oauth/authorize".to_string(),
            error_registry: ErrorRegistry::global(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("site", &self.site_url(Surface::Rest))
            .field("path_prefix", &self.path_prefix)
            .field("search_site", &self.site_url(Surface::Search))
            .field("search_path_prefix", &self.search_path_prefix)
            .field("proxy_host", &self.proxy_host)
            .field("timeout", &self.timeout)
            .field("application_name", &self.application_name)
            .field("application_version", &self.application_version)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Build a configuration from defaults overlaid with `TWITTER_*`
    /// environment variables.
    ///
    /// Recognized variables: `TWITTER_HOST`, `TWITTER_PORT`,
    /// `TWITTER_PROTOCOL`, `TWITTER_SEARCH_HOST`, `TWITTER_SEARCH_PORT`,
    /// `TWITTER_SEARCH_PROTOCOL`, `TWITTER_CONSUMER_KEY`,
    /// `TWITTER_CONSUMER_SECRET`, `TWITTER_PROXY_HOST`, `TWITTER_PROXY_PORT`,
    /// `TWITTER_PROXY_USER`, `TWITTER_PROXY_PASS`, `TWITTER_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or protocol variable cannot be parsed.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("TWITTER_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("TWITTER_PORT") {
            config.port = parse_var("TWITTER_PORT", &port)?;
        }
        if let Some(protocol) = lookup("TWITTER_PROTOCOL") {
            config.protocol = protocol.parse()?;
        }
        if let Some(host) = lookup("TWITTER_SEARCH_HOST") {
            config.search_host = host;
        }
        if let Some(port) = lookup("TWITTER_SEARCH_PORT") {
            config.search_port = parse_var("TWITTER_SEARCH_PORT", &port)?;
        }
        if let Some(protocol) = lookup("TWITTER_SEARCH_PROTOCOL") {
            config.search_protocol = protocol.parse()?;
        }
        config.oauth_consumer_token = lookup("TWITTER_CONSUMER_KEY");
        config.oauth_consumer_secret = lookup("TWITTER_CONSUMER_SECRET");
        config.proxy_host = lookup("TWITTER_PROXY_HOST");
        if let Some(port) = lookup("TWITTER_PROXY_PORT") {
            config.proxy_port = parse_var("TWITTER_PROXY_PORT", &port)?;
        }
        config.proxy_user = lookup("TWITTER_PROXY_USER");
        config.proxy_pass = lookup("TWITTER_PROXY_PASS");
        if let Some(secs) = lookup("TWITTER_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_var("TWITTER_TIMEOUT_SECS", &secs)?);
        }

        Ok(config)
    }

    /// `"<scheme>://<host>:<port>"` for the given surface.
    pub fn site_url(&self, surface: Surface) -> String {
        let (protocol, host, port) = match surface {
            Surface::Rest => (self.protocol, &self.host, self.port),
            Surface::Search => (self.search_protocol, &self.search_host, self.search_port),
        };
        format!("{}://{}:{}", protocol.scheme(), host, port)
    }

    /// Path prefix prepended to every request path on the given surface.
    pub fn path_prefix(&self, surface: Surface) -> &str {
        match surface {
            Surface::Rest => &self.path_prefix,
            Surface::Search => &self.search_path_prefix,
        }
    }

    /// Proxy URL, or `None` when no proxy host is configured.
    ///
    /// Renders `"<protocol>://[<user>:<pass>@]<host>:<port>"`; credentials are
    /// included only when both user and password are set.
    pub fn proxy_url(&self) -> Option<String> {
        let host = self.proxy_host.as_deref().filter(|h| !h.is_empty())?;
        let credentials = match (&self.proxy_user, &self.proxy_pass) {
            (Some(user), Some(pass)) => format!("{user}:{pass}@"),
            _ => String::new(),
        };
        Some(format!(
            "{}://{}{}:{}",
            self.proxy_protocol.scheme(),
            credentials,
            host,
            self.proxy_port
        ))
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> crate::Result<T> {
    value.trim().parse().map_err(|_| {
        TwitterError::InvalidArgument(format!("{name} has an invalid value '{value}'"))
    })
}

/// Snapshot of the process-wide default configuration.
pub fn current() -> Arc<Config> {
    DEFAULT_CONFIG.read().clone()
}

/// Mutate the process-wide default configuration.
///
/// Clients that already built their tokens or headers keep the values they
/// captured; only later first uses observe the change.
pub fn configure<F>(f: F)
where
    F: FnOnce(&mut Config),
{
    let mut guard = DEFAULT_CONFIG.write();
    let mut next = Config::clone(&guard);
    f(&mut next);
    *guard = Arc::new(next);
}

/// Restore the process-wide default configuration.
pub fn reset() {
    *DEFAULT_CONFIG.write() = Arc::new(Config::default());
}
