//! Construction of a [`Client`].
//!
//! ```no_run
//! # async fn run() -> pbapi2::Result<()> {
//! use std::time::Duration;
//! use pbapi2::{AuthScheme, Client};
//!
//! let client = Client::builder("user:0123456789ABCDEF")
//!     .test_mode(true)
//!     .auth(AuthScheme::Query)
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! client.hello().await?;
//! # Ok(())
//! # }
//! ```

use std::{env, fmt, time::Duration};

use reqwest::{Client as ReqwestClient, Url};

use crate::{error::Error, result::Result, Client};

/// Base URL of the live API.
pub const LIVE_BASE_URL: &str = "https://api.pinboard.in/v2/";

/// Base URL of the test API.
pub const TEST_BASE_URL: &str = "https://api.test.pinboard.in/v2/";

const TOKEN_VAR: &str = "PINBOARD_AUTH_TOKEN";
const TEST_MODE_VAR: &str = "PINBOARD_TEST_MODE";
const BASE_URL_VAR: &str = "PINBOARD_API_URL";

/// Where the auth token travels on each request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// `X-Auth-Token` request header.
    #[default]
    Header,
    /// `auth_token` query parameter.
    Query,
}

/// The account credential, usually `username:HEX`.
///
/// Kept out of `Debug` output so clients can be logged freely.
#[derive(Clone)]
pub(crate) struct AuthToken(String);

impl AuthToken {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Builder for a [`Client`] with non-default settings.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    token: AuthToken,
    test_mode: bool,
    base_url: Option<String>,
    auth: AuthScheme,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ClientBuilder {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        ClientBuilder {
            token: AuthToken(token.into()),
            test_mode: false,
            base_url: None,
            auth: AuthScheme::default(),
            timeout: None,
            user_agent: concat!("pbapi2/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sends requests to the test API instead of the live one.
    ///
    /// Ignored when [`base_url`](Self::base_url) is set.
    pub fn test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = enabled;
        self
    }

    /// Sends requests to an arbitrary base URL, e.g. a local mock server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Chooses how the token is attached to requests.
    pub fn auth(mut self, scheme: AuthScheme) -> Self {
        self.auth = scheme;
        self
    }

    /// Fails any request that takes longer than `timeout` as a network error.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL does not parse or cannot
    /// carry a path, and [`Error::Network`] if the HTTP client cannot be
    /// initialised.
    pub fn build(self) -> Result<Client> {
        let raw = match self.base_url {
            Some(url) => url,
            None if self.test_mode => TEST_BASE_URL.to_string(),
            None => LIVE_BASE_URL.to_string(),
        };
        let base_url = parse_base_url(&raw)?;

        let mut http = ReqwestClient::builder().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build()?;

        log::debug!("client configured for {}", base_url);
        Ok(Client {
            http,
            base_url,
            token: self.token,
            auth: self.auth,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|_| Error::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

impl Client {
    /// Creates a client for the live API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the HTTP client cannot be initialised.
    pub fn new(token: impl Into<String>) -> Result<Client> {
        ClientBuilder::new(token).build()
    }

    /// Starts configuring a client.
    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    /// Creates a client from `PINBOARD_AUTH_TOKEN`, `PINBOARD_TEST_MODE` and
    /// `PINBOARD_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] when no token is set, plus anything
    /// [`ClientBuilder::build`] can return.
    pub fn from_env() -> Result<Client> {
        let token = env::var(TOKEN_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::MissingConfig(TOKEN_VAR))?;

        let mut builder = ClientBuilder::new(token);
        if let Ok(flag) = env::var(TEST_MODE_VAR) {
            builder = builder.test_mode(truthy(&flag));
        }
        if let Ok(url) = env::var(BASE_URL_VAR) {
            builder = builder.base_url(url);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-wide; tests touching them take turns.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_env(token: Option<&str>, test_mode: Option<&str>, url: Option<&str>) {
        for (var, value) in [(TOKEN_VAR, token), (TEST_MODE_VAR, test_mode), (BASE_URL_VAR, url)] {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }
    }

    #[test]
    fn live_mode_is_the_default() {
        let client = Client::new("user:token").unwrap();
        assert_eq!(client.base_url().as_str(), LIVE_BASE_URL);
    }

    #[test]
    fn test_mode_switches_base_url() {
        let client = Client::builder("user:token").test_mode(true).build().unwrap();
        assert_eq!(client.base_url().as_str(), TEST_BASE_URL);
    }

    #[test]
    fn explicit_base_url_wins_and_gains_a_slash() {
        let client = Client::builder("user:token")
            .test_mode(true)
            .base_url("http://127.0.0.1:8080/v2")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8080/v2/");
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let err = Client::builder("user:token")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = Client::builder("user:token")
            .base_url("mailto:someone@example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn token_is_redacted_from_debug() {
        let client = Client::new("user:SECRET").unwrap();
        let printed = format!("{client:?}");
        assert!(!printed.contains("SECRET"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn truthy_flags() {
        for yes in ["1", "true", "YES", " yes "] {
            assert!(truthy(yes), "{yes}");
        }
        for no in ["0", "false", "", "on", "nope"] {
            assert!(!truthy(no), "{no}");
        }
    }

    #[test]
    fn from_env_needs_a_token() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        set_env(None, None, None);
        assert!(matches!(
            Client::from_env(),
            Err(Error::MissingConfig("PINBOARD_AUTH_TOKEN"))
        ));

        set_env(Some("   "), None, None);
        assert!(matches!(Client::from_env(), Err(Error::MissingConfig(_))));

        set_env(None, None, None);
    }

    #[test]
    fn from_env_reads_mode_and_base_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        set_env(Some("user:token"), None, None);
        let client = Client::from_env().unwrap();
        assert_eq!(client.base_url().as_str(), LIVE_BASE_URL);

        set_env(Some("user:token"), Some("yes"), None);
        let client = Client::from_env().unwrap();
        assert_eq!(client.base_url().as_str(), TEST_BASE_URL);

        set_env(Some("user:token"), Some("1"), Some("http://127.0.0.1:9000/v2"));
        let client = Client::from_env().unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9000/v2/");

        set_env(Some("user:token"), None, Some("not a url"));
        assert!(matches!(Client::from_env(), Err(Error::InvalidUrl(_))));

        set_env(None, None, None);
    }
}
