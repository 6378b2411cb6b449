use reqwest::{Client as ReqwestClient, Method, Request, Url};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    config::{AuthScheme, AuthToken},
    error::Error,
    result::Result,
};

const AUTH_HEADER: &str = "X-Auth-Token";
const AUTH_PARAM: &str = "auth_token";

/// A decoded JSON reply, exactly as Pinboard returned it.
pub type Reply = Map<String, Value>;

/// Handle to the Pinboard v2 API.
///
/// Every endpoint method sends exactly one request and returns the decoded
/// body. Nothing is retried and no state changes between calls, so a client
/// can be cloned and shared freely.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: ReqwestClient,
    pub(crate) base_url: Url,
    pub(crate) token: AuthToken,
    pub(crate) auth: AuthScheme,
}

impl Client {
    /// Returns the URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns how the token is attached to requests.
    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth
    }

    /// Checks credentials and API reachability. Does not count against rate limits.
    ///
    /// # Errors
    ///
    /// Fails with the status-derived [`Error`] variant on a non-success
    /// response, or [`Error::Network`] if no response arrives.
    pub async fn hello(&self) -> Result<Reply> {
        let request = self.prepare::<(), ()>(Method::GET, &["hello"], None, None)?;
        self.send(request).await
    }

    /// Returns the timestamps of the last change to the account's bookmarks
    /// and notes (`last_update`, `last_update_notes`).
    ///
    /// # Errors
    ///
    /// Same as [`Client::hello`].
    pub async fn last_update(&self) -> Result<Reply> {
        let request = self.prepare::<(), ()>(Method::GET, &["last_update"], None, None)?;
        self.send(request).await
    }

    /// Resolves `segments` under the base URL, percent-encoding each one and
    /// ending with a slash.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // ClientBuilder::build only accepts base URLs that can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    /// Builds the outgoing request without sending it.
    pub(crate) fn prepare<Q, F>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        form: Option<&F>,
    ) -> Result<Request>
    where
        Q: Serialize + ?Sized,
        F: Serialize + ?Sized,
    {
        let mut builder = self.http.request(method, self.endpoint(segments));
        if let Some(query) = query {
            builder = builder.query(query);
        }
        builder = match self.auth {
            AuthScheme::Header => builder.header(AUTH_HEADER, self.token.as_str()),
            AuthScheme::Query => builder.query(&[(AUTH_PARAM, self.token.as_str())]),
        };
        if let Some(form) = form {
            builder = builder.form(form);
        }
        builder.build().map_err(Into::into)
    }

    /// Sends a prepared request and classifies the response.
    pub(crate) async fn send(&self, request: Request) -> Result<Reply> {
        log::info!(
            "{} request for {} dispatched",
            request.method(),
            request.url().path()
        );
        let response = self.http.execute(request).await?;
        let status = response.status();
        log::debug!("response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, body));
        }
        let bytes = response.bytes().await?;
        decode(&bytes)
    }
}

fn decode(bytes: &[u8]) -> Result<Reply> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::Decode(format!("expected a JSON object, got `{other}`"))),
        Err(e) => Err(Error::Decode(e.to_string())),
    }
}
