//! The request pipeline every endpoint binding goes through.
use std::{fmt, time::Duration};

use once_cell::sync::Lazy;
use reqwest::{header, Method, Request, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::{api::read_error, errors::Error};

/// `User-Agent` used in all requests to Box.
pub static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Root of the production API.
pub static DEFAULT_BASE_URL: &str = "https://api.box.com/2.0/";

/// Shorthand for requests without a body.
pub(crate) const NO_BODY: Option<&()> = None;

/// Client configuration. Immutable once handed to a [`Client`].
#[derive(Clone)]
pub struct Config {
    base_url: Url,
    access_token: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Config {
    /// Configuration for the production API, authenticated with a
    /// bearer `access_token`.
    ///
    /// # Panics
    ///
    /// Never, unless [`DEFAULT_BASE_URL`] is broken.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        static BASE: Lazy<Url> = Lazy::new(|| Url::parse(DEFAULT_BASE_URL).unwrap());

        Self {
            base_url: (*BASE).clone(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Talk to another API root, e.g. a mock server.
    ///
    /// # Errors
    ///
    /// - `base_url` isn't a valid url
    pub fn with_base_url(mut self, base_url: &str) -> crate::Result<Self> {
        let mut url = Url::parse(base_url)?;

        // `Url::join` replaces the last segment unless it ends in a slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        self.base_url = url;
        Ok(self)
    }

    /// Total timeout of a request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout of the connect phase only.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// API root that request paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// A Box API client.
///
/// Cheap to clone, and holds no per-request state.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
}

impl Client {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// - the TLS backend fails to initialize
    pub fn new(config: Config) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(Error::InvalidRequest)?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn url(&self, path: &str) -> crate::Result<Url> {
        // A leading slash would discard the path of the base, i.e. `/2.0/`.
        Ok(self.config.base_url.join(path.trim_start_matches('/'))?)
    }

    fn url_from_segments(&self, segments: &[&str]) -> crate::Result<Url> {
        // `push` silently drops these instead of encoding them.
        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::InvalidPathSegment((*segment).to_owned()));
        }

        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Build an authenticated request. `path` is relative to the API root
    /// and `body`, if any, is sent as JSON.
    ///
    /// Nothing is sent over the network.
    ///
    /// # Errors
    ///
    /// - invalid path
    /// - the body fails to serialize
    /// - the access token isn't a valid header value
    pub fn new_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> crate::Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;

        self.build_request(method, url, body)
    }

    /// Like [`Client::new_request`], but the path is given as segments
    /// below the API root. Each segment is percent-encoded, so an id
    /// containing `/`, `?` or `#` can't escape its own segment.
    ///
    /// ```
    /// # use boxcloud::{Client, Config, Method};
    /// let client = Client::new(Config::new("token")).unwrap();
    /// let req = client
    ///     .new_request_at(Method::GET, &["users", "a/b"], None::<&()>)
    ///     .unwrap();
    /// assert_eq!(req.url().as_str(), "https://api.box.com/2.0/users/a%2Fb");
    /// ```
    ///
    /// # Errors
    ///
    /// - a segment is empty, `.` or `..`
    /// - the body fails to serialize
    /// - the access token isn't a valid header value
    pub fn new_request_at<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> crate::Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_from_segments(segments)?;

        self.build_request(method, url, body)
    }

    fn build_request<B>(&self, method: Method, url: Url, body: Option<&B>) -> crate::Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.config.access_token);

        if let Some(body) = body {
            let json = serde_json::to_vec(body).map_err(Error::InvalidBody)?;

            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(json);
        }

        builder.build().map_err(Error::InvalidRequest)
    }

    async fn execute(&self, req: Request) -> crate::Result<Response> {
        debug!("{} {}", req.method(), req.url());

        let res = self.http.execute(req).await?;
        let status = res.status();

        debug!("{}", status);

        if status.is_success() {
            Ok(res)
        } else {
            Err(read_error(res).await)
        }
    }

    /// Send a request, ignoring the response body.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - non-2xx status
    pub async fn send(&self, req: Request) -> crate::Result<StatusCode> {
        let res = self.execute(req).await?;

        Ok(res.status())
    }

    /// Send a request and parse the response body as JSON.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - non-2xx status
    /// - the body doesn't match `T`
    pub async fn send_json<T: DeserializeOwned>(&self, req: Request) -> crate::Result<T> {
        let res = self.execute(req).await?;
        let body = res.bytes().await?;

        trace!("{}", String::from_utf8_lossy(&body));

        Ok(serde_json::from_slice(&body)?)
    }
}
