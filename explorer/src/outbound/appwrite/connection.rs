//! Shared HTTP connection to the Appwrite REST API.
//!
//! Holds the reqwest client, the endpoint and project identifiers, and the
//! session credential once a login succeeds. Identifiers are resolved on
//! every call rather than at construction, so a missing value fails the
//! call that needs it instead of startup.

use std::sync::{PoisonError, RwLock};

use reqwest::{Client, Method, RequestBuilder, Url, header};
use serde::de::DeserializeOwned;

use super::http::HttpFailure;
use crate::config::{ExplorerSettings, env_var};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const SESSION_HEADER: &str = "X-Appwrite-Session";
const FALLBACK_COOKIES_HEADER: &str = "X-Fallback-Cookies";

/// Credential proving an authenticated session on later requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SessionCredential {
    /// Session secret returned in the session body.
    Secret(String),
    /// Cookie jar echoed back by clients that cannot hold cookies.
    FallbackCookies(String),
}

impl SessionCredential {
    fn header(&self) -> (&'static str, &str) {
        match self {
            Self::Secret(secret) => (SESSION_HEADER, secret),
            Self::FallbackCookies(cookies) => (FALLBACK_COOKIES_HEADER, cookies),
        }
    }
}

/// Status-checked response body plus the headers the adapters care about.
#[derive(Debug)]
pub(super) struct RawResponse {
    pub(super) body: Vec<u8>,
    pub(super) fallback_cookies: Option<String>,
}

/// Client, endpoint, and session state shared by the Appwrite adapters.
pub struct AppwriteConnection {
    client: Client,
    endpoint: Option<String>,
    project_id: Option<String>,
    session: RwLock<Option<SessionCredential>>,
}

impl AppwriteConnection {
    /// Build a connection using a reqwest client with the configured request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: &ExplorerSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.appwrite_endpoint.clone(),
            project_id: settings.project_id.clone(),
            session: RwLock::new(None),
        })
    }

    /// Whether a session credential is held.
    pub fn has_session(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(super) fn store_session(&self, credential: Option<SessionCredential>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = credential;
    }

    pub(super) fn project_id(&self) -> Result<&str, HttpFailure> {
        required(self.project_id.as_deref(), "project_id")
    }

    fn endpoint(&self) -> Result<Url, HttpFailure> {
        let raw = required(self.endpoint.as_deref(), "appwrite_endpoint")?;
        Url::parse(raw).map_err(|error| {
            HttpFailure::Configuration(format!(
                "{} is not a valid URL: {error}",
                env_var("appwrite_endpoint")
            ))
        })
    }

    /// Endpoint URL with `segments` appended as escaped path segments.
    pub(super) fn url(&self, segments: &[&str]) -> Result<Url, HttpFailure> {
        let mut url = self.endpoint()?;
        url.path_segments_mut()
            .map_err(|()| {
                HttpFailure::Configuration(format!(
                    "{} cannot carry a path",
                    env_var("appwrite_endpoint")
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL fetched outside this client (by an image view or a browser), so
    /// the project travels as a query parameter instead of a header.
    pub(super) fn public_url(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Url, HttpFailure> {
        let mut url = self.url(segments)?;
        let project_id = self.project_id()?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("project", project_id);
        Ok(url)
    }

    /// Start a request carrying the project and session headers.
    pub(super) fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, HttpFailure> {
        let mut request = self
            .client
            .request(method, url)
            .header(PROJECT_HEADER, self.project_id()?)
            .header(header::ACCEPT, "application/json");
        if let Some(credential) = self
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            let (name, value) = credential.header();
            request = request.header(name, value);
        }
        Ok(request)
    }

    /// Send `request` and return its body, mapping transport and status
    /// failures.
    pub(super) async fn execute(&self, request: RequestBuilder) -> Result<RawResponse, HttpFailure> {
        let response = request
            .send()
            .await
            .map_err(|error| HttpFailure::from_transport(&error))?;

        let status = response.status();
        let fallback_cookies = response
            .headers()
            .get(FALLBACK_COOKIES_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|error| HttpFailure::from_transport(&error))?;
        if !status.is_success() {
            return Err(HttpFailure::from_status(status, body.as_ref()));
        }
        Ok(RawResponse {
            body: body.to_vec(),
            fallback_cookies,
        })
    }
}

pub(super) fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, HttpFailure> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| HttpFailure::Configuration(format!("{} is not set", env_var(field))))
}

pub(super) fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, HttpFailure> {
    serde_json::from_slice(body)
        .map_err(|error| HttpFailure::Decode(format!("invalid {what} payload: {error}")))
}
