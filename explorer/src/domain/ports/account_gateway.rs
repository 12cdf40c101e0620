//! Driven port for the backend's account API.
//!
//! Authentication protocol internals stay with the backend; the port only
//! exposes the handful of calls the OAuth redirect flow needs.

use std::fmt;

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// OAuth identity providers offered at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    /// Google accounts.
    Google,
}

impl OAuthProvider {
    /// Provider slug used in backend URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated session created by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSession {
    /// Backend session identifier.
    pub id: String,
    /// Account the session belongs to.
    pub user_id: String,
}

/// Profile of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    /// Backend account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact e-mail address.
    pub email: String,
}

define_port_error! {
    /// Errors raised by account operations.
    pub enum AccountGatewayError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "account transport failed: {message}",
        /// The backend answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "account request rejected with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "account response decode failed: {message}",
        /// A configuration value needed for the call is absent or invalid.
        Configuration { message: String } =>
            "account configuration unusable: {message}",
        /// The operation requires a session and none is active.
        NoSession => "no active account session",
    }
}

/// Port for account and session management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Build the URL that starts an OAuth token flow returning to `redirect`.
    fn oauth_token_url(
        &self,
        provider: OAuthProvider,
        redirect: &Url,
    ) -> Result<Url, AccountGatewayError>;

    /// Exchange the redirect's user id and secret for a session.
    async fn create_session(
        &self,
        user_id: &str,
        secret: &str,
    ) -> Result<AccountSession, AccountGatewayError>;

    /// End the current session.
    async fn delete_current_session(&self) -> Result<(), AccountGatewayError>;

    /// Fetch the profile bound to the current session.
    async fn current_account(&self) -> Result<AccountProfile, AccountGatewayError>;

    /// Build the URL of an initials avatar for `name`.
    fn initials_avatar_url(&self, name: &str) -> Result<Url, AccountGatewayError>;
}
