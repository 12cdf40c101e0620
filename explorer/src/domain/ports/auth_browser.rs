//! Driven port for the external browser used by OAuth redirects.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// How an authentication browser session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserOutcome {
    /// The provider redirected back to the app with this URL.
    Success(Url),
    /// The user cancelled the session.
    Cancelled,
    /// The browser was dismissed before a redirect happened.
    Dismissed,
}

define_port_error! {
    /// Errors raised when no authentication browser can be opened.
    pub enum AuthBrowserError {
        /// The platform could not open a browser session.
        Unavailable { message: String } =>
            "authentication browser unavailable: {message}",
    }
}

/// Port for opening an authentication session in a browser.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthBrowser: Send + Sync {
    /// Open `auth_url` and wait until the browser returns to `redirect`.
    async fn open_auth_session(
        &self,
        auth_url: &Url,
        redirect: &Url,
    ) -> Result<BrowserOutcome, AuthBrowserError>;
}

/// Fixture browser whose sessions are always dismissed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAuthBrowser;

#[async_trait]
impl AuthBrowser for FixtureAuthBrowser {
    async fn open_auth_session(
        &self,
        _auth_url: &Url,
        _redirect: &Url,
    ) -> Result<BrowserOutcome, AuthBrowserError> {
        Ok(BrowserOutcome::Dismissed)
    }
}
