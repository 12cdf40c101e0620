//! OAuth browser-redirect login and session management.
//!
//! Login opens the provider in an external browser, waits for the redirect,
//! and exchanges the `userId`/`secret` pair it carries for a backend session.
//! Every step is a single attempt: failures are logged and reported as
//! `false` so the caller can show an alert and let the user try again.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::domain::ports::{
    AccountGateway, AccountGatewayError, AccountProfile, AccountSession, AuthBrowser,
    AuthBrowserError, BrowserOutcome, OAuthProvider,
};

/// Credentials carried by the OAuth redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCallback {
    /// Account identifier (`userId` query parameter).
    pub user_id: String,
    /// One-time secret (`secret` query parameter).
    pub secret: String,
}

/// Errors returned by [`OAuthCallback::from_redirect`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OAuthCallbackError {
    /// The redirect carries no non-empty `secret` parameter.
    #[error("redirect is missing the `secret` parameter")]
    MissingSecret,
    /// The redirect carries no non-empty `userId` parameter.
    #[error("redirect is missing the `userId` parameter")]
    MissingUserId,
}

impl OAuthCallback {
    /// Extract the callback credentials from a redirect URL.
    ///
    /// # Errors
    ///
    /// Returns an [`OAuthCallbackError`] naming the first missing parameter.
    ///
    /// # Examples
    /// ```
    /// use explorer::domain::auth::OAuthCallback;
    /// use url::Url;
    ///
    /// let url = Url::parse("explorer://?secret=s3cr3t&userId=u1").expect("valid url");
    /// let callback = OAuthCallback::from_redirect(&url).expect("complete redirect");
    /// assert_eq!(callback.user_id, "u1");
    /// ```
    pub fn from_redirect(url: &Url) -> Result<Self, OAuthCallbackError> {
        let param = |key: &str| {
            url.query_pairs()
                .find(|(name, value)| name == key && !value.is_empty())
                .map(|(_, value)| value.into_owned())
        };
        let secret = param("secret").ok_or(OAuthCallbackError::MissingSecret)?;
        let user_id = param("userId").ok_or(OAuthCallbackError::MissingUserId)?;
        Ok(Self { user_id, secret })
    }
}

#[derive(Debug, Error)]
enum LoginError {
    #[error(transparent)]
    Account(#[from] AccountGatewayError),
    #[error(transparent)]
    Browser(#[from] AuthBrowserError),
    #[error("browser session ended without a redirect: {0:?}")]
    NotCompleted(BrowserOutcome),
    #[error(transparent)]
    Callback(#[from] OAuthCallbackError),
}

/// The signed-in user with a display avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Account profile.
    pub profile: AccountProfile,
    /// Initials avatar, when one could be built.
    pub avatar: Option<Url>,
}

/// Login, logout, and current-user lookup over the account ports.
pub struct AuthService {
    account: Arc<dyn AccountGateway>,
    browser: Arc<dyn AuthBrowser>,
    redirect_uri: Url,
}

impl AuthService {
    /// Create a service returning from OAuth to `redirect_uri`.
    pub fn new(
        account: Arc<dyn AccountGateway>,
        browser: Arc<dyn AuthBrowser>,
        redirect_uri: Url,
    ) -> Self {
        Self {
            account,
            browser,
            redirect_uri,
        }
    }

    /// Run the OAuth redirect flow. Returns whether a session was created.
    pub async fn login(&self, provider: OAuthProvider) -> bool {
        match self.try_login(provider).await {
            Ok(session) => {
                info!(%provider, user_id = %session.user_id, "login succeeded");
                true
            }
            Err(error) => {
                warn!(%provider, %error, "login failed");
                false
            }
        }
    }

    async fn try_login(&self, provider: OAuthProvider) -> Result<AccountSession, LoginError> {
        let auth_url = self.account.oauth_token_url(provider, &self.redirect_uri)?;
        let outcome = self
            .browser
            .open_auth_session(&auth_url, &self.redirect_uri)
            .await?;
        let BrowserOutcome::Success(redirect) = outcome else {
            return Err(LoginError::NotCompleted(outcome));
        };
        let callback = OAuthCallback::from_redirect(&redirect)?;
        Ok(self
            .account
            .create_session(&callback.user_id, &callback.secret)
            .await?)
    }

    /// End the current session. Returns whether it was deleted.
    pub async fn logout(&self) -> bool {
        match self.account.delete_current_session().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "logout failed");
                false
            }
        }
    }

    /// Look up the signed-in user, or `None` when there is none.
    pub async fn current_user(&self) -> Option<CurrentUser> {
        let profile = match self.account.current_account().await {
            Ok(profile) => profile,
            Err(error) => {
                warn!(error_kind = error.kind(), %error, "current user lookup failed");
                return None;
            }
        };
        let avatar = self
            .account
            .initials_avatar_url(&profile.name)
            .inspect_err(|error| warn!(%error, "initials avatar unavailable"))
            .ok();
        Some(CurrentUser { profile, avatar })
    }
}
