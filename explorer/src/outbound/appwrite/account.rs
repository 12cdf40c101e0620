//! Appwrite-backed account gateway.
//!
//! Session creation stores whichever credential the backend hands back so
//! later calls on the shared connection are authenticated.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::json;
use tracing::debug;

use super::connection::{AppwriteConnection, SessionCredential, decode};
use super::dto::{AccountDto, SessionDto};
use super::http::HttpFailure;
use crate::domain::ports::{
    AccountGateway, AccountGatewayError, AccountProfile, AccountSession, OAuthProvider,
};

/// Account gateway over the REST account, session, and avatar endpoints.
pub struct AppwriteAccountGateway {
    connection: Arc<AppwriteConnection>,
}

impl AppwriteAccountGateway {
    /// Build a gateway sharing `connection`.
    pub fn new(connection: Arc<AppwriteConnection>) -> Self {
        Self { connection }
    }

    async fn post_session(&self, user_id: &str, secret: &str) -> Result<AccountSession, HttpFailure> {
        let url = self.connection.url(&["account", "sessions", "token"])?;
        let request = self
            .connection
            .request(Method::POST, url)?
            .json(&json!({ "userId": user_id, "secret": secret }));
        let response = self.connection.execute(request).await?;
        let session = decode::<SessionDto>(&response.body, "session")?;

        let credential = if session.secret.is_empty() {
            response.fallback_cookies.map(SessionCredential::FallbackCookies)
        } else {
            Some(SessionCredential::Secret(session.secret.clone()))
        };
        if credential.is_none() {
            debug!("session created without a reusable credential");
        }
        self.connection.store_session(credential);
        Ok(session.into())
    }

    async fn delete_session(&self) -> Result<(), HttpFailure> {
        let url = self.connection.url(&["account", "sessions", "current"])?;
        let request = self.connection.request(Method::DELETE, url)?;
        self.connection.execute(request).await?;
        self.connection.store_session(None);
        Ok(())
    }

    async fn fetch_account(&self) -> Result<AccountProfile, HttpFailure> {
        let url = self.connection.url(&["account"])?;
        let request = self.connection.request(Method::GET, url)?;
        let response = self.connection.execute(request).await?;
        Ok(decode::<AccountDto>(&response.body, "account")?.into())
    }
}

#[async_trait]
impl AccountGateway for AppwriteAccountGateway {
    fn oauth_token_url(
        &self,
        provider: OAuthProvider,
        redirect: &Url,
    ) -> Result<Url, AccountGatewayError> {
        Ok(self.connection.public_url(
            &["account", "tokens", "oauth2", provider.as_str()],
            &[("success", redirect.as_str()), ("failure", redirect.as_str())],
        )?)
    }

    async fn create_session(
        &self,
        user_id: &str,
        secret: &str,
    ) -> Result<AccountSession, AccountGatewayError> {
        Ok(self.post_session(user_id, secret).await?)
    }

    async fn delete_current_session(&self) -> Result<(), AccountGatewayError> {
        if !self.connection.has_session() {
            return Err(AccountGatewayError::no_session());
        }
        Ok(self.delete_session().await?)
    }

    async fn current_account(&self) -> Result<AccountProfile, AccountGatewayError> {
        Ok(self.fetch_account().await?)
    }

    fn initials_avatar_url(&self, name: &str) -> Result<Url, AccountGatewayError> {
        Ok(self
            .connection
            .public_url(&["avatars", "initials"], &[("name", name)])?)
    }
}
