//! Authentication endpoints.
//!
//! Sign-in, sign-up and password recovery are bootstrap calls: they run
//! without a bearer token and outside the 401-refresh machine, because a
//! 401 here means the user's credentials are wrong, not that a token went
//! stale. On success the session lands in the credential store, with the
//! refresh token picked up from the `x-refresh-token` response header.

use super::{refresh_token_hint, PendingRequest, TasklineClient};
use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::types::{
    RecoverPasswordRequest, SendRecoverEmailRequest, SessionInfo, SignInRequest, SignUpRequest,
};

impl TasklineClient {
    /// Sign in with email and password, persisting the session on success.
    pub async fn sign_in(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<SessionInfo> {
        let body = SignInRequest {
            email: email.into(),
            password: password.into(),
        };
        let request = PendingRequest::post("/auth/signin").json(&body)?;
        let response = self.dispatch_public(request).await?;
        self.establish_session(response).await
    }

    /// Register a new account. The server signs the account in directly,
    /// so this persists the session just like [`sign_in`](Self::sign_in).
    pub async fn sign_up(&self, body: SignUpRequest) -> Result<SessionInfo> {
        let request = PendingRequest::post("/auth/signup").json(&body)?;
        let response = self.dispatch_public(request).await?;
        self.establish_session(response).await
    }

    /// Ask the server to email a password recovery link.
    pub async fn send_recover_email(&self, email: impl Into<String>) -> Result<()> {
        let body = SendRecoverEmailRequest {
            email: email.into(),
        };
        let request = PendingRequest::post("/auth/send-recover-email").json(&body)?;
        self.dispatch_public(request).await?;
        Ok(())
    }

    /// Set a new password using the one-time token from the recovery email.
    pub async fn recover_password(
        &self,
        token: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Result<()> {
        let token = token.into();
        let body = RecoverPasswordRequest {
            new_password: new_password.into(),
        };
        let request = PendingRequest::post("/auth/recover-password")
            .query("token", token)
            .json(&body)?;
        self.dispatch_public(request).await?;
        Ok(())
    }

    /// Decode a session payload and store it, pairing the access token
    /// from the body with the refresh token from the response header.
    async fn establish_session(&self, response: reqwest::Response) -> Result<SessionInfo> {
        let refresh_token = refresh_token_hint(&response);
        let bytes = response.bytes().await.map_err(Error::Transport)?;
        let session: SessionInfo = serde_json::from_slice(&bytes)?;
        self.store.save(&Credentials {
            access_token: Some(session.access_token.clone()),
            refresh_token,
            user: Some(session.user.clone()),
        });
        Ok(session)
    }
}
