//! Email/password authentication calls.
//!
//! Register and login answer with either a token pair or, when the account
//! still needs its email confirmed, a message and no token. The second case is
//! [`AuthOutcome::ConfirmationRequired`] and must not be treated as a login.
//! None of these calls touch the [`SessionContext`](crate::SessionContext);
//! establishing the session is the caller's decision.

use serde::{Deserialize, Serialize};
use store::User;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{Method, RequestBody, Transport};

const CONFIRMATION_MESSAGE: &str =
    "Please check your email to confirm your account before logging in.";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// A token issued by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    pub user: User,
}

fn bearer() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthSession),
    /// The account exists but its email is unconfirmed. No token was issued.
    ConfirmationRequired {
        message: String,
        email: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthResponse {
    Token(AuthSession),
    Pending {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        requires_confirmation: bool,
    },
}

impl<T: Transport> ApiClient<T> {
    /// `POST /auth/register`
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        self.authenticate("/auth/register", email, password).await
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        self.authenticate("/auth/login", email, password).await
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, ApiError> {
        let response: AuthResponse = self
            .post_json(path, &Credentials { email, password })
            .await?;
        match response {
            AuthResponse::Token(session) => Ok(AuthOutcome::Authenticated(session)),
            AuthResponse::Pending {
                message,
                email,
                requires_confirmation,
            } => {
                if !requires_confirmation {
                    return Err(ApiError::Decode(
                        "authentication response carried no token".to_string(),
                    ));
                }
                Ok(AuthOutcome::ConfirmationRequired {
                    message: message.unwrap_or_else(|| CONFIRMATION_MESSAGE.to_string()),
                    email,
                })
            }
        }
    }

    /// `GET /auth/confirm?token_hash=..&type=..`: verify an email
    /// confirmation token from the link the user followed.
    ///
    /// The service answers with a redirect back to the app either way, so the
    /// outcome is read from the redirect target: `error=..` is a failure and
    /// `confirmed=true` a success.
    pub async fn confirm_email(&self, token_hash: &str, kind: &str) -> Result<(), ApiError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("token_hash", token_hash)
            .append_pair("type", kind)
            .finish();
        let path = format!("/auth/confirm?{query}");
        let response = self.exchange(Method::Get, &path, RequestBody::Empty).await?;

        match response.redirect_target(&self.url(&path)) {
            Some(target) => confirmation_outcome(response.status, target),
            None if response.is_success() => Ok(()),
            None => Err(ApiError::from_response(response.status, &response.body)),
        }
    }
}

fn confirmation_outcome(status: u16, target: &str) -> Result<(), ApiError> {
    let query = target.split_once('?').map_or("", |(_, query)| query);
    let query = query.split('#').next().unwrap_or_default();

    let mut confirmed = false;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "error" => {
                tracing::warn!(status, code = %value, "email confirmation refused");
                return Err(ApiError::Server {
                    status,
                    message: None,
                });
            }
            "confirmed" => confirmed = value == "true",
            _ => {}
        }
    }

    // A followed redirect that landed on a 2xx without an error also counts.
    if confirmed || (200..300).contains(&status) {
        Ok(())
    } else {
        tracing::warn!(status, redirect = target, "unexpected confirmation redirect");
        Err(ApiError::Server {
            status,
            message: None,
        })
    }
}
