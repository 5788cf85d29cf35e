//! Login / registration screen state.

use api::{ApiError, AuthOutcome, SessionContext, GENERIC_ERROR};

const CONFIRMED_MESSAGE: &str = "Email confirmed! You can now sign in.";
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in",
            AuthMode::Register => "Create account",
        }
    }

    /// Label of the link that switches to the other mode.
    pub fn switch_label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Need an account? Register",
            AuthMode::Register => "Already have an account? Sign in",
        }
    }
}

/// A confirmation link's parameters, to be redeemed with `confirm_email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationToken {
    pub token_hash: String,
    pub kind: String,
}

/// Validated input, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
}

/// What the view should do after a submission settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    Stay,
    OpenNotes,
}

/// The error and success banners are mutually exclusive: setting one clears
/// the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginController {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    error: Option<String>,
    success: Option<String>,
    submitting: bool,
    confirming: bool,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the initial state from the page's query string (without `?`).
    ///
    /// `confirmed=true` shows the confirmation banner, `error=...` is shown
    /// verbatim, and a `token_hash` + `type` pair is returned for the caller
    /// to redeem.
    pub fn from_query(query: &str) -> (Self, Option<ConfirmationToken>) {
        let mut controller = Self::new();
        let mut token_hash = None;
        let mut kind = None;

        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "confirmed" if value == "true" => controller.set_success(CONFIRMED_MESSAGE),
                "error" if !value.is_empty() => controller.set_error(value.into_owned()),
                "token_hash" if !value.is_empty() => token_hash = Some(value.into_owned()),
                "type" if !value.is_empty() => kind = Some(value.into_owned()),
                _ => {}
            }
        }

        // An error outranks a success flag in the same URL.
        if controller.error.is_some() {
            controller.success = None;
        }

        let token = match (token_hash, kind) {
            (Some(token_hash), Some(kind)) => {
                controller.confirming = true;
                Some(ConfirmationToken { token_hash, kind })
            }
            _ => None,
        };
        (controller, token)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }

    fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    /// Switch between sign-in and registration. Banners are cleared.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        };
        self.error = None;
        self.success = None;
    }

    /// Validate the form. Returns `None` (with an error banner when the
    /// fields are incomplete) if nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.submitting {
            return None;
        }
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            self.set_error("Email and password are required.");
            return None;
        }
        self.error = None;
        self.success = None;
        self.submitting = true;
        Some(Submission {
            mode: self.mode,
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    /// Apply the server's answer. A token is handed to `session`; a pending
    /// confirmation only shows the server's message.
    pub fn finish_submit(
        &mut self,
        result: Result<AuthOutcome, ApiError>,
        session: &SessionContext,
    ) -> LoginStep {
        self.submitting = false;
        match result {
            Ok(AuthOutcome::Authenticated(auth)) => {
                self.password.clear();
                session.login(auth.access_token, auth.user);
                LoginStep::OpenNotes
            }
            Ok(AuthOutcome::ConfirmationRequired { message, .. }) => {
                self.password.clear();
                self.mode = AuthMode::SignIn;
                self.set_success(message);
                LoginStep::Stay
            }
            // The login endpoint refuses with a 401 whose detail says why.
            Err(ApiError::Unauthenticated { message }) => {
                self.set_error(message.unwrap_or_else(|| INVALID_CREDENTIALS.into()));
                LoginStep::Stay
            }
            Err(e) => {
                let fallback = match self.mode {
                    AuthMode::SignIn => "Login failed.",
                    AuthMode::Register => "Registration failed.",
                };
                self.set_error(e.user_message(fallback).unwrap_or_else(|| GENERIC_ERROR.into()));
                LoginStep::Stay
            }
        }
    }

    pub fn finish_confirm(&mut self, result: Result<(), ApiError>) {
        self.confirming = false;
        match result {
            Ok(()) => self.set_success(CONFIRMED_MESSAGE),
            Err(e) => self.set_error(
                e.user_message("Email confirmation failed.")
                    .unwrap_or_else(|| "Email confirmation failed.".into()),
            ),
        }
    }
}
