//! Authentication primitives relayed to the gateway on login.
//!
//! Keep inbound payload parsing outside the domain by exposing
//! constructors that validate string inputs before a handler talks to a
//! port.

use std::fmt;

use zeroize::Zeroizing;

use super::forms::check_uuid;

/// Upper bound for the login username.
pub const USERNAME_MAX: usize = 64;
/// Upper bound for the login password.
pub const PASSWORD_MAX: usize = 128;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`].
    UsernameTooLong { max: usize },
    /// Password was blank.
    EmptyPassword,
    /// Password exceeded [`PASSWORD_MAX`].
    PasswordTooLong { max: usize },
    /// OAuth client id was present but not a UUID.
    InvalidClientId,
    /// OAuth state was present but not a UUID.
    InvalidState,
    /// OAuth redirect URI was present but not an absolute http(s) URL.
    InvalidRedirectUri,
}

impl AuthValidationError {
    /// The request field this error belongs to, in the payload's casing.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyPassword | Self::PasswordTooLong { .. } => "password",
            Self::InvalidClientId => "clientId",
            Self::InvalidState => "state",
            Self::InvalidRedirectUri => "redirectUri",
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
            Self::InvalidClientId => write!(f, "client id must be a valid UUID"),
            Self::InvalidState => write!(f, "state must be a valid UUID"),
            Self::InvalidRedirectUri => {
                write!(f, "redirect uri must be an absolute http(s) URL")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Validated login credentials relayed to the gateway.
///
/// ## Invariants
/// - `username` is trimmed, non-empty, and at most [`USERNAME_MAX`]
///   characters.
/// - `password` is non-empty, at most [`PASSWORD_MAX`] characters, and
///   retains caller-provided whitespace to avoid surprising credential
///   comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(AuthValidationError::EmptyUsername);
        }
        if normalized.chars().count() > USERNAME_MAX {
            return Err(AuthValidationError::UsernameTooLong { max: USERNAME_MAX });
        }

        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() > PASSWORD_MAX {
            return Err(AuthValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// OAuth parameters the login page forwards to the gateway.
///
/// All parts are optional; present parts are validated locally so the
/// relay never forwards garbage the gateway would reject anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OauthParams {
    client_id: Option<String>,
    redirect_uri: Option<String>,
    state: Option<String>,
}

impl OauthParams {
    /// Validate and construct the forwarded OAuth parts.
    pub fn try_from_parts(
        client_id: Option<&str>,
        redirect_uri: Option<&str>,
        state: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        if let Some(id) = client_id
            && !check_uuid(id)
        {
            return Err(AuthValidationError::InvalidClientId);
        }
        if let Some(raw) = redirect_uri {
            let parsed = url::Url::parse(raw).map_err(|_| AuthValidationError::InvalidRedirectUri)?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(AuthValidationError::InvalidRedirectUri);
            }
        }
        if let Some(value) = state
            && !check_uuid(value)
        {
            return Err(AuthValidationError::InvalidState);
        }

        Ok(Self {
            client_id: client_id.map(str::to_owned),
            redirect_uri: redirect_uri.map(str::to_owned),
            state: state.map(str::to_owned),
        })
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }
}
