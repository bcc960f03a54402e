//! Request authentication.
//!
//! Handlers only see the [`Authenticator`] trait. The shipped scheme compares
//! a `token` query parameter against a shared secret; another scheme can
//! replace it by adding what it reads to [`Credentials`], without touching the
//! routes.

use thiserror::Error;

/// What a request offers as proof of identity
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    /// Raw query string, not percent-decoded
    pub query: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no token supplied")]
    MissingToken,
    #[error("token does not match")]
    InvalidToken,
}

pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials<'_>) -> Result<(), AuthError>;
}

/// `?token=<secret>` authentication
///
/// The query is split on `&`, each pair on `=`; a pair with more than one `=`
/// is not a valid token pair. Values are compared byte for byte.
pub struct QueryTokenAuthenticator {
    secret: String,
}

impl QueryTokenAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn token_values<'q>(query: &'q str) -> impl Iterator<Item = &'q str> {
        query.split('&').filter_map(|pair| {
            let mut parts = pair.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some("token"), Some(value), None) => Some(value),
                _ => None,
            }
        })
    }
}

impl Authenticator for QueryTokenAuthenticator {
    fn authenticate(&self, credentials: &Credentials<'_>) -> Result<(), AuthError> {
        let query = credentials.query.ok_or(AuthError::MissingToken)?;

        let mut seen = false;
        for value in Self::token_values(query) {
            if value == self.secret {
                return Ok(());
            }
            seen = true;
        }

        if seen {
            Err(AuthError::InvalidToken)
        } else {
            Err(AuthError::MissingToken)
        }
    }
}
