//! Authentication error types.
//!
//! Client-facing variants display the exact message shown to the visitor.

use thiserror::Error;

use crate::db::RepositoryError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup is missing a name, email or password.
    #[error("All fields are required")]
    MissingFields,

    /// Login is missing the email or password.
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email address")]
    InvalidEmail(#[from] aurelia_core::EmailError),

    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Unknown email or wrong password; the two are indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account already exists. Please log in.")]
    UserAlreadyExists,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether the error is the client's fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repository(_) | Self::PasswordHash)
    }
}
