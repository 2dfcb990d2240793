//! Authentication service.
//!
//! Password signup and login against `storefront.user`. A successful call
//! returns the [`User`]; turning that into a signed identity cookie is the
//! caller's job (see [`crate::services::identity`]).

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use aurelia_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum display name length (matches the column).
pub const MAX_NAME_LENGTH: usize = 120;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with name, email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::NameTooLong` or `AuthError::PasswordTooShort` on validation failure.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register_with_password(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let (name, email) = validate_signup(name, email, password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_with_password(name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "account created");
        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        // A malformed address can't belong to any account
        let email = Email::normalize(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Validate signup fields, returning the trimmed name and normalized email.
fn validate_signup<'n>(
    name: &'n str,
    email: &str,
    password: &str,
) -> Result<(&'n str, Email), AuthError> {
    let name = name.trim();
    if name.is_empty() || email.trim().is_empty() || password.trim().is_empty() {
        return Err(AuthError::MissingFields);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AuthError::NameTooLong {
            max: MAX_NAME_LENGTH,
        });
    }
    let email = Email::normalize(email)?;
    validate_password(password)?;
    Ok((name, email))
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("aurora-line-42").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("aurora-line-42", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_signup_requires_all_fields() {
        assert!(matches!(
            validate_signup("  ", "a@b.c", "longenough"),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            validate_signup("Ada", " ", "longenough"),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            validate_signup("Ada", "a@b.c", ""),
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_blank_password_counts_as_missing() {
        assert!(matches!(
            validate_signup("Ada", "a@b.example", "        "),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            validate_signup("Ada", "a@b.example", "\t \n"),
            Err(AuthError::MissingFields)
        ));
        // Padding around a real password is kept as part of it
        assert!(validate_signup("Ada", "a@b.example", "  longenough  ").is_ok());
    }

    #[test]
    fn test_signup_normalizes() {
        let (name, email) = validate_signup("  Ada Lovelace ", " Ada@Example.COM", "longenough").unwrap();
        assert_eq!(name, "Ada Lovelace");
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_signup_rejects_long_name_short_password_bad_email() {
        let long = "n".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            validate_signup(&long, "a@b.c", "longenough"),
            Err(AuthError::NameTooLong { .. })
        ));
        assert!(matches!(
            validate_signup("Ada", "a@b.c", "short"),
            Err(AuthError::PasswordTooShort { min: 8 })
        ));
        assert!(matches!(
            validate_signup("Ada", "not-an-email", "longenough"),
            Err(AuthError::InvalidEmail(_))
        ));
    }
}
