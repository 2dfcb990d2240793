//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an address was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is blank")]
    Empty,
    #[error("email is longer than {max} characters")]
    TooLong { max: usize },
    #[error("email needs exactly one @")]
    MissingAtSymbol,
    #[error("nothing before the @")]
    EmptyLocalPart,
    #[error("nothing after the @")]
    EmptyDomain,
    #[error("email contains whitespace")]
    Whitespace,
}

/// A normalized email address.
///
/// Accounts are looked up by email, so every address entering the system goes
/// through [`Email::normalize`]: it is trimmed and lowercased before
/// validation, and two spellings of one address compare equal.
///
/// ```
/// use aurelia_core::Email;
///
/// let email = Email::normalize("  Guest@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "guest@example.com");
/// assert!(Email::normalize("@domain.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type), sqlx(transparent))]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// RFC 5321 limit.
    pub const MAX_LENGTH: usize = 254;

    /// Trim, lowercase and validate an address.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first violated constraint.
    pub fn normalize(s: &str) -> Result<Self, EmailError> {
        let email = s.trim().to_lowercase();
        check_shape(&email)?;
        Ok(Self(email))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

fn check_shape(email: &str) -> Result<(), EmailError> {
    if email.is_empty() {
        return Err(EmailError::Empty);
    }
    if email.len() > Email::MAX_LENGTH {
        return Err(EmailError::TooLong {
            max: Email::MAX_LENGTH,
        });
    }
    if email.contains(char::is_whitespace) {
        return Err(EmailError::Whitespace);
    }
    match email.split('@').collect::<Vec<_>>().as_slice() {
        ["", _] => Err(EmailError::EmptyLocalPart),
        [_, ""] => Err(EmailError::EmptyDomain),
        [_, _] => Ok(()),
        _ => Err(EmailError::MissingAtSymbol),
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        let email = Email::normalize("  Celeste@Aurelia.Example\n").unwrap();
        assert_eq!(email.as_str(), "celeste@aurelia.example");
        assert_eq!(email.domain(), "aurelia.example");
    }

    #[test]
    fn test_equal_after_normalization() {
        assert_eq!(
            Email::normalize("A@B.C").unwrap(),
            Email::normalize("a@b.c").unwrap()
        );
    }

    #[test]
    fn test_rejects_blank() {
        assert_eq!(Email::normalize("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_rejects_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::normalize(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert_eq!(Email::normalize("plain"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::normalize("a@b@c"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::normalize("@b.c"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::normalize("a@"), Err(EmailError::EmptyDomain));
        assert_eq!(Email::normalize("a b@c.d"), Err(EmailError::Whitespace));
    }

    #[test]
    fn test_from_str() {
        let email: Email = "Guest@Example.com".parse().unwrap();
        assert_eq!(email.to_string(), "guest@example.com");
    }
}
