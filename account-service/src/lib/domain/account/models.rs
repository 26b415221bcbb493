use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::EmailError;
use crate::account::errors::FieldError;
use crate::account::errors::PasswordPolicyError;

/// Account aggregate entity.
///
/// Keyed by normalized email; `password_hash` never leaves the domain layer
/// (callers receive a [`Profile`] instead).
#[derive(Debug, Clone)]
pub struct Account {
    pub email: EmailAddress,
    pub password_hash: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

/// Outward view of an account, without credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub email: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for Profile {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.as_str().to_string(),
            city: account.city.clone(),
            country: account.country.clone(),
            created_at: account.created_at,
        }
    }
}

/// Normalized email address type.
///
/// Trims surrounding whitespace and lower-cases before validating against an
/// RFC 5322 compliant parser, so `"A@B.com"` and `" a@b.com "` name the same
/// account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at signup and reset.
///
/// Enforces the minimum length policy. Login takes the raw string instead:
/// accounts created before the policy existed must still be able to sign in.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// Create a policy-checked password.
    ///
    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: &str) -> Result<Self, PasswordPolicyError> {
        let password = password.trim();
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// No Debug derive: plaintext must not end up in logs by accident.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Issued recovery secret for one email.
///
/// Valid for one hour from issuance; the record does not require the email to
/// belong to an existing account at issuance time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub email: EmailAddress,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    pub const TTL_SECONDS: i64 = 3600;

    /// Build a token record issued at `now`.
    pub fn issue(email: EmailAddress, token: String, now: DateTime<Utc>) -> Self {
        Self {
            email,
            token,
            created_at: now,
            expires_at: now + Duration::seconds(Self::TTL_SECONDS),
        }
    }

    /// A token is expired strictly after `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Command to create a new account with validated fields
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub city: String,
    pub country: String,
}

impl SignupCommand {
    /// Construct a signup command, trimming and requiring the profile fields.
    ///
    /// # Errors
    /// * `Empty` - city or country is blank
    pub fn new(
        email: EmailAddress,
        password: Password,
        city: &str,
        country: &str,
    ) -> Result<Self, FieldError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FieldError::Empty("city"));
        }
        let country = country.trim();
        if country.is_empty() {
            return Err(FieldError::Empty("country"));
        }
        Ok(Self {
            email,
            password,
            city: city.to_string(),
            country: country.to_string(),
        })
    }
}

/// Command to authenticate an existing account
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    /// Construct a login command. Presence is the only password rule here.
    ///
    /// # Errors
    /// * `Empty` - password is blank
    pub fn new(email: EmailAddress, password: &str) -> Result<Self, FieldError> {
        let password = password.trim();
        if password.is_empty() {
            return Err(FieldError::Empty("password"));
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }
}

/// Command to request a recovery token
#[derive(Debug)]
pub struct ForgotPasswordCommand {
    pub email: EmailAddress,
}

impl ForgotPasswordCommand {
    pub fn new(email: EmailAddress) -> Self {
        Self { email }
    }
}

/// Command to redeem a recovery token and set a new password
#[derive(Debug)]
pub struct ResetPasswordCommand {
    pub email: EmailAddress,
    pub token: String,
    pub new_password: Password,
}

impl ResetPasswordCommand {
    /// # Errors
    /// * `Empty` - token is blank
    pub fn new(
        email: EmailAddress,
        token: &str,
        new_password: Password,
    ) -> Result<Self, FieldError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(FieldError::Empty("token"));
        }
        Ok(Self {
            email,
            token: token.to_string(),
            new_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  A@B.com ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");

        let same = EmailAddress::new("a@b.com").unwrap();
        assert_eq!(email, same);
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(EmailAddress::new("not-an-email").is_err());
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("   ").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("secret1").is_ok());
        assert!(Password::new("123456").is_ok());

        let err = Password::new("ab1").unwrap_err();
        assert_eq!(err, PasswordPolicyError::TooShort { min: 6, actual: 3 });
    }

    #[test]
    fn test_password_debug_redacted() {
        let password = Password::new("secret1").unwrap();
        assert_eq!(format!("{:?}", password), "Password(..)");
    }

    #[test]
    fn test_reset_token_expiry_window() {
        let issued_at = Utc::now();
        let email = EmailAddress::new("user@test.com").unwrap();
        let token = ResetToken::issue(email, "tok".to_string(), issued_at);

        assert_eq!(token.expires_at - token.created_at, Duration::hours(1));
        assert!(!token.is_expired(issued_at + Duration::minutes(59)));
        assert!(token.is_expired(issued_at + Duration::minutes(61)));
    }

    #[test]
    fn test_signup_command_requires_profile_fields() {
        let email = EmailAddress::new("user@test.com").unwrap();
        let password = Password::new("secret1").unwrap();

        let err = SignupCommand::new(email.clone(), password.clone(), "  ", "US").unwrap_err();
        assert_eq!(err, FieldError::Empty("city"));

        let err = SignupCommand::new(email.clone(), password.clone(), "Austin", "").unwrap_err();
        assert_eq!(err, FieldError::Empty("country"));

        let command = SignupCommand::new(email, password, " Austin ", "US").unwrap();
        assert_eq!(command.city, "Austin");
    }

    #[test]
    fn test_login_command_requires_password() {
        let email = EmailAddress::new("user@test.com").unwrap();
        let err = LoginCommand::new(email, "   ").unwrap_err();
        assert_eq!(err, FieldError::Empty("password"));
    }
}
