use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccountError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("email must contain '@'")]
    InvalidEmail,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

//
// ─── ACCOUNT ───────────────────────────────────────────────────────────────────
//

/// Stored registration record.
///
/// The password is kept as entered and compared verbatim; there is no
/// hashing layer in this application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Account {
    /// Validates registration input and builds the record.
    ///
    /// # Errors
    ///
    /// Returns `AccountError` when the name is blank, the email is blank or
    /// lacks an `@`, or the password is shorter than [`MIN_PASSWORD_LEN`].
    pub fn register(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, AccountError> {
        let email = email.into();
        let password = password.into();
        let name = name.into();

        if name.trim().is_empty() {
            return Err(AccountError::EmptyName);
        }
        if email.trim().is_empty() {
            return Err(AccountError::EmptyEmail);
        }
        if !email.contains('@') {
            return Err(AccountError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(Self {
            email,
            password,
            name,
        })
    }

    /// Exact match on both fields.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    #[must_use]
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Signed-in user as mirrored to storage. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

/// Finds the account matching both credentials in a stored list.
#[must_use]
pub fn find_by_credentials<'a>(
    accounts: &'a [Account],
    email: &str,
    password: &str,
) -> Option<&'a Account> {
    accounts.iter().find(|a| a.matches(email, password))
}

#[must_use]
pub fn email_taken(accounts: &[Account], email: &str) -> bool {
    accounts.iter().any(|a| a.email == email)
}
