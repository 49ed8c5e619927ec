use std::sync::{Arc, Mutex, PoisonError};

use prep_core::model::{Account, SessionUser, email_taken, find_by_credentials};
use storage::repository::{AccountRepository, SessionRepository};
use tracing::{info, warn};

use crate::error::AuthError;

/// Registration, login and the current session.
///
/// The signed-in user is held in memory and mirrored to the session
/// repository so a restart can pick it back up via [`AuthService::restore`].
#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    session: Arc<dyn SessionRepository>,
    current: Arc<Mutex<Option<SessionUser>>>,
}

impl AuthService {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountRepository>, session: Arc<dyn SessionRepository>) -> Self {
        Self {
            accounts,
            session,
            current: Arc::new(Mutex::new(None)),
        }
    }

    fn set_current(&self, user: Option<SessionUser>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = user;
    }

    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` when nobody is signed in.
    pub fn require_user(&self) -> Result<SessionUser, AuthError> {
        self.current_user().ok_or(AuthError::NotSignedIn)
    }

    /// Load the persisted session, if any, into memory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session blob cannot be read.
    pub async fn restore(&self) -> Result<Option<SessionUser>, AuthError> {
        let user = self.session.load_session().await?;
        if let Some(user) = &user {
            info!(email = %user.email, "session restored");
        }
        self.set_current(user.clone());
        Ok(user)
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Account` for invalid input, `AuthError::EmailTaken`
    /// if the email already has an account, and `AuthError::Storage` on
    /// persistence failures.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SessionUser, AuthError> {
        let account = Account::register(email, password, name)?;
        let existing = self.accounts.list_accounts().await?;
        if email_taken(&existing, &account.email) {
            warn!(email = %account.email, "registration rejected: email taken");
            return Err(AuthError::EmailTaken);
        }
        self.accounts.insert_account(&account).await?;

        let user = account.session_user();
        self.session.save_session(&user).await?;
        self.set_current(Some(user.clone()));
        info!(email = %user.email, "account registered");
        Ok(user)
    }

    /// Sign in with exact email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when no account matches and
    /// `AuthError::Storage` on persistence failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let accounts = self.accounts.list_accounts().await?;
        let Some(account) = find_by_credentials(&accounts, email, password) else {
            warn!(email, "login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let user = account.session_user();
        self.session.save_session(&user).await?;
        self.set_current(Some(user.clone()));
        info!(email = %user.email, "logged in");
        Ok(user)
    }

    /// Clear the session. Per-user data stays in storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session key cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.clear_session().await?;
        if let Some(user) = self.current_user() {
            info!(email = %user.email, "logged out");
        }
        self.set_current(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::AccountError;
    use storage::repository::Storage;

    fn service(storage: &Storage) -> AuthService {
        AuthService::new(Arc::clone(&storage.accounts), Arc::clone(&storage.session))
    }

    #[tokio::test]
    async fn register_signs_in_and_persists_session() {
        let storage = Storage::in_memory();
        let auth = service(&storage);
        let user = auth.register("ram@example.com", "secret1", "Ram").await.unwrap();
        assert_eq!(user.name, "Ram");
        assert_eq!(auth.current_user(), Some(user.clone()));

        let restarted = service(&storage);
        assert_eq!(restarted.current_user(), None);
        assert_eq!(restarted.restore().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let storage = Storage::in_memory();
        let auth = service(&storage);
        auth.register("ram@example.com", "secret1", "Ram").await.unwrap();
        let err = auth
            .register("ram@example.com", "other12", "Impostor")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(storage.accounts.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_registration_stores_nothing() {
        let storage = Storage::in_memory();
        let auth = service(&storage);
        let err = auth.register("ram@example.com", "12345", "Ram").await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Account(AccountError::PasswordTooShort { min: 6 })
        ));
        assert!(storage.accounts.list_accounts().await.unwrap().is_empty());
        assert_eq!(auth.current_user(), None);
    }

    #[tokio::test]
    async fn login_requires_exact_credentials() {
        let storage = Storage::in_memory();
        let auth = service(&storage);
        auth.register("ram@example.com", "secret1", "Ram").await.unwrap();
        auth.logout().await.unwrap();

        let err = auth.login("ram@example.com", "Secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(matches!(auth.require_user(), Err(AuthError::NotSignedIn)));

        let user = auth.login("ram@example.com", "secret1").await.unwrap();
        assert_eq!(user.email, "ram@example.com");
    }

    #[tokio::test]
    async fn logout_clears_persisted_session() {
        let storage = Storage::in_memory();
        let auth = service(&storage);
        auth.register("ram@example.com", "secret1", "Ram").await.unwrap();
        auth.logout().await.unwrap();
        assert_eq!(storage.session.load_session().await.unwrap(), None);
        assert_eq!(auth.current_user(), None);
    }
}
