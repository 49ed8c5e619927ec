use services::{AppServices, AuthError, Notice};
use tracing::info;

use super::{PageResult, joined, print_notice, usage_error};

const USAGE: &str = "login <email> <password> | login register <email> <password> <name...>";

const DEMO_EMAIL: &str = "demo@loksewa.local";
const DEMO_PASSWORD: &str = "demo123";
const DEMO_NAME: &str = "Demo Student";

pub(super) async fn render(app: &AppServices, args: &[String]) -> PageResult {
    let auth = app.auth();
    match args {
        [action, email, password, name @ ..] if action == "register" => {
            let user = auth
                .register(email, password, &joined(name))
                .await
                .map_err(|err| Notice::for_auth_error(&err))?;
            print_notice(&Notice::account_created());
            println!("Signed in as {} <{}>.", user.name, user.email);
            Ok(())
        }
        [email, password] => {
            let user = auth
                .login(email, password)
                .await
                .map_err(|err| Notice::for_auth_error(&err))?;
            print_notice(&Notice::welcome_back());
            println!("Signed in as {} <{}>.", user.name, user.email);
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

/// # Errors
///
/// Returns `AuthError::Storage` if the session cannot be cleared.
pub async fn logout(app: &AppServices) -> Result<(), AuthError> {
    app.auth().logout().await?;
    println!("Signed out.");
    Ok(())
}

/// Registers the demo account, or signs into it if it already exists.
///
/// # Errors
///
/// Returns `AuthError` if neither registration nor login succeeds.
pub async fn seed_demo_account(app: &AppServices) -> Result<(), AuthError> {
    let auth = app.auth();
    let user = match auth.register(DEMO_EMAIL, DEMO_PASSWORD, DEMO_NAME).await {
        Ok(user) => user,
        Err(AuthError::EmailTaken) => auth.login(DEMO_EMAIL, DEMO_PASSWORD).await?,
        Err(err) => return Err(err),
    };
    info!(email = %user.email, "demo account ready");
    println!("Demo account ready: {DEMO_EMAIL} / {DEMO_PASSWORD}");
    Ok(())
}
