//! Terminal rendering of each page.
//!
//! Every page takes the remaining command-line words as its action and
//! arguments. User-facing failures surface as a [`Notice`] error so the
//! binary prints them once and exits non-zero.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use services::{AppServices, AuthError, Notice, Tone};

use crate::routes::{Resolved, Route, resolve};

mod home;
mod login;
mod mcq;
mod resources;
mod routine;
mod subjective;
mod syllabus;
mod typing;

pub use login::{logout, seed_demo_account};

pub type PageResult = Result<(), Box<dyn Error>>;

/// Resolve the guard for `route` and render whatever it lands on.
///
/// # Errors
///
/// Returns a `Notice` for user-facing failures, or the underlying error for
/// storage and I/O failures.
pub async fn render(app: &AppServices, route: Route, args: &[String]) -> PageResult {
    let signed_in = app.auth().current_user().is_some();
    match resolve(route, signed_in) {
        Resolved::Show(route) => show(app, route, args).await,
        Resolved::Redirect(Route::Login) => {
            Err(Notice::for_auth_error(&AuthError::NotSignedIn).into())
        }
        Resolved::Redirect(target) => {
            if let Some(user) = app.auth().current_user() {
                println!("Already signed in as {}.", user.email);
            }
            show(app, target, &[]).await
        }
    }
}

async fn show(app: &AppServices, route: Route, args: &[String]) -> PageResult {
    match route {
        Route::Home => home::render(app).await,
        Route::Login => login::render(app, args).await,
        Route::Mcq => mcq::render(app, args).await,
        Route::Subjective => subjective::render(app, args).await,
        Route::Syllabus => syllabus::render(app, args).await,
        Route::Typing => typing::render(app, args).await,
        Route::Routine => routine::render(app, args).await,
        Route::Resources => resources::render(app, args).await,
        Route::NotFound => {
            println!("404");
            println!("Oops! Page not found");
            println!("Return to Home: {}", Route::Home.path());
            Ok(())
        }
    }
}

pub(crate) fn print_notice(notice: &Notice) {
    match notice.tone {
        Tone::Destructive => eprintln!("{notice}"),
        Tone::Info | Tone::Success => println!("{notice}"),
    }
}

/// Line reader over stdin for the interactive pages.
pub(crate) fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Print `label` and read the next line. `None` at end of input.
pub(crate) async fn prompt<R>(lines: &mut Lines<R>, label: &str) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{label}");
    io::stdout().flush()?;
    lines.next_line().await
}

pub(crate) fn usage_error(usage: &str) -> Box<dyn Error> {
    Notice::error("Usage", usage).into()
}

/// Joins trailing words into one value, for titles and activities.
pub(crate) fn joined(words: &[String]) -> String {
    words.join(" ")
}
