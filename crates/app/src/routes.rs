//! Page routes and the sign-in guard.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Mcq,
    Subjective,
    Syllabus,
    Typing,
    Routine,
    Resources,
    NotFound,
}

impl Route {
    /// Accepts `/mcq` as well as the bare `mcq`. Anything unknown is `NotFound`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim_start_matches('/') {
            "" | "home" => Self::Home,
            "login" => Self::Login,
            "mcq" => Self::Mcq,
            "subjective" => Self::Subjective,
            "syllabus" => Self::Syllabus,
            "typing" => Self::Typing,
            "routine" => Self::Routine,
            "resources" => Self::Resources,
            _ => Self::NotFound,
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Mcq => "/mcq",
            Route::Subjective => "/subjective",
            Route::Syllabus => "/syllabus",
            Route::Typing => "/typing",
            Route::Routine => "/routine",
            Route::Resources => "/resources",
            Route::NotFound => "*",
        }
    }

    #[must_use]
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Show(Route),
    Redirect(Route),
}

/// Applies the guard: protected pages send visitors to login, and login
/// sends a signed-in user home.
#[must_use]
pub fn resolve(route: Route, signed_in: bool) -> Resolved {
    match (route, signed_in) {
        (Route::Login, true) => Resolved::Redirect(Route::Home),
        (route, false) if route.requires_auth() => Resolved::Redirect(Route::Login),
        (route, _) => Resolved::Show(route),
    }
}
