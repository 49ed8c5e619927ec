//! Storage key names. Per-user keys are suffixed with the account email.

pub const ACCOUNTS: &str = "loksewa_users";
pub const SESSION_USER: &str = "loksewa_user";
pub const LEADERBOARD: &str = "loksewa_typing_leaderboard";

#[must_use]
pub fn stats(email: &str) -> String {
    format!("loksewa_stats_{email}")
}

#[must_use]
pub fn notes(email: &str) -> String {
    format!("loksewa_notes_{email}")
}

#[must_use]
pub fn resources(email: &str) -> String {
    format!("loksewa_resources_{email}")
}

#[must_use]
pub fn routine(email: &str) -> String {
    format!("loksewa_routine_{email}")
}

#[must_use]
pub fn syllabus(email: &str) -> String {
    format!("loksewa_syllabus_{email}")
}
