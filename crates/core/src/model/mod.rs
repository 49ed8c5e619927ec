mod account;
mod ids;
mod leaderboard;
mod note;
mod resource;
mod routine;
mod stats;

pub use ids::{NoteId, ResourceId, RoutineItemId};

pub use account::{
    Account, AccountError, MIN_PASSWORD_LEN, SessionUser, email_taken, find_by_credentials,
};
pub use leaderboard::{LEADERBOARD_CAPACITY, LeaderboardEntry, push_newest};
pub use note::{Note, NoteDraft, NoteError, NoteKind, PRACTICE_PROMPTS, PracticePrompt};
pub use resource::{
    BOOKMARKS, CATEGORIES, CategoryFilter, Resource, ResourceDraft, ResourceError, ResourceKind,
    default_resources,
};
pub use routine::{Period, Routine, RoutineError, RoutineItem};
pub use stats::{StatCard, StatKey, Stats, StatsPatch};
