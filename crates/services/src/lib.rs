#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod note_service;
pub mod notice;
pub mod quiz_service;
pub mod resource_service;
pub mod routine_service;
pub mod stats_service;
pub mod syllabus_service;
pub mod typing_service;

pub use prep_core::time::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use error::{
    AppServicesError, AuthError, NoteServiceError, QuizServiceError, ResourceServiceError,
    RoutineServiceError, StatsServiceError, SyllabusServiceError, TypingServiceError,
};
pub use note_service::NoteService;
pub use notice::{Notice, Tone};
pub use quiz_service::QuizService;
pub use resource_service::ResourceService;
pub use routine_service::RoutineService;
pub use stats_service::{Dashboard, StatsService};
pub use syllabus_service::{SyllabusOverview, SyllabusService};
pub use typing_service::TypingService;
