//! Domain model and pure logic for the study dashboard.
//!
//! Nothing in this crate touches storage; services load and persist the
//! values defined here.

pub mod error;
pub mod model;
pub mod quiz;
pub mod syllabus;
pub mod time;
pub mod typing;

pub use error::Error;
