//! # SchoolHub Models
//!
//! Database entities, request DTOs and response shapes for every resource.
//!
//! - [`auth`]: Login request/response and stored credentials
//! - [`schools`]: School accounts (the tenants)
//! - [`teachers`]: Teacher accounts
//! - [`students`]: Student accounts
//! - [`classes`]: Classes
//! - [`subjects`]: Subjects
//! - [`schedules`]: Timetable entries linking teacher, subject and class
//! - [`notices`]: Notices and audience visibility
//!
//! Entities never carry the password hash. Login reads it through
//! [`auth::Credentials`] only.

pub mod auth;
pub mod classes;
pub mod notices;
pub mod schedules;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use auth::{Credentials, LoginRequest, LoginResponse, LoginUser};
pub use notices::{Audience, visible_audiences};
