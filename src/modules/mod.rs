pub mod auth;
pub mod classes;
pub mod notices;
pub mod schedules;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use self::auth::LoginRequest;
pub use self::schools::School;
