pub mod admin;
pub mod attendance;
pub mod reports;
pub mod slots;
pub mod students;
pub mod tutors;
pub mod users;
