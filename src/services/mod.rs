pub mod auth;
pub use auth::AuthService;
pub mod availability;
pub use availability::AvailabilityService;
pub mod slots;
pub use slots::SlotService;
pub mod attendance;
pub use attendance::AttendanceService;
pub mod reports;
pub use reports::ReportService;
