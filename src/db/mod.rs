pub mod account_repo;
pub use account_repo::AccountRepository;
pub mod availability_repo;
pub use availability_repo::AvailabilityRepository;
pub mod slot_repo;
pub use slot_repo::SlotRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
