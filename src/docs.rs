// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Users ---
        handlers::users::create_user,
        handlers::users::get_all_users,
        handlers::users::get_user_by_email,
        handlers::users::get_user_by_id,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::users::update_role,

        // --- Tutors ---
        handlers::tutors::get_all_tutors,
        handlers::tutors::get_subjects,
        handlers::tutors::get_slots,
        handlers::tutors::create_availability,
        handlers::tutors::get_availability,
        handlers::tutors::delete_availability,
        handlers::tutors::get_tutor_bookings,
        handlers::tutors::get_tutor_report,
        handlers::tutors::get_tutor_by_id,
        handlers::tutors::update_tutor,
        handlers::tutors::delete_tutor,

        // --- Slots ---
        handlers::slots::book_slot,
        handlers::slots::get_slot_by_id,
        handlers::slots::delete_slot,

        // --- Admin ---
        handlers::admin::get_pending_availabilities,
        handlers::admin::approve_availability,
        handlers::admin::delete_availability,
        handlers::admin::get_all_appointments,

        // --- Attendance ---
        handlers::attendance::check_in,
        handlers::attendance::recent,

        // --- Reports ---
        handlers::reports::get_overview,
        handlers::reports::download_center_csv,
        handlers::reports::download_tutor_csv,
    ),
    components(
        schemas(
            // --- Accounts ---
            models::account::Role,
            models::account::Account,
            models::account::AccountSummary,
            models::account::CreateAccountPayload,
            models::account::UpdateAccountPayload,
            models::account::UpdateRolePayload,

            // --- Availability ---
            models::availability::TimeBlock,
            models::availability::ScheduleEntry,
            models::availability::WeeklyAvailability,
            models::availability::PendingAvailability,
            models::availability::CreateAvailabilityPayload,

            // --- Slots ---
            models::slot::Slot,
            models::slot::CandidateSlot,
            models::slot::SlotWithParties,
            models::slot::BookSlotPayload,

            // --- Attendance ---
            models::attendance::AttendanceStatus,
            models::attendance::AttendanceRecord,
            models::attendance::Visit,
            models::attendance::SwipePayload,
            models::attendance::SwipeCheckIn,
            models::attendance::SwipeResponse,
            models::attendance::RecentEntry,

            // --- Reports ---
            models::report::DateRange,
            models::report::OverviewSummary,
            models::report::TutorStats,
            models::report::PreviewRow,
            models::report::ReportUser,
            models::report::OverviewReport,
            models::report::TutorReport,
        )
    ),
    tags(
        (name = "Users", description = "Contas e papéis"),
        (name = "Tutors", description = "Tutores, agendas semanais e slots candidatos"),
        (name = "Slots", description = "Reserva e cancelamento de sessões"),
        (name = "Admin", description = "Aprovação de agendas e visão geral de reservas"),
        (name = "Attendance", description = "Quiosque de presença (swipe)"),
        (name = "Reports", description = "Relatórios e exportação CSV")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
