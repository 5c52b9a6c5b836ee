// src/services/attendance.rs

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    common::swipe::{SwipeInput, parse_swipe},
    db::{AccountRepository, AttendanceRepository},
    models::attendance::{
        AttendanceStatus, RecentEntry, SwipeCheckIn, SwipeResponse,
    },
};

// Sessões não passam de 2 horas: depois disso a visita aberta é fechada
// em exatamente check_in + 2h e o próximo swipe conta como nova entrada.
pub const MAX_SESSION_MINUTES: i64 = 120;

// Quantas visitas abertas o painel do quiosque mostra
const RECENT_LIMIT: i64 = 50;

// O que um swipe deve fazer com a visita aberta (se houver).
// Puro, para os testes cobrirem a máquina de estados sem banco.
#[derive(Debug, PartialEq)]
pub struct SwipePlan {
    // Fecha a visita aberta neste instante antes de qualquer outra coisa
    pub close_at: Option<DateTime<Utc>>,
    // Abre uma visita nova em `now`
    pub open_new: bool,
    pub status: AttendanceStatus,
    pub duration_minutes: Option<i64>,
}

pub fn plan_swipe(
    open_check_in: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    max_minutes: i64,
) -> SwipePlan {
    match open_check_in {
        // Sem visita aberta: entrada
        None => SwipePlan {
            close_at: None,
            open_new: true,
            status: AttendanceStatus::SignedIn,
            duration_minutes: None,
        },

        Some(check_in) => {
            let elapsed = now - check_in;
            if elapsed > Duration::minutes(max_minutes) {
                // Visita estourou o teto: fecha travada em check_in + teto
                // e o swipe atual vira uma entrada nova.
                SwipePlan {
                    close_at: Some(check_in + Duration::minutes(max_minutes)),
                    open_new: true,
                    status: AttendanceStatus::SignedIn,
                    duration_minutes: None,
                }
            } else {
                // Saída normal
                SwipePlan {
                    close_at: Some(now),
                    open_new: false,
                    status: AttendanceStatus::SignedOut,
                    duration_minutes: Some(round_minutes(elapsed)),
                }
            }
        }
    }
}

// round((checkOut - checkIn) / 60000), como o front espera
fn round_minutes(elapsed: Duration) -> i64 {
    (elapsed.num_milliseconds() as f64 / 60_000.0).round() as i64
}

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repo: AttendanceRepository,
    account_repo: AccountRepository,
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(
        attendance_repo: AttendanceRepository,
        account_repo: AccountRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            attendance_repo,
            account_repo,
            pool,
        }
    }

    // POST /api/attendance/checkin: um único swipe alterna entrada/saída.
    pub async fn swipe(&self, raw: &str) -> Result<SwipeResponse, AppError> {
        if raw.trim().is_empty() {
            return Err(AppError::BadRequest("Swipe data required".into()));
        }

        // 1. Parse da leitura crua
        let account = match parse_swipe(raw) {
            SwipeInput::Email(email) => self.account_repo.find_by_email(&email).await?,
            SwipeInput::InstitutionalId(id) => {
                self.account_repo.find_by_id_number(&id).await?
            }
            SwipeInput::Unrecognized => {
                return Err(AppError::BadRequest("Invalid swipe data".into()));
            }
        };

        // 2. Usuário desconhecido: resposta 200 informativa, sem mudar
        // estado nenhum. O quiosque não deve exibir tela de erro.
        let Some(account) = account else {
            return Ok(SwipeResponse {
                message: "Error: User not registered".to_string(),
                status: None,
                check_in: None,
                duration_minutes: None,
            });
        };

        // 3. Carrega (ou cria) o registro de presença do aluno
        let record = self
            .attendance_repo
            .find_or_create(&account.id_number, &account.email, &account.name)
            .await?;

        let now = Utc::now();
        let open = self.attendance_repo.open_visit(record.id).await?;
        let plan = plan_swipe(open.as_ref().map(|v| v.check_in), now, MAX_SESSION_MINUTES);

        // 4. Aplica o plano dentro de uma transação: cada swipe fica
        // durável antes da resposta.
        let mut tx = self.pool.begin().await?;

        if let Some(close_at) = plan.close_at {
            self.attendance_repo
                .close_open_visit(&mut *tx, record.id, close_at)
                .await?;
        }
        if plan.open_new {
            self.attendance_repo
                .insert_open_visit(&mut *tx, record.id, now)
                .await?;
        }
        self.attendance_repo
            .set_status(&mut *tx, record.id, plan.status)
            .await?;

        tx.commit().await?;

        let (message, timestamp) = match plan.status {
            AttendanceStatus::SignedIn => ("Check-in recorded", now),
            AttendanceStatus::SignedOut => ("Student checked out successfully", now),
        };

        tracing::info!(
            "✅ {} - {} ({})",
            account.id_number,
            account.name,
            message
        );

        Ok(SwipeResponse {
            message: message.to_string(),
            status: Some(plan.status),
            check_in: Some(SwipeCheckIn {
                id: account.id_number,
                name: account.name,
                timestamp,
            }),
            duration_minutes: plan.duration_minutes,
        })
    }

    // GET /api/attendance/recent: antes de listar, fecha as visitas que
    // estouraram o teto (o cap vale também para quem só consulta).
    pub async fn recent(&self) -> Result<Vec<RecentEntry>, AppError> {
        let swept = self
            .attendance_repo
            .sweep_expired(Utc::now(), MAX_SESSION_MINUTES)
            .await?;
        if swept > 0 {
            tracing::debug!("{swept} visita(s) expiradas fechadas no teto de 2h");
        }

        self.attendance_repo.recent_open(RECENT_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, s).unwrap()
    }

    #[test]
    fn first_swipe_signs_in() {
        let plan = plan_swipe(None, at(10, 0, 0), MAX_SESSION_MINUTES);
        assert_eq!(
            plan,
            SwipePlan {
                close_at: None,
                open_new: true,
                status: AttendanceStatus::SignedIn,
                duration_minutes: None,
            }
        );
    }

    #[test]
    fn second_swipe_signs_out_with_duration() {
        let check_in = at(10, 0, 0);
        let now = at(10, 45, 0);
        let plan = plan_swipe(Some(check_in), now, MAX_SESSION_MINUTES);
        assert_eq!(plan.close_at, Some(now));
        assert!(!plan.open_new);
        assert_eq!(plan.status, AttendanceStatus::SignedOut);
        assert_eq!(plan.duration_minutes, Some(45));
    }

    #[test]
    fn duration_is_rounded() {
        // 29 minutos e 31 segundos arredondam para 30
        let plan = plan_swipe(Some(at(10, 0, 0)), at(10, 29, 31), MAX_SESSION_MINUTES);
        assert_eq!(plan.duration_minutes, Some(30));

        // 29 minutos e 29 segundos arredondam para 29
        let plan = plan_swipe(Some(at(10, 0, 0)), at(10, 29, 29), MAX_SESSION_MINUTES);
        assert_eq!(plan.duration_minutes, Some(29));
    }

    #[test]
    fn immediate_double_swipe_has_zero_duration() {
        let now = at(10, 0, 1);
        let plan = plan_swipe(Some(at(10, 0, 0)), now, MAX_SESSION_MINUTES);
        assert_eq!(plan.status, AttendanceStatus::SignedOut);
        assert_eq!(plan.duration_minutes, Some(0));
    }

    #[test]
    fn expired_visit_is_capped_and_swipe_becomes_check_in() {
        let check_in = at(8, 0, 0);
        let now = at(11, 30, 0); // 3h30 depois
        let plan = plan_swipe(Some(check_in), now, MAX_SESSION_MINUTES);

        // Fecha em exatamente check_in + 2h, nunca em `now`
        assert_eq!(plan.close_at, Some(at(10, 0, 0)));
        assert!(plan.open_new);
        assert_eq!(plan.status, AttendanceStatus::SignedIn);
        assert_eq!(plan.duration_minutes, None);
    }

    #[test]
    fn exactly_two_hours_is_still_a_checkout() {
        // O teto só dispara quando o tempo EXCEDE 2h
        let check_in = at(8, 0, 0);
        let now = at(10, 0, 0);
        let plan = plan_swipe(Some(check_in), now, MAX_SESSION_MINUTES);
        assert_eq!(plan.status, AttendanceStatus::SignedOut);
        assert_eq!(plan.duration_minutes, Some(120));
    }
}
