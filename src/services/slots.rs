// src/services/slots.rs

use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        AvailabilityRepository, SlotRepository, availability_repo::ApprovedAvailability,
        slot_repo::BookedKey,
    },
    models::{
        report::TutorReport,
        slot::{BookSlotPayload, CandidateSlot, Slot, SlotWithParties},
    },
};

pub const SLOT_DURATION_MINUTES: i64 = 30;

// Expande as agendas aprovadas em candidatos de 30 minutos para a data,
// suprimindo chaves naturais já reservadas. Puro: quem faz I/O é o serviço.
//
// Política de borda: o laço anda em passos fixos de 30 minutos e para
// quando o início do próximo slot não for mais anterior ao fim do bloco.
pub fn expand_candidates(
    availabilities: &[ApprovedAvailability],
    date: NaiveDate,
    subject: Option<&str>,
    booked: &HashSet<BookedKey>,
) -> Vec<CandidateSlot> {
    let day_name = date.format("%A").to_string();
    let step = Duration::minutes(SLOT_DURATION_MINUTES);
    let mut candidates = Vec::new();

    for availability in availabilities {
        for entry in availability.schedule.iter().filter(|e| e.day == day_name) {
            for block in &entry.blocks {
                if let Some(subject) = subject {
                    if !block.subjects.iter().any(|s| s == subject) {
                        continue;
                    }
                }

                let mut cursor = block.start_time;
                while cursor < block.end_time {
                    let (slot_end, wrapped) = cursor.overflowing_add_signed(step);
                    if wrapped != 0 {
                        // Bloco encostado na meia-noite; não há próximo slot.
                        break;
                    }

                    let key = BookedKey {
                        tutor_id: availability.tutor.id,
                        start_time: cursor,
                        end_time: slot_end,
                    };
                    if !booked.contains(&key) {
                        candidates.push(CandidateSlot {
                            id: Uuid::new_v4(),
                            tutor: availability.tutor.clone(),
                            date,
                            start_time: cursor,
                            end_time: slot_end,
                            subjects: block.subjects.clone(),
                            is_booked: false,
                        });
                    }

                    cursor = slot_end;
                }
            }
        }
    }

    candidates
}

#[derive(Clone)]
pub struct SlotService {
    slot_repo: SlotRepository,
    availability_repo: AvailabilityRepository,
}

impl SlotService {
    pub fn new(slot_repo: SlotRepository, availability_repo: AvailabilityRepository) -> Self {
        Self {
            slot_repo,
            availability_repo,
        }
    }

    // GET /api/tutors/slots: operação somente-leitura, nunca persiste nada.
    pub async fn generate_candidates(
        &self,
        date: Option<&str>,
        tutor_email: Option<&str>,
        subject: Option<&str>,
    ) -> Result<Vec<CandidateSlot>, AppError> {
        let date = date.ok_or_else(|| AppError::BadRequest("Missing date parameter.".into()))?;
        let date = date
            .parse::<NaiveDate>()
            .map_err(|_| AppError::BadRequest("Invalid date parameter.".into()))?;

        // Tutor desconhecido resulta em lista vazia, não em erro.
        let availabilities = self.availability_repo.list_approved(tutor_email).await?;

        let booked: HashSet<BookedKey> = self
            .slot_repo
            .booked_keys_on(date)
            .await?
            .into_iter()
            .collect();

        Ok(expand_candidates(&availabilities, date, subject, &booked))
    }

    // A pré-checagem é só o caminho rápido; o índice parcial no banco é
    // quem decide a corrida de verdade.
    pub async fn book(&self, payload: &BookSlotPayload) -> Result<Slot, AppError> {
        let existing = self
            .slot_repo
            .find_booked_by_natural_key(
                payload.tutor_id,
                payload.date,
                payload.start_time,
                payload.end_time,
            )
            .await?;
        if existing.is_some() {
            return Err(AppError::SlotAlreadyBooked);
        }

        let slot = self
            .slot_repo
            .insert_booked(
                payload.student_id,
                payload.tutor_id,
                payload.date,
                payload.start_time,
                payload.end_time,
                &payload.subjects,
            )
            .await?;

        tracing::info!(
            "📅 Slot reservado: tutor {} em {} {}-{}",
            payload.tutor_id,
            payload.date,
            payload.start_time.format("%H:%M"),
            payload.end_time.format("%H:%M"),
        );
        Ok(slot)
    }

    pub async fn get(&self, slot_id: Uuid) -> Result<Slot, AppError> {
        self.slot_repo
            .find_by_id(slot_id)
            .await?
            .ok_or(AppError::SlotNotFound)
    }

    pub async fn cancel(&self, slot_id: Uuid) -> Result<(), AppError> {
        if !self.slot_repo.delete(slot_id).await? {
            return Err(AppError::SlotNotFound);
        }
        Ok(())
    }

    pub async fn bookings_for_tutor(&self, tutor_id: Uuid) -> Result<Vec<SlotWithParties>, AppError> {
        self.slot_repo
            .list_booked_with_parties(Some(tutor_id), None)
            .await
    }

    pub async fn bookings_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<SlotWithParties>, AppError> {
        self.slot_repo
            .list_booked_with_parties(None, Some(student_id))
            .await
    }

    pub async fn all_appointments(&self) -> Result<Vec<SlotWithParties>, AppError> {
        self.slot_repo.list_booked_with_parties(None, None).await
    }

    // Resumo simples por tutor (sessões, alunos únicos, matérias).
    pub async fn tutor_report(&self, tutor_id: Uuid) -> Result<TutorReport, AppError> {
        let sessions = self.slot_repo.session_rows(Some(tutor_id)).await?;

        let total_sessions = sessions.len() as i64;
        let unique_students: HashSet<Uuid> =
            sessions.iter().filter_map(|s| s.student_id).collect();

        let mut subjects: Vec<String> = sessions
            .iter()
            .flat_map(|s| s.subjects.iter().cloned())
            .collect();
        subjects.sort();
        subjects.dedup();

        Ok(TutorReport {
            total_sessions,
            total_students: unique_students.len(),
            subjects,
            // Avaliações ainda não existem; valor fixo herdado do produto.
            average_rating: 5.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::AccountSummary;
    use crate::models::availability::{ScheduleEntry, TimeBlock};

    fn tutor(name: &str) -> AccountSummary {
        AccountSummary {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{name}@uta.edu"),
            id_number: "1002000000".to_string(),
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn availability(tutor: AccountSummary, day: &str, blocks: Vec<TimeBlock>) -> ApprovedAvailability {
        ApprovedAvailability {
            tutor,
            schedule: vec![ScheduleEntry {
                day: day.to_string(),
                blocks,
            }],
        }
    }

    // 2025-06-02 é uma segunda-feira
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn thirty_minute_stepping() {
        let avail = availability(
            tutor("ana"),
            "Monday",
            vec![TimeBlock {
                start_time: t(14, 0),
                end_time: t(15, 30),
                subjects: vec!["Math".into()],
            }],
        );

        let slots = expand_candidates(&[avail], monday(), None, &HashSet::new());
        let times: Vec<_> = slots
            .iter()
            .map(|s| (s.start_time, s.end_time))
            .collect();
        assert_eq!(
            times,
            vec![
                (t(14, 0), t(14, 30)),
                (t(14, 30), t(15, 0)),
                (t(15, 0), t(15, 30)),
            ]
        );
        assert!(slots.iter().all(|s| !s.is_booked));
    }

    #[test]
    fn last_slot_starts_before_block_end() {
        // Bloco de 45 minutos: o laço para quando o início do próximo slot
        // deixa de ser anterior ao fim do bloco.
        let avail = availability(
            tutor("ana"),
            "Monday",
            vec![TimeBlock {
                start_time: t(14, 0),
                end_time: t(14, 45),
                subjects: vec![],
            }],
        );

        let slots = expand_candidates(&[avail], monday(), None, &HashSet::new());
        let times: Vec<_> = slots
            .iter()
            .map(|s| (s.start_time, s.end_time))
            .collect();
        assert_eq!(times, vec![(t(14, 0), t(14, 30)), (t(14, 30), t(15, 0))]);
    }

    #[test]
    fn day_mismatch_yields_nothing() {
        let avail = availability(
            tutor("ana"),
            "Tuesday",
            vec![TimeBlock {
                start_time: t(9, 0),
                end_time: t(10, 0),
                subjects: vec![],
            }],
        );

        let slots = expand_candidates(&[avail], monday(), None, &HashSet::new());
        assert!(slots.is_empty());
    }

    #[test]
    fn subject_filter() {
        let avail = availability(
            tutor("ana"),
            "Monday",
            vec![
                TimeBlock {
                    start_time: t(9, 0),
                    end_time: t(9, 30),
                    subjects: vec!["Math".into()],
                },
                TimeBlock {
                    start_time: t(10, 0),
                    end_time: t(10, 30),
                    subjects: vec!["Physics".into()],
                },
            ],
        );

        let slots = expand_candidates(&[avail], monday(), Some("Physics"), &HashSet::new());
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start_time, t(10, 0));
    }

    #[test]
    fn booked_natural_key_is_suppressed() {
        let owner = tutor("ana");
        let avail = availability(
            owner.clone(),
            "Monday",
            vec![TimeBlock {
                start_time: t(14, 0),
                end_time: t(15, 0),
                subjects: vec![],
            }],
        );

        let mut booked = HashSet::new();
        booked.insert(BookedKey {
            tutor_id: owner.id,
            start_time: t(14, 0),
            end_time: t(14, 30),
        });

        let slots = expand_candidates(&[avail], monday(), None, &booked);
        let times: Vec<_> = slots
            .iter()
            .map(|s| (s.start_time, s.end_time))
            .collect();
        assert_eq!(times, vec![(t(14, 30), t(15, 0))]);
    }

    #[test]
    fn booked_key_of_another_tutor_does_not_suppress() {
        let owner = tutor("ana");
        let avail = availability(
            owner,
            "Monday",
            vec![TimeBlock {
                start_time: t(14, 0),
                end_time: t(14, 30),
                subjects: vec![],
            }],
        );

        let mut booked = HashSet::new();
        booked.insert(BookedKey {
            tutor_id: Uuid::new_v4(),
            start_time: t(14, 0),
            end_time: t(14, 30),
        });

        let slots = expand_candidates(&[avail], monday(), None, &booked);
        assert_eq!(slots.len(), 1);
    }
}
