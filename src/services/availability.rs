// src/services/availability.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccountRepository, AvailabilityRepository, SlotRepository},
    models::availability::{PendingAvailability, ScheduleEntry, WeeklyAvailability},
};

#[derive(Clone)]
pub struct AvailabilityService {
    availability_repo: AvailabilityRepository,
    slot_repo: SlotRepository,
    account_repo: AccountRepository,
    pool: PgPool,
}

impl AvailabilityService {
    pub fn new(
        availability_repo: AvailabilityRepository,
        slot_repo: SlotRepository,
        account_repo: AccountRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            availability_repo,
            slot_repo,
            account_repo,
            pool,
        }
    }

    pub async fn create_for_tutor(
        &self,
        tutor_id: Uuid,
        schedule: &[ScheduleEntry],
    ) -> Result<WeeklyAvailability, AppError> {
        let existing = self.availability_repo.find_by_tutor(tutor_id).await?;
        if !existing.is_empty() {
            tracing::debug!(
                "Tutor {tutor_id} já possui {} submissão(ões); a nova fica pendente junto",
                existing.len()
            );
        }

        self.availability_repo.create(tutor_id, schedule).await
    }

    // O parâmetro de rota aceita o UUID interno ou a matrícula do tutor
    // (o front usa os dois).
    pub async fn get_for_tutor(&self, tutor_param: &str) -> Result<Vec<WeeklyAvailability>, AppError> {
        let tutor_id = match tutor_param.parse::<Uuid>() {
            Ok(id) => id,
            Err(_) => {
                let account = self
                    .account_repo
                    .find_by_id_number(tutor_param)
                    .await?
                    .ok_or(AppError::UserNotFound)?;
                account.id
            }
        };

        let availabilities = self.availability_repo.find_by_tutor(tutor_id).await?;
        if availabilities.is_empty() {
            return Err(AppError::AvailabilityNotFound);
        }
        Ok(availabilities)
    }

    // Remove a agenda do tutor e, na mesma transação, todos os slots dele.
    // Retorna quantos slots caíram junto.
    pub async fn delete_for_tutor(&self, tutor_id: Uuid) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = self
            .availability_repo
            .delete_by_tutor(&mut *tx, tutor_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::AvailabilityNotFound);
        }

        let deleted_slots = self.slot_repo.delete_by_tutor(&mut *tx, tutor_id).await?;

        tx.commit().await?;
        Ok(deleted_slots)
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingAvailability>, AppError> {
        self.availability_repo.list_pending().await
    }

    // Aprovação: irreversível e idempotente na recusa. As submissões-irmãs
    // do mesmo tutor somem na mesma transação.
    pub async fn approve(&self, availability_id: Uuid) -> Result<(), AppError> {
        let availability = self
            .availability_repo
            .find_by_id(availability_id)
            .await?
            .ok_or(AppError::AvailabilityNotFound)?;

        if availability.is_approved {
            return Err(AppError::AvailabilityAlreadyApproved);
        }

        let mut tx = self.pool.begin().await?;

        let removed = self
            .availability_repo
            .delete_siblings(&mut *tx, availability.tutor_id, availability_id)
            .await?;
        self.availability_repo
            .mark_approved(&mut *tx, availability_id)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "✅ Disponibilidade {availability_id} aprovada ({removed} submissões-irmãs removidas)"
        );
        Ok(())
    }

    // Remoção pelo admin, cascateando os slots do tutor dono.
    pub async fn delete_by_id(&self, availability_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let tutor_id = self
            .availability_repo
            .delete_by_id(&mut *tx, availability_id)
            .await?
            .ok_or(AppError::AvailabilityNotFound)?;

        self.slot_repo.delete_by_tutor(&mut *tx, tutor_id).await?;

        tx.commit().await?;
        Ok(())
    }

    // Matérias distintas entre as agendas aprovadas, ordenadas.
    pub async fn distinct_subjects(&self) -> Result<Vec<String>, AppError> {
        let approved = self.availability_repo.list_approved(None).await?;

        let mut subjects: Vec<String> = approved
            .into_iter()
            .flat_map(|a| a.schedule)
            .flat_map(|entry| entry.blocks)
            .flat_map(|block| block.subjects)
            .filter(|s| !s.is_empty())
            .collect();

        subjects.sort();
        subjects.dedup();
        Ok(subjects)
    }
}
