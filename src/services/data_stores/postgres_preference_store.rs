use chrono::NaiveDate;
use color_eyre::eyre::{eyre, Report};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::{
    OrgId, PreferenceRank, PreferenceStatus, PreferenceStore,
    PreferenceStoreError, SchedulePeriod, VacationPreference, WorkerId,
};

pub struct PostgresPreferenceStore {
    pool: PgPool,
}

impl PostgresPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn preference_from_row(row: &PgRow) -> Result<VacationPreference, Report> {
    Ok(VacationPreference {
        org_id: OrgId::new(row.try_get::<Uuid, _>("org_id")?),
        worker_id: WorkerId::parse(row.try_get::<&str, _>("worker_id")?)?,
        year: row.try_get::<i32, _>("year")?,
        month: row.try_get::<i32, _>("month")? as u32,
        rank: PreferenceRank::try_from(row.try_get::<i16, _>("rank")?)?,
        week_start: row.try_get::<NaiveDate, _>("week_start")?,
        week_end: row.try_get::<NaiveDate, _>("week_end")?,
        status: PreferenceStatus::from_str(
            row.try_get::<&str, _>("status")?,
        )?,
    })
}

#[async_trait::async_trait]
impl PreferenceStore for PostgresPreferenceStore {
    #[tracing::instrument(
        name = "Listing vacation preferences from PostgreSQL",
        skip_all
    )]
    async fn list_preferences(
        &self,
        org_id: &OrgId,
        period: &SchedulePeriod,
    ) -> Result<Vec<VacationPreference>, PreferenceStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT org_id, worker_id, year, month, rank, week_start,
                   week_end, status
            FROM vacation_preferences
            WHERE org_id = $1 AND year = $2 AND month = $3
            "#,
        )
        .bind(org_id.as_ref())
        .bind(period.year())
        .bind(period.month() as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PreferenceStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter()
            .map(|row| {
                preference_from_row(row)
                    .map_err(PreferenceStoreError::UnexpectedError)
            })
            .collect()
    }

    #[tracing::instrument(
        name = "Replacing vacation preferences in PostgreSQL",
        skip_all
    )]
    async fn replace_preferences(
        &mut self,
        org_id: &OrgId,
        worker_id: &WorkerId,
        period: &SchedulePeriod,
        preferences: Vec<VacationPreference>,
    ) -> Result<(), PreferenceStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PreferenceStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            DELETE FROM vacation_preferences
            WHERE org_id = $1 AND worker_id = $2 AND year = $3 AND month = $4
            "#,
        )
        .bind(org_id.as_ref())
        .bind(worker_id.as_str())
        .bind(period.year())
        .bind(period.month() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| PreferenceStoreError::UnexpectedError(eyre!(e)))?;

        for preference in &preferences {
            sqlx::query(
                r#"
                INSERT INTO vacation_preferences
                    (org_id, worker_id, year, month, rank, week_start,
                     week_end, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(preference.org_id.as_ref())
            .bind(preference.worker_id.as_str())
            .bind(preference.year)
            .bind(preference.month as i32)
            .bind(i16::from(preference.rank))
            .bind(preference.week_start)
            .bind(preference.week_end)
            .bind(preference.status.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err)
                    if db_err.is_unique_violation() =>
                {
                    PreferenceStoreError::DuplicateRank
                }
                e => PreferenceStoreError::UnexpectedError(eyre!(e)),
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| PreferenceStoreError::UnexpectedError(eyre!(e)))
    }
}
