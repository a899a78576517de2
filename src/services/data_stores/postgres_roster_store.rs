use color_eyre::eyre::{eyre, Report};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{
    CapabilityCode, OrgId, RosterStore, RosterStoreError, StaffRole, Worker,
    WorkerId,
};

pub struct PostgresRosterStore {
    pool: PgPool,
}

impl PostgresRosterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn worker_from_row(row: &PgRow) -> Result<Worker, Report> {
    let capability = row
        .try_get::<Option<String>, _>("capability_code")?
        .map(|c| CapabilityCode::parse(&c))
        .transpose()?;
    Ok(Worker {
        id: WorkerId::parse(row.try_get::<&str, _>("worker_id")?)?,
        capability,
    })
}

#[async_trait::async_trait]
impl RosterStore for PostgresRosterStore {
    #[tracing::instrument(name = "Adding worker to PostgreSQL", skip_all)]
    async fn add_worker(
        &mut self,
        org_id: &OrgId,
        worker: Worker,
        role: StaffRole,
    ) -> Result<(), RosterStoreError> {
        sqlx::query(
            r#"
            INSERT INTO workers (org_id, worker_id, capability_code, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(org_id.as_ref())
        .bind(worker.id.as_str())
        .bind(worker.capability.as_ref().map(|c| c.as_str().to_owned()))
        .bind(role.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RosterStoreError::WorkerAlreadyExists
            }
            e => RosterStoreError::UnexpectedError(eyre!(e)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting worker from PostgreSQL", skip_all)]
    async fn get_worker(
        &self,
        org_id: &OrgId,
        worker_id: &WorkerId,
    ) -> Result<Worker, RosterStoreError> {
        let row = sqlx::query(
            r#"
            SELECT worker_id, capability_code
            FROM workers
            WHERE org_id = $1 AND worker_id = $2
            "#,
        )
        .bind(org_id.as_ref())
        .bind(worker_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RosterStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(RosterStoreError::WorkerNotFound)?;

        worker_from_row(&row).map_err(RosterStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Listing workers from PostgreSQL", skip_all)]
    async fn list_workers(
        &self,
        org_id: &OrgId,
        role: Option<StaffRole>,
    ) -> Result<Vec<Worker>, RosterStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT worker_id, capability_code
            FROM workers
            WHERE org_id = $1
              AND ($2::text IS NULL OR role = $2)
            "#,
        )
        .bind(org_id.as_ref())
        .bind(role.map(|r| r.to_string()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RosterStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter()
            .map(|row| {
                worker_from_row(row)
                    .map_err(RosterStoreError::UnexpectedError)
            })
            .collect()
    }
}
