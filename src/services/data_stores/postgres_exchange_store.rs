use chrono::NaiveDate;
use color_eyre::eyre::{eyre, Report};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::{
    Assignment, AssignmentFilter, AssignmentId, AssignmentKind,
    AssignmentStore, AssignmentStoreError, OrgId, ShiftTypeCode,
    SwapAcceptance, SwapOffer, SwapOfferId, SwapOfferStatus, SwapRequest,
    SwapRequestFilter, SwapRequestId, SwapRequestStatus, SwapStore,
    SwapStoreError, WorkerId,
};

pub struct PostgresExchangeStore {
    pool: PgPool,
}

impl PostgresExchangeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn assignment_from_row(row: &PgRow) -> Result<Assignment, Report> {
    Ok(Assignment {
        id: AssignmentId::new(row.try_get::<Uuid, _>("id")?),
        org_id: OrgId::new(row.try_get::<Uuid, _>("org_id")?),
        worker_id: WorkerId::parse(row.try_get::<&str, _>("worker_id")?)?,
        date: row.try_get::<NaiveDate, _>("shift_date")?,
        shift_type: ShiftTypeCode::parse(
            row.try_get::<&str, _>("shift_type")?,
        )?,
        kind: AssignmentKind::from_str(row.try_get::<&str, _>("kind")?)?,
    })
}

fn request_from_row(row: &PgRow) -> Result<SwapRequest, Report> {
    Ok(SwapRequest {
        id: SwapRequestId::new(row.try_get::<Uuid, _>("id")?),
        org_id: OrgId::new(row.try_get::<Uuid, _>("org_id")?),
        requester_id: WorkerId::parse(
            row.try_get::<&str, _>("requester_id")?,
        )?,
        source_assignment_id: AssignmentId::new(
            row.try_get::<Uuid, _>("source_assignment_id")?,
        ),
        status: SwapRequestStatus::from_str(
            row.try_get::<&str, _>("status")?,
        )?,
        notes: row.try_get::<String, _>("notes")?,
        equivalence_code: row
            .try_get::<Option<String>, _>("equivalence_code")?,
    })
}

fn offer_from_row(row: &PgRow) -> Result<SwapOffer, Report> {
    Ok(SwapOffer {
        id: SwapOfferId::new(row.try_get::<Uuid, _>("id")?),
        org_id: OrgId::new(row.try_get::<Uuid, _>("org_id")?),
        swap_request_id: SwapRequestId::new(
            row.try_get::<Uuid, _>("swap_request_id")?,
        ),
        target_worker_id: WorkerId::parse(
            row.try_get::<&str, _>("target_worker_id")?,
        )?,
        target_assignment_id: row
            .try_get::<Option<Uuid>, _>("target_assignment_id")?
            .map(AssignmentId::new),
        status: SwapOfferStatus::from_str(
            row.try_get::<&str, _>("status")?,
        )?,
        response_notes: row
            .try_get::<Option<String>, _>("response_notes")?,
    })
}

#[async_trait::async_trait]
impl AssignmentStore for PostgresExchangeStore {
    #[tracing::instrument(name = "Adding assignment to PostgreSQL", skip_all)]
    async fn add_assignment(
        &mut self,
        assignment: Assignment,
    ) -> Result<(), AssignmentStoreError> {
        sqlx::query(
            r#"
            INSERT INTO assignments
                (id, org_id, worker_id, shift_date, shift_type, kind)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(assignment.id.as_ref())
        .bind(assignment.org_id.as_ref())
        .bind(assignment.worker_id.as_str())
        .bind(assignment.date)
        .bind(assignment.shift_type.as_str())
        .bind(assignment.kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AssignmentStoreError::AssignmentIdExists
            }
            e => AssignmentStoreError::UnexpectedError(eyre!(e)),
        })?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Getting assignment from PostgreSQL",
        skip_all
    )]
    async fn get_assignment(
        &self,
        org_id: &OrgId,
        id: &AssignmentId,
    ) -> Result<Assignment, AssignmentStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, org_id, worker_id, shift_date, shift_type, kind
            FROM assignments
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(id.as_ref())
        .bind(org_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AssignmentStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(AssignmentStoreError::AssignmentNotFound)?;

        assignment_from_row(&row)
            .map_err(AssignmentStoreError::UnexpectedError)
    }

    #[tracing::instrument(
        name = "Listing assignments from PostgreSQL",
        skip_all
    )]
    async fn list_assignments(
        &self,
        org_id: &OrgId,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, AssignmentStoreError> {
        let (from, to) = match filter.date_range {
            Some((from, to)) => (Some(from), Some(to)),
            None => (None, None),
        };
        let rows = sqlx::query(
            r#"
            SELECT id, org_id, worker_id, shift_date, shift_type, kind
            FROM assignments
            WHERE org_id = $1
              AND ($2::text IS NULL OR worker_id = $2)
              AND ($3::date IS NULL OR shift_date >= $3)
              AND ($4::date IS NULL OR shift_date <= $4)
            "#,
        )
        .bind(org_id.as_ref())
        .bind(filter.worker_id.as_ref().map(|w| w.as_str().to_owned()))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AssignmentStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter()
            .map(|row| {
                assignment_from_row(row)
                    .map_err(AssignmentStoreError::UnexpectedError)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SwapStore for PostgresExchangeStore {
    #[tracing::instrument(name = "Adding swap request to PostgreSQL", skip_all)]
    async fn add_request(
        &mut self,
        request: SwapRequest,
    ) -> Result<(), SwapStoreError> {
        sqlx::query(
            r#"
            INSERT INTO swap_requests
                (id, org_id, requester_id, source_assignment_id, status,
                 notes, equivalence_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(request.id.as_ref())
        .bind(request.org_id.as_ref())
        .bind(request.requester_id.as_str())
        .bind(request.source_assignment_id.as_ref())
        .bind(request.status.as_str())
        .bind(&request.notes)
        .bind(&request.equivalence_code)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // The partial unique index on OPEN requests turns a duplicate
            // into a conflict rather than a second open request.
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                SwapStoreError::OpenRequestExists
            }
            e => SwapStoreError::UnexpectedError(eyre!(e)),
        })?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Getting swap request from PostgreSQL",
        skip_all
    )]
    async fn get_request(
        &self,
        org_id: &OrgId,
        id: &SwapRequestId,
    ) -> Result<SwapRequest, SwapStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, org_id, requester_id, source_assignment_id, status,
                   notes, equivalence_code
            FROM swap_requests
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(id.as_ref())
        .bind(org_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(SwapStoreError::RequestNotFound)?;

        request_from_row(&row).map_err(SwapStoreError::UnexpectedError)
    }

    #[tracing::instrument(
        name = "Listing swap requests from PostgreSQL",
        skip_all
    )]
    async fn list_requests(
        &self,
        org_id: &OrgId,
        filter: &SwapRequestFilter,
    ) -> Result<Vec<SwapRequest>, SwapStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, org_id, requester_id, source_assignment_id, status,
                   notes, equivalence_code
            FROM swap_requests
            WHERE org_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR requester_id = $3)
            "#,
        )
        .bind(org_id.as_ref())
        .bind(filter.status.map(|s| s.as_str().to_owned()))
        .bind(
            filter
                .requester_id
                .as_ref()
                .map(|w| w.as_str().to_owned()),
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter()
            .map(|row| {
                request_from_row(row)
                    .map_err(SwapStoreError::UnexpectedError)
            })
            .collect()
    }

    #[tracing::instrument(name = "Adding swap offers to PostgreSQL", skip_all)]
    async fn add_offers(
        &mut self,
        offers: Vec<SwapOffer>,
    ) -> Result<(), SwapStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        for offer in offers {
            sqlx::query(
                r#"
                INSERT INTO swap_offers
                    (id, org_id, swap_request_id, target_worker_id,
                     target_assignment_id, status, response_notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(offer.id.as_ref())
            .bind(offer.org_id.as_ref())
            .bind(offer.swap_request_id.as_ref())
            .bind(offer.target_worker_id.as_str())
            .bind(offer.target_assignment_id.map(|a| *a.as_ref()))
            .bind(offer.status.as_str())
            .bind(&offer.response_notes)
            .execute(&mut *tx)
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(
        name = "Getting swap offer from PostgreSQL",
        skip_all
    )]
    async fn get_offer(
        &self,
        org_id: &OrgId,
        id: &SwapOfferId,
    ) -> Result<SwapOffer, SwapStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, org_id, swap_request_id, target_worker_id,
                   target_assignment_id, status, response_notes
            FROM swap_offers
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(id.as_ref())
        .bind(org_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(SwapStoreError::OfferNotFound)?;

        offer_from_row(&row).map_err(SwapStoreError::UnexpectedError)
    }

    #[tracing::instrument(
        name = "Listing swap offers from PostgreSQL",
        skip_all
    )]
    async fn list_offers(
        &self,
        org_id: &OrgId,
        request_id: &SwapRequestId,
    ) -> Result<Vec<SwapOffer>, SwapStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, org_id, swap_request_id, target_worker_id,
                   target_assignment_id, status, response_notes
            FROM swap_offers
            WHERE org_id = $1 AND swap_request_id = $2
            "#,
        )
        .bind(org_id.as_ref())
        .bind(request_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter()
            .map(|row| {
                offer_from_row(row).map_err(SwapStoreError::UnexpectedError)
            })
            .collect()
    }

    #[tracing::instrument(name = "Declining swap offer in PostgreSQL", skip_all)]
    async fn decline_offer(
        &mut self,
        org_id: &OrgId,
        id: &SwapOfferId,
        response_notes: Option<String>,
    ) -> Result<SwapOffer, SwapStoreError> {
        let row = sqlx::query(
            r#"
            UPDATE swap_offers
            SET status = 'DECLINED', response_notes = $3
            WHERE id = $1 AND org_id = $2 AND status = 'PENDING'
            RETURNING id, org_id, swap_request_id, target_worker_id,
                      target_assignment_id, status, response_notes
            "#,
        )
        .bind(id.as_ref())
        .bind(org_id.as_ref())
        .bind(&response_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        match row {
            Some(row) => {
                offer_from_row(&row).map_err(SwapStoreError::UnexpectedError)
            }
            // Distinguish a missing offer from one already resolved.
            None => match self.get_offer(org_id, id).await {
                Ok(_) => Err(SwapStoreError::OfferNotPending),
                Err(e) => Err(e),
            },
        }
    }

    #[tracing::instrument(name = "Accepting swap offer in PostgreSQL", skip_all)]
    async fn accept_offer(
        &mut self,
        org_id: &OrgId,
        id: &SwapOfferId,
        response_notes: Option<String>,
        today: NaiveDate,
    ) -> Result<SwapAcceptance, SwapStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        // Row locks on the offer, its request and the touched assignments
        // serialize concurrent accepts; the loser re-reads a terminal
        // status and bails out below.
        let offer_row = sqlx::query(
            r#"
            SELECT id, org_id, swap_request_id, target_worker_id,
                   target_assignment_id, status, response_notes
            FROM swap_offers
            WHERE id = $1 AND org_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .bind(org_id.as_ref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(SwapStoreError::OfferNotFound)?;
        let offer =
            offer_from_row(&offer_row).map_err(SwapStoreError::UnexpectedError)?;
        if offer.status != SwapOfferStatus::Pending {
            return Err(SwapStoreError::OfferNotPending);
        }

        let request_row = sqlx::query(
            r#"
            SELECT id, org_id, requester_id, source_assignment_id, status,
                   notes, equivalence_code
            FROM swap_requests
            WHERE id = $1 AND org_id = $2
            FOR UPDATE
            "#,
        )
        .bind(offer.swap_request_id.as_ref())
        .bind(org_id.as_ref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(SwapStoreError::RequestNotFound)?;
        let request = request_from_row(&request_row)
            .map_err(SwapStoreError::UnexpectedError)?;
        if request.status != SwapRequestStatus::Open {
            return Err(SwapStoreError::RequestNotOpen);
        }

        let source_row = sqlx::query(
            r#"
            SELECT id, org_id, worker_id, shift_date, shift_type, kind
            FROM assignments
            WHERE id = $1 AND org_id = $2
            FOR UPDATE
            "#,
        )
        .bind(request.source_assignment_id.as_ref())
        .bind(org_id.as_ref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(SwapStoreError::AssignmentNotFound)?;
        let source = assignment_from_row(&source_row)
            .map_err(SwapStoreError::UnexpectedError)?;
        if source.worker_id != request.requester_id {
            return Err(SwapStoreError::StaleAssignment);
        }

        if source.date < today {
            sqlx::query(
                "UPDATE swap_requests SET status = 'EXPIRED' WHERE id = $1",
            )
            .bind(request.id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
            sqlx::query(
                r#"
                UPDATE swap_offers SET status = 'CANCELLED'
                WHERE swap_request_id = $1 AND status = 'PENDING'
                "#,
            )
            .bind(request.id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
            tx.commit()
                .await
                .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
            return Err(SwapStoreError::RequestExpired);
        }

        if let Some(target_id) = offer.target_assignment_id {
            let target_row = sqlx::query(
                r#"
                SELECT id, org_id, worker_id, shift_date, shift_type, kind
                FROM assignments
                WHERE id = $1 AND org_id = $2
                FOR UPDATE
                "#,
            )
            .bind(target_id.as_ref())
            .bind(org_id.as_ref())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
            .ok_or(SwapStoreError::AssignmentNotFound)?;
            let target = assignment_from_row(&target_row)
                .map_err(SwapStoreError::UnexpectedError)?;
            if target.worker_id != offer.target_worker_id {
                return Err(SwapStoreError::StaleAssignment);
            }
        }

        let mut reassigned = Vec::new();

        let source_row = sqlx::query(
            r#"
            UPDATE assignments SET worker_id = $2, kind = 'SWAPPED'
            WHERE id = $1
            RETURNING id, org_id, worker_id, shift_date, shift_type, kind
            "#,
        )
        .bind(request.source_assignment_id.as_ref())
        .bind(offer.target_worker_id.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
        reassigned.push(
            assignment_from_row(&source_row)
                .map_err(SwapStoreError::UnexpectedError)?,
        );

        if let Some(target_id) = offer.target_assignment_id {
            let target_row = sqlx::query(
                r#"
                UPDATE assignments SET worker_id = $2, kind = 'SWAPPED'
                WHERE id = $1
                RETURNING id, org_id, worker_id, shift_date, shift_type, kind
                "#,
            )
            .bind(target_id.as_ref())
            .bind(request.requester_id.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
            reassigned.push(
                assignment_from_row(&target_row)
                    .map_err(SwapStoreError::UnexpectedError)?,
            );
        }

        let accepted = sqlx::query(
            r#"
            UPDATE swap_offers
            SET status = 'ACCEPTED', response_notes = $2
            WHERE id = $1 AND status = 'PENDING'
            RETURNING id, org_id, swap_request_id, target_worker_id,
                      target_assignment_id, status, response_notes
            "#,
        )
        .bind(id.as_ref())
        .bind(&response_notes)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(SwapStoreError::OfferNotPending)?;
        let accepted_offer = offer_from_row(&accepted)
            .map_err(SwapStoreError::UnexpectedError)?;

        let accepted_request_row = sqlx::query(
            r#"
            UPDATE swap_requests SET status = 'ACCEPTED'
            WHERE id = $1 AND status = 'OPEN'
            RETURNING id, org_id, requester_id, source_assignment_id, status,
                      notes, equivalence_code
            "#,
        )
        .bind(request.id.as_ref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(SwapStoreError::RequestNotOpen)?;
        let accepted_request = request_from_row(&accepted_request_row)
            .map_err(SwapStoreError::UnexpectedError)?;

        let cancelled_rows = sqlx::query(
            r#"
            UPDATE swap_offers SET status = 'CANCELLED'
            WHERE swap_request_id = $1 AND status = 'PENDING' AND id <> $2
            RETURNING id
            "#,
        )
        .bind(request.id.as_ref())
        .bind(id.as_ref())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
        let cancelled_offers = cancelled_rows
            .iter()
            .map(|row| {
                row.try_get::<Uuid, _>("id")
                    .map(SwapOfferId::new)
                    .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))
            })
            .collect::<Result<Vec<SwapOfferId>, SwapStoreError>>()?;

        tx.commit()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        Ok(SwapAcceptance {
            request: accepted_request,
            offer: accepted_offer,
            reassigned,
            cancelled_offers,
        })
    }

    #[tracing::instrument(
        name = "Cancelling swap request in PostgreSQL",
        skip_all
    )]
    async fn cancel_request(
        &mut self,
        org_id: &OrgId,
        id: &SwapRequestId,
    ) -> Result<Vec<SwapOfferId>, SwapStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        let updated = sqlx::query(
            r#"
            UPDATE swap_requests SET status = 'CANCELLED'
            WHERE id = $1 AND org_id = $2 AND status = 'OPEN'
            "#,
        )
        .bind(id.as_ref())
        .bind(org_id.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        if updated.rows_affected() == 0 {
            return match self.get_request(org_id, id).await {
                Ok(_) => Err(SwapStoreError::RequestNotOpen),
                Err(e) => Err(e),
            };
        }

        let cancelled_rows = sqlx::query(
            r#"
            UPDATE swap_offers SET status = 'CANCELLED'
            WHERE swap_request_id = $1 AND status = 'PENDING'
            RETURNING id
            "#,
        )
        .bind(id.as_ref())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        tx.commit()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        cancelled_rows
            .iter()
            .map(|row| {
                row.try_get::<Uuid, _>("id")
                    .map(SwapOfferId::new)
                    .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))
            })
            .collect()
    }

    #[tracing::instrument(
        name = "Expiring swap requests in PostgreSQL",
        skip_all
    )]
    async fn expire_requests(
        &mut self,
        org_id: &OrgId,
        before: NaiveDate,
    ) -> Result<Vec<SwapRequestId>, SwapStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        let expired_rows = sqlx::query(
            r#"
            UPDATE swap_requests SET status = 'EXPIRED'
            WHERE org_id = $1 AND status = 'OPEN'
              AND source_assignment_id IN (
                  SELECT id FROM assignments
                  WHERE org_id = $1 AND shift_date < $2
              )
            RETURNING id
            "#,
        )
        .bind(org_id.as_ref())
        .bind(before)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        let expired = expired_rows
            .iter()
            .map(|row| {
                row.try_get::<Uuid, _>("id")
                    .map(SwapRequestId::new)
                    .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))
            })
            .collect::<Result<Vec<SwapRequestId>, SwapStoreError>>()?;

        for request_id in &expired {
            sqlx::query(
                r#"
                UPDATE swap_offers SET status = 'CANCELLED'
                WHERE swap_request_id = $1 AND status = 'PENDING'
                "#,
            )
            .bind(request_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| SwapStoreError::UnexpectedError(eyre!(e)))?;

        Ok(expired)
    }
}
