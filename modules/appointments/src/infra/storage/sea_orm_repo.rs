//! SeaORM-backed repository implementation for the domain port.
//!
//! The check-and-write operations (`insert_if_free`, `update_if_free`) run
//! the overlap probe and the write inside one transaction, so a conflicting
//! record cannot land between the check and the commit.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::model::Appointment;
use crate::domain::repo::{AppointmentsRepository, CommitOutcome};
use crate::infra::storage::entity::{Column, Entity as AppointmentEntity, Model};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Half-open overlap probe: `start_at < end AND end_at > start`.
async fn find_overlapping_models<C: ConnectionTrait>(
    conn: &C,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<Vec<Model>, sea_orm::DbErr> {
    let mut query = AppointmentEntity::find()
        .filter(Column::StartAt.lt(end))
        .filter(Column::EndAt.gt(start));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id));
    }
    query.order_by_asc(Column::CreatedAt).all(conn).await
}

#[async_trait]
impl<C> AppointmentsRepository for SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn list(&self) -> anyhow::Result<Vec<Appointment>> {
        let rows = AppointmentEntity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("list failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Appointment>> {
        let rows = AppointmentEntity::find()
            .filter(Column::StartAt.lt(to))
            .filter(Column::EndAt.gt(from))
            .order_by_asc(Column::StartAt)
            .all(&self.conn)
            .await
            .context("list_in_range failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        let found = AppointmentEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Vec<Appointment>> {
        let rows = find_overlapping_models(&self.conn, start, end, exclude)
            .await
            .context("find_overlapping failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_if_free(&self, appt: Appointment) -> anyhow::Result<CommitOutcome> {
        let txn = self.conn.begin().await.context("begin failed")?;

        let overlapping = find_overlapping_models(&txn, appt.start, appt.end, None)
            .await
            .context("overlap check failed")?;
        if !overlapping.is_empty() {
            txn.rollback().await.context("rollback failed")?;
            return Ok(CommitOutcome::Conflicted(
                overlapping.into_iter().map(Into::into).collect(),
            ));
        }

        let model: Model = appt.clone().into();
        model
            .into_active_model()
            .insert(&txn)
            .await
            .context("insert failed")?;
        txn.commit().await.context("commit failed")?;
        Ok(CommitOutcome::Committed(appt))
    }

    async fn update_if_free(&self, appt: Appointment) -> anyhow::Result<CommitOutcome> {
        let txn = self.conn.begin().await.context("begin failed")?;

        if AppointmentEntity::find_by_id(appt.id)
            .one(&txn)
            .await
            .context("find_by_id failed")?
            .is_none()
        {
            txn.rollback().await.context("rollback failed")?;
            return Ok(CommitOutcome::Missing);
        }

        let overlapping = find_overlapping_models(&txn, appt.start, appt.end, Some(appt.id))
            .await
            .context("overlap check failed")?;
        if !overlapping.is_empty() {
            txn.rollback().await.context("rollback failed")?;
            return Ok(CommitOutcome::Conflicted(
                overlapping.into_iter().map(Into::into).collect(),
            ));
        }

        // A Model converts to an all-Unchanged ActiveModel, which would
        // produce an UPDATE with no SET clause. reset_all marks every column
        // dirty so the full record is written.
        let model: Model = appt.clone().into();
        model
            .into_active_model()
            .reset_all()
            .update(&txn)
            .await
            .context("update failed")?;
        txn.commit().await.context("commit failed")?;
        Ok(CommitOutcome::Committed(appt))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = AppointmentEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
