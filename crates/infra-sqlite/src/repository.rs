// SQLite School Repository
// Every operation here runs in its own transaction.

use crate::crud;
use crate::entity::SqlEntity;
use crate::error::{map_delete_commit_error, map_sqlx_error};
use crate::transaction::SqliteSchoolTransaction;
use async_trait::async_trait;
use schoolhouse_core::domain::{Filter, Link};
use schoolhouse_core::error::Result;
use schoolhouse_core::port::{SchoolTransaction, TransactionalSchoolRepository};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqliteSchoolRepository {
    pool: SqlitePool,
}

impl SqliteSchoolRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a caller-controlled transaction
    pub async fn begin(&self) -> Result<SqliteSchoolTransaction> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(SqliteSchoolTransaction::new(tx))
    }

    /// Insert one row; foreign keys are checked at commit
    pub async fn create<E: SqlEntity>(&self, draft: &E::Draft) -> Result<E::Id> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        let id = crud::insert::<E>(&mut tx, draft).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(id)
    }

    pub async fn get<E: SqlEntity>(&self, id: &E::Id) -> Result<Option<E>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        crud::get::<E>(&mut conn, id).await
    }

    pub async fn read<E: SqlEntity>(&self, filter: &Filter<E::Field>) -> Result<Vec<E>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        crud::select::<E>(&mut conn, filter).await
    }

    pub async fn update<E: SqlEntity>(&self, id: &E::Id, draft: &E::Draft) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        crud::update::<E>(&mut tx, id, draft).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    pub async fn delete<E: SqlEntity>(&self, id: &E::Id) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        crud::delete::<E>(&mut tx, id).await?;
        tx.commit()
            .await
            .map_err(|e| map_delete_commit_error(e, E::KIND.table(), &id.to_string()))?;
        Ok(())
    }

    /// Insert a join row; a duplicate pair is a PRIMARY KEY violation
    pub async fn link(&self, link: &Link) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        let inserted = crud::insert_link(&mut tx, link, false).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(inserted)
    }

    /// Insert a join row unless the pair already exists
    pub async fn link_if_absent(&self, link: &Link) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        let inserted = crud::insert_link(&mut tx, link, true).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(inserted)
    }

    pub async fn unlink(&self, link: &Link) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        crud::delete_link(&mut tx, link).await?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionalSchoolRepository for SqliteSchoolRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn SchoolTransaction>> {
        Ok(Box::new(self.begin().await?))
    }
}
