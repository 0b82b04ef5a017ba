// SQLite Transaction Implementation

use crate::crud;
use crate::entity::SqlEntity;
use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::NaiveDate;
use schoolhouse_core::domain::{
    Class, ClassId, Filter, Link, NewClass, NewTimeOffRequest, StaffId, StudentId, SubstituteId,
    TimeOffRequestId,
};
use schoolhouse_core::error::Result;
use schoolhouse_core::port::{SchoolTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

/// Generic CRUD inside one caller-controlled transaction
///
/// Foreign keys are deferred, so rows may be written in any order; a dangling
/// reference surfaces as a FOREIGN KEY violation from `commit`. Dropping
/// without committing rolls back.
pub struct SqliteSchoolTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
}

impl SqliteSchoolTransaction {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    pub async fn create<E: SqlEntity>(&mut self, draft: &E::Draft) -> Result<E::Id> {
        crud::insert::<E>(&mut self.tx, draft).await
    }

    pub async fn get<E: SqlEntity>(&mut self, id: &E::Id) -> Result<Option<E>> {
        crud::get::<E>(&mut self.tx, id).await
    }

    pub async fn read<E: SqlEntity>(&mut self, filter: &Filter<E::Field>) -> Result<Vec<E>> {
        crud::select::<E>(&mut self.tx, filter).await
    }

    pub async fn update<E: SqlEntity>(&mut self, id: &E::Id, draft: &E::Draft) -> Result<()> {
        crud::update::<E>(&mut self.tx, id, draft).await
    }

    pub async fn delete<E: SqlEntity>(&mut self, id: &E::Id) -> Result<()> {
        crud::delete::<E>(&mut self.tx, id).await
    }

    pub async fn link(&mut self, link: &Link) -> Result<bool> {
        crud::insert_link(&mut self.tx, link, false).await
    }

    pub async fn unlink(&mut self, link: &Link) -> Result<()> {
        crud::delete_link(&mut self.tx, link).await
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Transaction for SqliteSchoolTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl SchoolTransaction for SqliteSchoolTransaction {
    async fn staff_id_by_number(&mut self, number: &str) -> Result<Option<StaffId>> {
        sqlx::query_scalar("SELECT ID FROM Staff WHERE Number = ?")
            .bind(number)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)
    }

    async fn substitute_id_by_number(&mut self, number: &str) -> Result<Option<SubstituteId>> {
        sqlx::query_scalar("SELECT ID FROM Substitute WHERE Number = ?")
            .bind(number)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)
    }

    async fn class_by_number(&mut self, number: &str) -> Result<Option<Class>> {
        let row = sqlx::query("SELECT * FROM Class WHERE Number = ?")
            .bind(number)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        row.map(|r| Class::decode(&r).map_err(map_sqlx_error))
            .transpose()
    }

    async fn room_exists(&mut self, number: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Room WHERE Number = ?")
            .bind(number)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count > 0)
    }

    async fn class_type_exists(&mut self, code: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ClassType WHERE ID = ?")
            .bind(code)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count > 0)
    }

    async fn substitute_covers(
        &mut self,
        substitute_id: SubstituteId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM Availability
            WHERE SubstituteID = ? AND StartDate <= ? AND EndDate >= ?
            "#,
        )
        .bind(substitute_id)
        .bind(start)
        .bind(end)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;
        Ok(count > 0)
    }

    async fn insert_time_off(&mut self, request: &NewTimeOffRequest) -> Result<TimeOffRequestId> {
        crud::insert::<schoolhouse_core::domain::TimeOffRequest>(&mut self.tx, request).await
    }

    async fn next_class_id(&mut self) -> Result<ClassId> {
        sqlx::query_scalar("SELECT COALESCE(MAX(ID), 0) + 1 FROM Class")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert_class(&mut self, id: ClassId, class: &NewClass) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO Class (ID, Number, ClassTypeID, RoomNumber, StartTime, Duration)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&class.number)
        .bind(&class.class_type_id)
        .bind(&class.room_number)
        .bind(class.start_time)
        .bind(class.duration_minutes)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn link_if_absent(&mut self, link: &Link) -> Result<bool> {
        crud::insert_link(&mut self.tx, link, true).await
    }

    async fn homeroom_candidates(
        &mut self,
        grade: &str,
        class_id: ClassId,
    ) -> Result<Vec<StudentId>> {
        sqlx::query_scalar(
            r#"
            SELECT s.ID
            FROM Student s
            WHERE s.Grade = ?
              AND NOT EXISTS (
                  SELECT 1
                  FROM StudentToClass stc
                  JOIN Class c ON c.ID = stc.ClassID
                  WHERE stc.StudentID = s.ID
                    AND UPPER(c.ClassTypeID) LIKE '%HR%'
                    AND c.ID <> ?
              )
            ORDER BY s.ID
            "#,
        )
        .bind(grade)
        .bind(class_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)
    }
}
