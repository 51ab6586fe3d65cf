//! Generic repository over a SeaORM entity
//!
//! Domain repositories wrap a `BaseRepository` for the common CRUD plumbing and
//! add their own queries on top via `db()`.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait,
};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::common::error::DatabaseResult;

/// Generic CRUD repository for entities with a UUID primary key.
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _marker: PhantomData<E>,
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    /// Access the underlying connection for custom queries
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a new row, returning the stored model
    pub async fn insert(&self, active_model: E::ActiveModel) -> DatabaseResult<E::Model> {
        let model = active_model.insert(&self.db).await?;
        Ok(model)
    }

    /// Update an existing row, returning the stored model
    pub async fn update(&self, active_model: E::ActiveModel) -> DatabaseResult<E::Model> {
        let model = active_model.update(&self.db).await?;
        Ok(model)
    }

    /// Find a row by its UUID primary key
    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<E::Model>> {
        let model = E::find_by_id(id).one(&self.db).await?;
        Ok(model)
    }

    /// Delete a row by its UUID primary key, returning the number of rows affected
    pub async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<u64> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
