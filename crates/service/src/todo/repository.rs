use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use models::todo_item::{ActiveModel, Column, Entity, Model};

use crate::errors::ServiceError;

/// Storage gateway over the todo item collection.
///
/// `update_full` reports [`ServiceError::Conflict`] when the row it targeted
/// was concurrently modified or removed; callers disambiguate the two cases
/// with `exists_by_id`. The insert/update operations return rows affected
/// (exactly 1 on success).
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All items that are not completed. Completed items drop out of this
    /// view but remain fetchable by id.
    async fn list_active(&self) -> Result<Vec<Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError>;
    async fn insert(&self, item: &Model) -> Result<u64, ServiceError>;
    async fn update_full(&self, id: Uuid, item: &Model) -> Result<u64, ServiceError>;
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// Case-insensitive match against active items only.
    async fn exists_by_description(&self, description: &str) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmTodoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTodoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for SeaOrmTodoRepository {
    async fn list_active(&self) -> Result<Vec<Model>, ServiceError> {
        Entity::find()
            .filter(Column::IsCompleted.eq(false))
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
        Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn insert(&self, item: &Model) -> Result<u64, ServiceError> {
        let am = ActiveModel {
            id: Set(item.id),
            description: Set(item.description.clone()),
            is_completed: Set(item.is_completed),
        };
        Entity::insert(am)
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update_full(&self, id: Uuid, item: &Model) -> Result<u64, ServiceError> {
        // Filtered update instead of load-then-save: zero rows matched means
        // the row changed or vanished underneath us, the typed conflict case.
        let res = Entity::update_many()
            .col_expr(Column::Description, Expr::value(item.description.clone()))
            .col_expr(Column::IsCompleted, Expr::value(item.is_completed))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::Conflict(id));
        }
        Ok(res.rows_affected)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let n = Entity::find_by_id(id).count(&self.db).await.map_err(db_err)?;
        Ok(n > 0)
    }

    async fn exists_by_description(&self, description: &str) -> Result<bool, ServiceError> {
        let n = Entity::find()
            .filter(Column::IsCompleted.eq(false))
            .filter(
                Expr::expr(Func::lower(Expr::col(Column::Description)))
                    .eq(description.to_lowercase()),
            )
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(n > 0)
    }
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}
