use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::todo_item::Model;

use crate::errors::ServiceError;
use crate::todo::repository::TodoRepository;

/// Body accepted by the create operation. Only the description is taken
/// from the client; the id is assigned here and the completed flag always
/// starts false.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTodoItem {
    #[serde(default)]
    pub description: Option<String>,
}

/// Application service encapsulating the todo item business rules:
/// description presence and uniqueness on create, id matching and conflict
/// disambiguation on update.
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        self.repo.list_active().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Model, ServiceError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("todo item"))
    }

    /// Full replace by id. The path id and the body id must match exactly.
    #[instrument(skip(self, item), fields(id = %id))]
    pub async fn update(&self, id: Uuid, item: Model) -> Result<(), ServiceError> {
        if id != item.id {
            return Err(ServiceError::Validation(
                "Item id does not match the path id".into(),
            ));
        }
        match self.repo.update_full(id, &item).await {
            Ok(_) => Ok(()),
            Err(ServiceError::Conflict(_)) => {
                // Row gone resolves to an ordinary not-found; a genuine write
                // race is not retried and propagates to the caller.
                if self.repo.exists_by_id(id).await? {
                    Err(ServiceError::Conflict(id))
                } else {
                    Err(ServiceError::not_found("todo item"))
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Create a new active item with a freshly assigned id.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewTodoItem) -> Result<Model, ServiceError> {
        let description = match input.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(ServiceError::Validation("Description is required".into())),
        };
        if self.repo.exists_by_description(&description).await? {
            return Err(ServiceError::Validation("Description already exists".into()));
        }
        let item = Model {
            id: Uuid::new_v4(),
            description,
            is_completed: false,
        };
        self.repo.insert(&item).await?;
        info!(id = %item.id, "todo_item_created");
        Ok(item)
    }
}
