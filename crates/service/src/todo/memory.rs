use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::todo_item::Model;

use crate::errors::ServiceError;
use crate::todo::repository::TodoRepository;

/// In-memory repository backed by a Vec, preserving insertion order.
/// Swappable stand-in for the SeaORM backend in unit and HTTP tests;
/// `update_full` on a missing row reports the same row-gone conflict the
/// database backend would.
#[derive(Default)]
pub struct MemoryTodoRepository {
    items: RwLock<Vec<Model>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, items: Vec<Model>) {
        self.items.write().await.extend(items);
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn list_active(&self) -> Result<Vec<Model>, ServiceError> {
        let guard = self.items.read().await;
        Ok(guard.iter().filter(|i| !i.is_completed).cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
        let guard = self.items.read().await;
        Ok(guard.iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, item: &Model) -> Result<u64, ServiceError> {
        self.items.write().await.push(item.clone());
        Ok(1)
    }

    async fn update_full(&self, id: Uuid, item: &Model) -> Result<u64, ServiceError> {
        let mut guard = self.items.write().await;
        match guard.iter_mut().find(|i| i.id == id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(1)
            }
            None => Err(ServiceError::Conflict(id)),
        }
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let guard = self.items.read().await;
        Ok(guard.iter().any(|i| i.id == id))
    }

    async fn exists_by_description(&self, description: &str) -> Result<bool, ServiceError> {
        let needle = description.to_lowercase();
        let guard = self.items.read().await;
        Ok(guard
            .iter()
            .any(|i| !i.is_completed && i.description.to_lowercase() == needle))
    }
}
