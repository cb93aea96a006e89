use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{error::StoreResult, repository::TodoRepository, todo::Todo};

/// Keeps the collection in process memory. Used by unit tests in place of the JSON file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    items: Arc<Mutex<Vec<Todo>>>,
    saves: Arc<Mutex<usize>>,
}

impl InMemoryTodoRepository {
    /// Number of `save` calls seen so far.
    pub fn save_count(&self) -> usize { *self.saves.lock().unwrap_or_else(|e| e.into_inner()) }

    /// The collection exactly as last saved, in stored order.
    pub fn snapshot(&self) -> Vec<Todo> { self.items.lock().unwrap_or_else(|e| e.into_inner()).clone() }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn load(&self) -> Vec<Todo> { self.snapshot() }

    async fn save(&self, todos: &[Todo]) -> StoreResult<()> {
        *self.items.lock().unwrap_or_else(|e| e.into_inner()) = todos.to_vec();
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
