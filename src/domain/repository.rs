use async_trait::async_trait;

use super::error::StoreResult;
use super::todo::Todo;

/// Whole-collection storage for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Reads every stored todo. A missing or unreadable backing store yields an empty collection.
    async fn load(&self) -> Vec<Todo>;
    /// Replaces the stored collection with `todos`.
    async fn save(&self, todos: &[Todo]) -> StoreResult<()>;
}
