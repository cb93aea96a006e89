use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::error::{StoreError, StoreResult};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{normalize_title, now_millis, Todo, TodoId};

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    /// All todos, newest (highest id) first.
    async fn list(&self) -> StoreResult<Vec<Todo>>;
    async fn add(&self, title: &str) -> StoreResult<Todo>;
    /// `None` when no todo has `id`.
    async fn toggle_done(&self, id: TodoId) -> StoreResult<Option<Todo>>;
    /// `true` when a todo was removed.
    async fn remove(&self, id: TodoId) -> StoreResult<bool>;
    async fn clear(&self) -> StoreResult<()>;
}

/// Every call re-reads the repository; nothing is cached between calls.
///
/// Mutations on one service (and its clones) are serialized so two concurrent
/// read-modify-write cycles cannot drop each other's change. Writers in other
/// processes are not coordinated with.
#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
    write_lock: Arc<Mutex<()>>,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo, write_lock: Arc::new(Mutex::new(())) } }

    pub fn repository(&self) -> &R { &self.repo }

    async fn load_sorted(&self) -> Vec<Todo> {
        let mut todos = self.repo.load().await;
        todos.sort_by(|a, b| b.id.cmp(&a.id));
        todos
    }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self) -> StoreResult<Vec<Todo>> { Ok(self.load_sorted().await) }

    async fn add(&self, title: &str) -> StoreResult<Todo> {
        let title = normalize_title(title).ok_or_else(|| StoreError::Validation("title is required".into()))?;

        let _guard = self.write_lock.lock().await;
        let existing = self.load_sorted().await;
        let now = now_millis();
        let todo = Todo::new(TodoId::next(now, &existing), title, now);

        let mut next = Vec::with_capacity(existing.len() + 1);
        next.push(todo.clone());
        next.extend(existing);
        self.repo.save(&next).await?;

        tracing::info!(id = %todo.id, "todo added");
        Ok(todo)
    }

    async fn toggle_done(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.load_sorted().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(%id, "toggle on unknown todo");
            return Ok(None);
        };
        todo.toggle(now_millis());
        let updated = todo.clone();
        self.repo.save(&todos).await?;

        tracing::info!(%id, status = ?updated.status, "todo toggled");
        Ok(Some(updated))
    }

    async fn remove(&self, id: TodoId) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let todos = self.load_sorted().await;
        let before = todos.len();
        let next: Vec<Todo> = todos.into_iter().filter(|t| t.id != id).collect();
        if next.len() == before {
            tracing::debug!(%id, "remove on unknown todo");
            return Ok(false);
        }
        self.repo.save(&next).await?;

        tracing::info!(%id, "todo removed");
        Ok(true)
    }

    async fn clear(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.repo.save(&[]).await?;
        tracing::info!("todos cleared");
        Ok(())
    }
}
