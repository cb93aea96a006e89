use std::{
    path::PathBuf,
    sync::Arc,
};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::domain::{error::StoreResult, repository::TodoRepository, todo::Todo};

/// Stores the whole todo collection as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileTodoRepository {
    path: Arc<PathBuf>,
}

impl JsonFileTodoRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Arc::new(path.into()) }
    }
}

#[async_trait]
impl TodoRepository for JsonFileTodoRepository {
    async fn load(&self) -> Vec<Todo> {
        let text = match fs::read_to_string(&*self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable todo file, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(todos) => todos,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "malformed todo file, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, todos: &[Todo]) -> StoreResult<()> {
        let mut json = serde_json::to_string_pretty(todos)?;
        json.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() { fs::create_dir_all(parent).await?; }
        }

        // Write beside the target and rename over it so readers never see half a document.
        let file_name = self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "todos.json".into());
        let temp_path = self.path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&temp_path, json.as_bytes()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &*self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), count = todos.len(), "saved todos");
        Ok(())
    }
}
