#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::{error::StoreError, todo::{TodoId, TodoStatus}};
    use crate::infrastructure::memory_repo::InMemoryTodoRepository;

    fn service() -> TodoServiceImpl<InMemoryTodoRepository> {
        TodoServiceImpl::new(InMemoryTodoRepository::default())
    }

    #[tokio::test]
    async fn unit_add_then_list() {
        let service = service();
        let created = service.add("Buy milk").await.unwrap();
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.status, TodoStatus::Todo);
        assert_eq!(created.created_at, created.updated_at);

        let todos = service.list().await.unwrap();
        assert_eq!(todos, vec![created]);
    }

    #[tokio::test]
    async fn unit_list_is_newest_first() {
        let service = service();
        service.add("A").await.unwrap();
        service.add("B").await.unwrap();
        let titles: Vec<_> = service.list().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn unit_rapid_adds_get_unique_descending_ids() {
        let service = service();
        for i in 0..50 {
            service.add(&format!("todo {i}")).await.unwrap();
        }
        let todos = service.list().await.unwrap();
        assert_eq!(todos.len(), 50);
        assert!(todos.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn unit_add_trims_and_rejects_blank_titles() {
        let service = service();
        for blank in ["", "   ", "\n\t"] {
            let err = service.add(blank).await.unwrap_err();
            assert!(matches!(err, StoreError::Validation(ref m) if m == "title is required"));
        }
        assert_eq!(service.repository().save_count(), 0);

        let created = service.add("  buy milk  ").await.unwrap();
        assert_eq!(created.title, "buy milk");
    }

    #[tokio::test]
    async fn unit_add_prepends_to_stored_collection() {
        let service = service();
        let a = service.add("A").await.unwrap();
        let b = service.add("B").await.unwrap();
        let stored: Vec<_> = service.repository().snapshot().into_iter().map(|t| t.id).collect();
        assert_eq!(stored, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn unit_toggle_twice_restores_status() {
        let service = service();
        let a = service.add("A").await.unwrap();
        let b = service.add("B").await.unwrap();

        let first = service.toggle_done(b.id).await.unwrap().unwrap();
        assert_eq!(first.status, TodoStatus::Done);
        assert!(first.updated_at > b.updated_at);

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].status, TodoStatus::Done);
        assert_eq!(listed[1], a);

        let second = service.toggle_done(b.id).await.unwrap().unwrap();
        assert_eq!(second.status, TodoStatus::Todo);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.created_at, b.created_at);
        assert_eq!(second.title, b.title);
    }

    #[tokio::test]
    async fn unit_unknown_id_does_not_touch_storage() {
        let service = service();
        service.add("A").await.unwrap();
        let saves = service.repository().save_count();

        assert!(service.toggle_done(TodoId(42)).await.unwrap().is_none());
        assert!(!service.remove(TodoId(42)).await.unwrap());
        assert_eq!(service.repository().save_count(), saves);
    }

    #[tokio::test]
    async fn unit_remove_then_clear() {
        let service = service();
        let a = service.add("A").await.unwrap();
        let b = service.add("B").await.unwrap();

        assert!(service.remove(a.id).await.unwrap());
        assert_eq!(service.list().await.unwrap(), vec![b]);

        service.clear().await.unwrap();
        service.clear().await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unit_concurrent_adds_are_not_lost() {
        let service = service();
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.add(&format!("t{i}")).await.unwrap() })
            })
            .collect();
        for handle in handles { handle.await.unwrap(); }
        assert_eq!(service.list().await.unwrap().len(), 20);
    }
}
