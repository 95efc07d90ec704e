use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(String),
}

/// Records that can live in a [`Store`].
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    /// Called by the store after a successful mutation.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Insertion-ordered in-process record store.
///
/// Stands in for the persistence collaborator: handlers await its calls the
/// same way they would await a database pool, and the `RwLock` makes writes
/// exclusive while leaving reads concurrent across request tasks.
#[derive(Debug)]
pub struct Store<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Entity> Store<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All records, oldest first.
    pub async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn find(&self, id: &str) -> Result<T, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub async fn insert(&self, record: T) -> T {
        let mut records = self.records.write().await;
        records.push(record.clone());
        tracing::debug!(id = %record.id(), "record inserted");
        record
    }

    /// Apply `apply` to the record with the given id, then stamp its
    /// update time. The closure only ever sees fields the caller chose to
    /// change, which is what keeps partial updates partial.
    pub async fn update(&self, id: &str, apply: impl FnOnce(&mut T)) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        apply(record);
        record.touch(Utc::now());
        Ok(record.clone())
    }

    pub async fn remove(&self, id: &str) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Ok(records.remove(index))
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl<T: Entity> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Widget {
        id: String,
        label: Option<String>,
        updated_at: DateTime<Utc>,
    }

    impl Widget {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                label: None,
                updated_at: Utc::now(),
            }
        }
    }

    impl Entity for Widget {
        fn id(&self) -> &str {
            &self.id
        }

        fn touch(&mut self, at: DateTime<Utc>) {
            self.updated_at = at;
        }
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = Store::new();
        store.insert(Widget::new("a")).await;
        store.insert(Widget::new("b")).await;
        store.insert(Widget::new("c")).await;

        let ids: Vec<String> = store.list().await.into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn find_unknown_id_is_not_found() {
        let store: Store<Widget> = Store::new();
        assert!(matches!(
            store.find("missing").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_applies_closure_and_touches() {
        let store = Store::new();
        let before = store.insert(Widget::new("a")).await;

        let after = store
            .update("a", |w| w.label = Some("renamed".to_string()))
            .await
            .unwrap();

        assert_eq!(after.label.as_deref(), Some("renamed"));
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn remove_deletes_exactly_one_record() {
        let store = Store::new();
        store.insert(Widget::new("a")).await;
        store.insert(Widget::new("b")).await;

        store.remove("a").await.unwrap();
        assert_eq!(store.count().await, 1);
        assert!(store.remove("a").await.is_err());
    }
}
