use super::{StoreError, StoreFuture, UserStore};
use crate::model::UserRecord;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    records: Vec<UserRecord>,
}

/// Process-local store, used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    state: RwLock<MemoryState>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.records.is_empty()
    }
}

impl UserStore for MemoryUserStore {
    fn save(&self, record: UserRecord) -> StoreFuture<'_, UserRecord> {
        Box::pin(async move {
            if let Some(id) = record.id() {
                return Err(StoreError::AlreadyPersisted(id));
            }

            let mut state = self.state.write().await;
            state.last_id += 1;
            let record = record.with_id(state.last_id);
            state.records.push(record.clone());

            Ok(record)
        })
    }

    fn find_by_user_name<'a>(&'a self, user_name: &'a str) -> StoreFuture<'a, Option<UserRecord>> {
        Box::pin(async move {
            let state = self.state.read().await;
            let mut matches = state
                .records
                .iter()
                .filter(|record| record.user_name() == user_name);

            match (matches.next(), matches.next()) {
                (None, _) => Ok(None),
                (Some(record), None) => Ok(Some(record.clone())),
                (Some(_), Some(_)) => Err(StoreError::NonUnique(user_name.to_string())),
            }
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
