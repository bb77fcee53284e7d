//! User persistence.
//!
//! Handlers only see [`UserStore`]; the server picks [`PgUserStore`] when a DSN
//! is configured and [`MemoryUserStore`] otherwise.
//!
//! The store does not enforce unique user names. Signup checks
//! [`UserStore::exists_by_user_name`] before [`UserStore::save`], which is a
//! check-then-act race under concurrent signups with the same name.

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use crate::model::UserRecord;
use std::{future::Future, pin::Pin};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("more than one user named {0:?}")]
    NonUnique(String),
    #[error("user record {0} is already persisted")]
    AlreadyPersisted(i64),
}

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

pub trait UserStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    fn save(&self, record: UserRecord) -> StoreFuture<'_, UserRecord>;

    /// Fetch the single record named `user_name`.
    ///
    /// More than one match is reported as [`StoreError::NonUnique`].
    fn find_by_user_name<'a>(&'a self, user_name: &'a str) -> StoreFuture<'a, Option<UserRecord>>;

    /// Check that the backing storage is reachable.
    fn ping(&self) -> StoreFuture<'_, ()>;

    fn exists_by_user_name<'a>(&'a self, user_name: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move { Ok(self.find_by_user_name(user_name).await?.is_some()) })
    }

    /// True when `user_name` exists and its stored password equals `password` exactly.
    ///
    /// The comparison is against the stored (ROT13) value as-is.
    fn match_credentials<'a>(
        &'a self,
        user_name: &'a str,
        password: &'a str,
    ) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            Ok(self
                .find_by_user_name(user_name)
                .await?
                .is_some_and(|record| record.password() == password))
        })
    }
}
