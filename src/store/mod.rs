//! User storage backends.
//!
//! Handlers only ever see an `Arc<dyn UserStore>`; which backend sits behind it
//! is decided once, from configuration, by [`open_store`].

mod memory;
mod relational;

use crate::config::{StoreBackend, StoreConfig};
use crate::db::{User, UserFields};
use crate::errors::Error;
use std::sync::Arc;
use tracing::info;

pub use memory::InMemoryStore;
pub use relational::RelationalStore;

/// Create, read, update and delete operations over a collection of users.
///
/// Each mutation applies atomically with respect to other calls on the same store.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Which backend this store writes to
    fn backend(&self) -> StoreBackend;

    /// Stores a new user under a freshly allocated id
    async fn create(&self, fields: UserFields) -> Result<User, Error>;

    /// Returns the user with `id`, or `Error::NotFound`
    async fn get(&self, id: i64) -> Result<User, Error>;

    /// Snapshot of every stored user, ordered by id
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// Replaces every field of user `id` except the id itself
    async fn update(&self, id: i64, fields: UserFields) -> Result<User, Error>;

    /// Removes user `id`; removing a missing id is `Error::NotFound`
    async fn delete(&self, id: i64) -> Result<(), Error>;
}

/// Builds the store selected by `config`
///
/// # Errors
///
/// Returns `Error::Storage` if the SQLite database cannot be opened
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn UserStore>, Error> {
    let store: Arc<dyn UserStore> = match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryStore::new()),
        StoreBackend::Sqlite => Arc::new(RelationalStore::open(&config.database_path)?),
    };
    info!("Using {} user store", store.backend());
    Ok(store)
}
