use super::UserStore;
use crate::config::StoreBackend;
use crate::db::{User, UserFields};
use crate::errors::Error;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug)]
struct Inner {
    users: HashMap<i64, User>,
    next_id: i64,
}

/// Keeps users in a map behind a single mutex.
///
/// The id counter lives under the same lock as the map, so an id is only
/// handed out together with the insert that uses it.
#[derive(Debug)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, Error> {
        self.inner
            .lock()
            .map_err(|_| Error::Storage("user store lock poisoned".into()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    async fn create(&self, fields: UserFields) -> Result<User, Error> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        let user = fields.into_user(id);
        inner.users.insert(id, user.clone());
        inner.next_id += 1;
        debug!("Created user {}", id);
        Ok(user)
    }

    async fn get(&self, id: i64) -> Result<User, Error> {
        let inner = self.lock()?;
        inner.users.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        let inner = self.lock()?;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        drop(inner);
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn update(&self, id: i64, fields: UserFields) -> Result<User, Error> {
        let mut inner = self.lock()?;
        let slot = inner.users.get_mut(&id).ok_or(Error::NotFound(id))?;
        *slot = fields.into_user(id);
        debug!("Updated user {}", id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let mut inner = self.lock()?;
        inner.users.remove(&id).ok_or(Error::NotFound(id))?;
        debug!("Deleted user {}", id);
        Ok(())
    }
}
