use super::UserStore;
use crate::config::StoreBackend;
use crate::db::{Database, User, UserFields, UserRepository};
use crate::errors::Error;
use tracing::{debug, error};

/// Stores users in the SQLite `users` table.
///
/// Holds no lock of its own; each call is one statement on one pooled
/// connection, run on tokio's blocking pool.
#[derive(Clone, Debug)]
pub struct RelationalStore {
    database: Database,
}

impl RelationalStore {
    pub fn new(database: Database) -> Self {
        RelationalStore { database }
    }

    /// Opens (and if needed creates) the database file at `db_path`
    pub fn open(db_path: &str) -> Result<Self, Error> {
        Ok(Self::new(Database::new(db_path)?))
    }

    async fn with_repository<T, F>(&self, op: &'static str, f: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&mut UserRepository<'_>) -> Result<T, Error> + Send + 'static,
    {
        let database = self.database.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = database.get_conn()?;
            let mut repo = UserRepository::new(&mut conn);
            f(&mut repo)
        })
        .await?;

        if let Err(Error::Storage(msg)) = &result {
            error!("SQLite {} failed: {}", op, msg);
        }
        result
    }
}

#[async_trait::async_trait]
impl UserStore for RelationalStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }

    async fn create(&self, fields: UserFields) -> Result<User, Error> {
        let user = self
            .with_repository("insert", move |repo| repo.insert_user(&fields))
            .await?;
        debug!("Created user {}", user.id);
        Ok(user)
    }

    async fn get(&self, id: i64) -> Result<User, Error> {
        self.with_repository("select", move |repo| repo.get_user(id))
            .await
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.with_repository("select", |repo| repo.list_users())
            .await
    }

    async fn update(&self, id: i64, fields: UserFields) -> Result<User, Error> {
        let user = self
            .with_repository("update", move |repo| repo.update_user(id, &fields))
            .await?;
        debug!("Updated user {}", id);
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        self.with_repository("delete", move |repo| repo.delete_user(id))
            .await?;
        debug!("Deleted user {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct TempDb {
        path: PathBuf,
    }

    impl TempDb {
        fn new() -> Self {
            let path = std::env::temp_dir().join(format!("user-registry-{}.db", uuid::Uuid::new_v4()));
            TempDb { path }
        }

        fn open(&self) -> RelationalStore {
            RelationalStore::open(self.path.to_str().unwrap()).unwrap()
        }
    }

    impl Drop for TempDb {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn ann() -> UserFields {
        UserFields::new("Ann", "a@x.com")
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let db = TempDb::new();
        let store = db.open();

        let created = store.create(ann()).await.unwrap();
        assert_eq!(created, ann().into_user(1));
        assert_eq!(store.get(1).await.unwrap(), created);
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_ids() {
        let db = TempDb::new();
        let store = Arc::new(db.open());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create(UserFields::new(format!("user{}", i), "u@x.com"))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = BTreeSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids, (1..=16).collect::<BTreeSet<i64>>());
    }

    #[tokio::test]
    async fn update_preserves_id() {
        let db = TempDb::new();
        let store = db.open();
        let created = store.create(ann()).await.unwrap();

        let updated = store
            .update(created.id, UserFields::new("Ann B", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ann B");
        assert!(matches!(store.update(42, ann()).await, Err(Error::NotFound(42))));
    }

    #[tokio::test]
    async fn delete_is_strict_and_ids_are_not_reused() {
        let db = TempDb::new();
        let store = db.open();
        let first = store.create(ann()).await.unwrap();

        store.delete(first.id).await.unwrap();
        assert!(matches!(store.get(first.id).await, Err(Error::NotFound(1))));
        assert!(matches!(store.delete(first.id).await, Err(Error::NotFound(1))));

        let next = store.create(ann()).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn records_survive_reopening() {
        let db = TempDb::new();
        let created = db.open().create(ann()).await.unwrap();
        assert_eq!(db.open().get(created.id).await.unwrap(), created);
    }
}
