mod models;
mod user_repository;

use crate::errors::Error;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tracing::info;

pub use models::*;
pub use user_repository::*;

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL
)";

/// Lets concurrent writers wait on SQLite's file lock instead of failing with `SQLITE_BUSY`
#[derive(Debug)]
struct BusyTimeout;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for BusyTimeout {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pooled handle to the SQLite database holding the `users` table
#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    /// Opens a connection pool on `db_path` and makes sure the `users` table exists
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the pool cannot be built or the table cannot be created
    pub fn new(db_path: &str) -> Result<Self, Error> {
        let manager = ConnectionManager::<SqliteConnection>::new(db_path);
        let pool = Pool::builder()
            .connection_customizer(Box::new(BusyTimeout))
            .build(manager)?;

        let database = Database {
            pool: Arc::new(pool),
        };
        database.ensure_schema()?;
        info!("Opened SQLite database at {}", db_path);

        Ok(database)
    }

    pub fn get_conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, Error> {
        Ok(self.pool.get()?)
    }

    fn ensure_schema(&self) -> Result<(), Error> {
        let mut conn = self.get_conn()?;
        conn.batch_execute(CREATE_USERS_TABLE)?;
        Ok(())
    }
}
