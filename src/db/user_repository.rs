use crate::db::models::{User, UserFields};
use crate::errors::Error;
use crate::schema::users;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Repository for user rows in the SQLite database.
///
/// Every method is a single statement; ids come from the table's
/// `AUTOINCREMENT` sequence.
pub struct UserRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        UserRepository { conn }
    }

    /// Inserts a new user and returns it with its generated id
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the insert fails
    pub fn insert_user(&mut self, fields: &UserFields) -> Result<User, Error> {
        let user = diesel::insert_into(users::table)
            .values(fields)
            .returning(User::as_returning())
            .get_result(self.conn)?;
        Ok(user)
    }

    /// Retrieves a single user by id
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no row has this id, `Error::Storage` if the query fails
    pub fn get_user(&mut self, user_id: i64) -> Result<User, Error> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(self.conn)
            .optional()?
            .ok_or(Error::NotFound(user_id))
    }

    /// Retrieves every user, ordered by id
    pub fn list_users(&mut self) -> Result<Vec<User>, Error> {
        let found = users::table
            .order_by(users::id.asc())
            .select(User::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Replaces the name and email of an existing user, keeping its id
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no row has this id, `Error::Storage` if the update fails
    pub fn update_user(&mut self, user_id: i64, fields: &UserFields) -> Result<User, Error> {
        diesel::update(users::table.find(user_id))
            .set(fields)
            .returning(User::as_returning())
            .get_result(self.conn)
            .optional()?
            .ok_or(Error::NotFound(user_id))
    }

    /// Deletes a user by id
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no row was deleted
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), Error> {
        let deleted = diesel::delete(users::table.find(user_id)).execute(self.conn)?;
        if deleted == 0 {
            return Err(Error::NotFound(user_id));
        }
        Ok(())
    }
}
