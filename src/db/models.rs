use crate::errors::Error;
use crate::schema::users;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    /// Identifier assigned by the store at creation, never changed afterwards
    pub id: i64,
    /// Display name of the user
    pub name: String,
    /// Contact email of the user
    pub email: String,
}

/// The replaceable part of a user, as sent by clients on create and update.
///
/// Any `id` key in the payload is ignored; ids only come from the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserFields {
    pub name: String,
    pub email: String,
}

impl UserFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        UserFields {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Trims both fields and rejects blank values or an email without `@`
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` describing the first offending field
    pub fn validate(self) -> Result<Self, Error> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();

        if name.is_empty() {
            return Err(Error::Decode("name is required".into()));
        }
        if email.is_empty() {
            return Err(Error::Decode("email is required".into()));
        }
        if !email.contains('@') {
            return Err(Error::Decode(format!("email '{}' is not valid", email)));
        }

        Ok(UserFields { name, email })
    }

    /// Attaches an id, producing the full record
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
