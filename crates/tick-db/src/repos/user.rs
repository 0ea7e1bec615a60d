//! Contact records for task owners.

use chrono::Utc;

use tick_core::entities::User;
use tick_core::ids::PREFIX_USER;
use tick_core::validation::{validate_email, validate_name};

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::TaskStore;

const SELECT_COLS: &str = "id, name, email, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl TaskStore {
    /// Register a contact.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a bad name or address, or when the
    /// address is already registered.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, DatabaseError> {
        let name = validate_name(name)?;
        let email = validate_email(email)?;
        if self.find_user_by_email(&email).await?.is_some() {
            return Err(DatabaseError::Validation(format!(
                "email '{email}' is already registered"
            )));
        }

        let id = self.db().generate_id(PREFIX_USER).await?;
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO users ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                libsql::params![id.as_str(), name.as_str(), email.as_str(), now.to_rfc3339()],
            )
            .await?;

        tracing::debug!(user_id = %id, "user created");
        Ok(User {
            id,
            name,
            email,
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such user exists.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        self.find_user(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Contact lookup by owner ID. `None` when the owner has no record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE lower(email) = lower(?1)"),
                [email.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Users in registration order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users ORDER BY rowid LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_user, test_store};

    #[tokio::test]
    async fn create_and_get_user() {
        let store = test_store().await;
        let user = store.create_user("  Ada Lovelace ", "ada@example.com").await.unwrap();

        assert!(user.id.starts_with("usr-"));
        assert_eq!(user.name, "Ada Lovelace");

        let fetched = store.get_user(&user.id).await.unwrap();
        assert_eq!(fetched.email, "ada@example.com");
        assert!(store.find_user("usr-missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_invalid_contacts() {
        let store = test_store().await;
        assert!(matches!(
            store.create_user("", "ada@example.com").await,
            Err(DatabaseError::Validation(_))
        ));
        assert!(matches!(
            store.create_user(&"x".repeat(51), "ada@example.com").await,
            Err(DatabaseError::Validation(_))
        ));
        assert!(matches!(
            store.create_user("Ada", "not-an-address").await,
            Err(DatabaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = test_store().await;
        seed_user(&store, "Ada").await;
        let dup = store.create_user("Another Ada", "ADA@example.com").await;
        assert!(matches!(dup, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn list_users_in_registration_order() {
        let store = test_store().await;
        seed_user(&store, "Ada").await;
        seed_user(&store, "Bob").await;
        seed_user(&store, "Cy").await;

        let names: Vec<String> = store
            .list_users(2)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Bob"]);
    }
}
