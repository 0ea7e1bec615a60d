//! Shared test utilities for tick-db unit tests.

pub(crate) mod helpers {
    use chrono::{NaiveDate, NaiveTime};
    use tick_core::entities::{NewTask, Task, User};

    use crate::service::TaskStore;

    /// Create an in-memory store.
    pub async fn test_store() -> TaskStore {
        TaskStore::open_local(":memory:").await.unwrap()
    }

    /// Register a contact and return it.
    pub async fn seed_user(store: &TaskStore, name: &str) -> User {
        let email = format!("{}@example.com", name.to_lowercase());
        store.create_user(name, &email).await.unwrap()
    }

    /// Create a task scheduled at `date time` for `owner`.
    pub async fn seed_scheduled(
        store: &TaskStore,
        owner: &User,
        title: &str,
        date: &str,
        time: &str,
    ) -> Task {
        let new = NewTask::titled(title).scheduled(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        );
        store.create_task(&owner.id, &new).await.unwrap()
    }
}
