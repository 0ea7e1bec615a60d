//! Task repository: CRUD, filtered lookup, and conditional updates.

use chrono::{NaiveDate, Utc};

use tick_core::entities::{NewTask, Task};
use tick_core::ids::PREFIX_TASK;
use tick_core::schedule::{DATE_FORMAT, DEFAULT_DURATION_MINUTES};
use tick_core::validation::validate_title;

use crate::error::DatabaseError;
use crate::helpers::{
    date_value, get_bool, get_opt_date, get_opt_string, get_opt_time, parse_datetime, time_value,
};
use crate::service::TaskStore;
use crate::updates::task::{TaskExpectation, TaskUpdate};

const SELECT_COLS: &str = "id, owner_id, title, description, scheduled_date, scheduled_time, \
     duration_minutes, completed, reminder_sent, created_at, updated_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    let duration = row.get::<i64>(6)?;
    Ok(Task {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        scheduled_date: get_opt_date(row, 4)?,
        scheduled_time: get_opt_time(row, 5)?,
        duration_minutes: u32::try_from(duration)
            .map_err(|_| DatabaseError::InvalidState(format!("bad duration {duration}")))?,
        completed: get_bool(row, 7)?,
        reminder_sent: get_bool(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

fn flag(value: bool) -> libsql::Value {
    libsql::Value::Integer(i64::from(value))
}

/// Result ordering for task queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskOrder {
    /// Scheduled date, then time, ascending. Unscheduled tasks come first in
    /// insertion order.
    #[default]
    Schedule,
    /// Insertion order.
    Inserted,
}

impl TaskOrder {
    const fn sql(self) -> &'static str {
        match self {
            Self::Schedule => "scheduled_date, scheduled_time, rowid",
            Self::Inserted => "rowid",
        }
    }
}

/// Filter criteria for task queries. Unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub owner_id: Option<String>,
    pub completed: Option<bool>,
    pub reminder_sent: Option<bool>,
    /// Only tasks with both a scheduled date and time.
    pub fully_scheduled: bool,
    pub scheduled_on: Option<NaiveDate>,
    /// Inclusive lower bound on the scheduled date.
    pub scheduled_from: Option<NaiveDate>,
    /// Inclusive upper bound on the scheduled date.
    pub scheduled_until: Option<NaiveDate>,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    pub order: TaskOrder,
    pub limit: Option<u32>,
}

impl TaskFilter {
    #[must_use]
    pub fn owned_by(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            ..Self::default()
        }
    }

    /// Pending, un-reminded, fully scheduled tasks dated within `from..=to`, across all owners.
    #[must_use]
    pub fn reminder_candidates(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            completed: Some(false),
            reminder_sent: Some(false),
            fully_scheduled: true,
            scheduled_from: Some(from),
            scheduled_until: Some(to),
            ..Self::default()
        }
    }

    fn where_clause(&self) -> (String, Vec<libsql::Value>) {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref owner) = self.owner_id {
            params.push(libsql::Value::Text(owner.clone()));
            conditions.push(format!("owner_id = ?{}", params.len()));
        }
        if let Some(completed) = self.completed {
            params.push(flag(completed));
            conditions.push(format!("completed = ?{}", params.len()));
        }
        if let Some(sent) = self.reminder_sent {
            params.push(flag(sent));
            conditions.push(format!("reminder_sent = ?{}", params.len()));
        }
        if self.fully_scheduled {
            conditions.push("scheduled_date IS NOT NULL AND scheduled_time IS NOT NULL".to_string());
        }
        if let Some(date) = self.scheduled_on {
            params.push(libsql::Value::Text(date.format(DATE_FORMAT).to_string()));
            conditions.push(format!("scheduled_date = ?{}", params.len()));
        }
        if let Some(from) = self.scheduled_from {
            params.push(libsql::Value::Text(from.format(DATE_FORMAT).to_string()));
            conditions.push(format!("scheduled_date >= ?{}", params.len()));
        }
        if let Some(to) = self.scheduled_until {
            params.push(libsql::Value::Text(to.format(DATE_FORMAT).to_string()));
            conditions.push(format!("scheduled_date <= ?{}", params.len()));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, params)
    }
}

impl TaskStore {
    /// Create a task owned by `owner_id`. New tasks are never completed or reminded.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank title or an unknown owner,
    /// or `DatabaseError` if the INSERT fails.
    pub async fn create_task(&self, owner_id: &str, new: &NewTask) -> Result<Task, DatabaseError> {
        let title = validate_title(&new.title)?;
        if self.find_user(owner_id).await?.is_none() {
            return Err(DatabaseError::Validation(format!("unknown owner '{owner_id}'")));
        }

        let duration_minutes = if new.duration_minutes == 0 {
            DEFAULT_DURATION_MINUTES
        } else {
            new.duration_minutes
        };
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TASK).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO tasks ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 0, ?8, ?9)"
                ),
                libsql::params_from_iter(vec![
                    libsql::Value::Text(id.clone()),
                    libsql::Value::Text(owner_id.to_string()),
                    libsql::Value::Text(title.clone()),
                    new.description
                        .clone()
                        .map_or(libsql::Value::Null, libsql::Value::Text),
                    date_value(new.scheduled_date),
                    time_value(new.scheduled_time),
                    libsql::Value::Integer(i64::from(duration_minutes)),
                    libsql::Value::Text(now.to_rfc3339()),
                    libsql::Value::Text(now.to_rfc3339()),
                ]),
            )
            .await?;

        tracing::debug!(task_id = %id, owner_id, "task created");

        Ok(Task {
            id,
            owner_id: owner_id.to_string(),
            title,
            description: new.description.clone(),
            scheduled_date: new.scheduled_date,
            scheduled_time: new.scheduled_time,
            duration_minutes,
            completed: false,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a task by ID regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such task exists.
    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_task(&row)
    }

    /// Fetch a task by ID, visible only to its owner.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the task does not exist or belongs to someone else.
    pub async fn get_owned_task(&self, owner_id: &str, id: &str) -> Result<Task, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1 AND owner_id = ?2"),
                [id, owner_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_task(&row)
    }

    /// All tasks matching `filter`, in the filter's order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
        let (where_clause, params) = filter.where_clause();

        // Title matching runs in Rust so case folding covers non-ASCII titles;
        // the SQL limit only applies when it cannot cut off later matches.
        let sql_limit = match (filter.limit, &filter.title_contains) {
            (Some(limit), None) => format!("LIMIT {limit}"),
            _ => String::new(),
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM tasks {where_clause} ORDER BY {} {sql_limit}",
            filter.order.sql()
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let needle = filter.title_contains.as_deref().map(str::to_lowercase);
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            let task = row_to_task(&row)?;
            if needle
                .as_deref()
                .is_none_or(|needle| task.title.to_lowercase().contains(needle))
            {
                tasks.push(task);
            }
        }
        if let Some(limit) = filter.limit {
            tasks.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(tasks)
    }

    /// First task matching `filter`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_one_task(&self, filter: &TaskFilter) -> Result<Option<Task>, DatabaseError> {
        let filter = TaskFilter {
            limit: Some(1),
            ..filter.clone()
        };
        Ok(self.find_tasks(&filter).await?.into_iter().next())
    }

    /// Apply `update` to task `id` only if the row still satisfies `expected`.
    ///
    /// The check and the write are one `UPDATE … WHERE … RETURNING`, so
    /// concurrent callers racing on the same precondition see exactly one
    /// winner. Returns the
    /// updated task, or `None` when the precondition no longer holds (or the
    /// task does not exist).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank new title, or
    /// `DatabaseError` if the statement fails.
    pub async fn conditional_update(
        &self,
        id: &str,
        expected: &TaskExpectation,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref title) = update.title {
            params.push(libsql::Value::Text(validate_title(title)?));
            sets.push(format!("title = ?{}", params.len()));
        }
        if let Some(ref description) = update.description {
            params.push(
                description
                    .clone()
                    .map_or(libsql::Value::Null, libsql::Value::Text),
            );
            sets.push(format!("description = ?{}", params.len()));
        }
        if let Some(date) = update.scheduled_date {
            params.push(date_value(date));
            sets.push(format!("scheduled_date = ?{}", params.len()));
        }
        if let Some(time) = update.scheduled_time {
            params.push(time_value(time));
            sets.push(format!("scheduled_time = ?{}", params.len()));
        }
        if let Some(minutes) = update.duration_minutes {
            let minutes = if minutes == 0 {
                DEFAULT_DURATION_MINUTES
            } else {
                minutes
            };
            params.push(libsql::Value::Integer(i64::from(minutes)));
            sets.push(format!("duration_minutes = ?{}", params.len()));
        }
        if let Some(completed) = update.completed {
            params.push(flag(completed));
            sets.push(format!("completed = ?{}", params.len()));
        }
        if let Some(sent) = update.reminder_sent {
            params.push(flag(sent));
            sets.push(format!("reminder_sent = ?{}", params.len()));
            sets.push("reminder_claim = NULL, reminder_claimed_at = NULL".to_string());
        }

        let mut conditions = Vec::new();
        params.push(libsql::Value::Text(id.to_string()));
        conditions.push(format!("id = ?{}", params.len()));
        if let Some(ref owner) = expected.owner_id {
            params.push(libsql::Value::Text(owner.clone()));
            conditions.push(format!("owner_id = ?{}", params.len()));
        }
        if let Some(completed) = expected.completed {
            params.push(flag(completed));
            conditions.push(format!("completed = ?{}", params.len()));
        }
        if let Some(sent) = expected.reminder_sent {
            params.push(flag(sent));
            conditions.push(format!("reminder_sent = ?{}", params.len()));
        }
        if let Some(ref token) = expected.reminder_claim {
            params.push(libsql::Value::Text(token.clone()));
            conditions.push(format!("reminder_claim = ?{}", params.len()));
        }
        let where_clause = conditions.join(" AND ");

        if sets.is_empty() {
            let mut rows = self
                .db()
                .conn()
                .query(
                    &format!("SELECT {SELECT_COLS} FROM tasks WHERE {where_clause}"),
                    libsql::params_from_iter(params),
                )
                .await?;
            return match rows.next().await? {
                Some(row) => Ok(Some(row_to_task(&row)?)),
                None => Ok(None),
            };
        }

        params.push(libsql::Value::Text(Utc::now().to_rfc3339()));
        sets.push(format!("updated_at = ?{}", params.len()));

        let sql = format!(
            "UPDATE tasks SET {} WHERE {where_clause} RETURNING {SELECT_COLS}",
            sets.join(", ")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => {
                tracing::debug!(task_id = id, "conditional update precondition not met");
                Ok(None)
            }
        }
    }

    /// Owner-scoped partial update.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the task does not exist or belongs to someone else.
    pub async fn update_task(
        &self,
        owner_id: &str,
        id: &str,
        update: &TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        self.conditional_update(id, &TaskExpectation::owned_by(owner_id), update)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Mark a pending task completed. Returns `None` if it is missing, not the
    /// caller's, or already completed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn complete_task(&self, owner_id: &str, id: &str) -> Result<Option<Task>, DatabaseError> {
        let expected = TaskExpectation {
            owner_id: Some(owner_id.to_string()),
            completed: Some(false),
            ..TaskExpectation::default()
        };
        let update = TaskUpdate {
            completed: Some(true),
            ..TaskUpdate::default()
        };
        self.conditional_update(id, &expected, &update).await
    }

    /// Delete a task. Returns whether a row owned by `owner_id` was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the DELETE fails.
    pub async fn delete_task(&self, owner_id: &str, id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2 RETURNING id",
                [id, owner_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}
