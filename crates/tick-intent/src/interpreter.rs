//! One transcript in, one structured outcome out.

use std::sync::Arc;

use thiserror::Error;

use tick_core::clock::Clock;
use tick_core::entities::{NewTask, Task};
use tick_core::enums::{AmbiguityPolicy, FailureKind, IntentAction, InterpretState, ListFilter};
use tick_core::responses::{CommandOutcome, OutcomePayload};
use tick_db::error::DatabaseError;
use tick_db::repos::task::{TaskFilter, TaskOrder};
use tick_db::service::TaskStore;
use tick_notify::Notifier;

use crate::classifier::IntentClassifier;
use crate::intent::{Intent, parse_intent};

/// Reply for any transcript the classifier could not turn into a command.
pub const UNRECOGNIZED_MESSAGE: &str = "Sorry, I could not understand your command. Please try again.";

/// Why a recognized command failed to execute.
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("\"{query}\" matches {} tasks: {}. Please be more specific.", candidates.len(), candidates.join(", "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },

    #[error("{0}")]
    Delivery(String),

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl InterpretError {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Ambiguous { .. } => FailureKind::Ambiguous,
            Self::Delivery(_) => FailureKind::Delivery,
            Self::Store { .. } => FailureKind::Store,
        }
    }
}

/// Map a store error, keeping input rejections as validation failures.
fn store_error(context: &'static str) -> impl FnOnce(DatabaseError) -> InterpretError {
    move |source| match source {
        DatabaseError::Validation(reason) => InterpretError::Validation(reason),
        source => InterpretError::Store { context, source },
    }
}

/// Tracks the per-invocation state and logs each transition.
struct Progress {
    state: InterpretState,
}

impl Progress {
    const fn new() -> Self {
        Self {
            state: InterpretState::Received,
        }
    }

    fn advance(&mut self, next: InterpretState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {next}",
            self.state
        );
        tracing::debug!(from = %self.state, to = %next, "interpret state");
        self.state = next;
    }
}

/// Classifies a transcript and executes the resulting command for one owner.
pub struct CommandInterpreter {
    store: Arc<TaskStore>,
    classifier: Arc<dyn IntentClassifier>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    ambiguity: AmbiguityPolicy,
}

impl CommandInterpreter {
    pub fn new(
        store: Arc<TaskStore>,
        classifier: Arc<dyn IntentClassifier>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            classifier,
            notifier,
            clock,
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    #[must_use]
    pub const fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    /// Interpret one transcript on behalf of `owner_id`.
    ///
    /// Never returns an error: every failure is reported in the outcome.
    pub async fn interpret(&self, transcript: &str, owner_id: &str) -> CommandOutcome {
        let mut progress = Progress::new();

        if transcript.trim().is_empty() {
            progress.advance(InterpretState::Rejected);
            return CommandOutcome::rejected(FailureKind::Validation, "Command transcript is empty");
        }

        progress.advance(InterpretState::Classifying);
        let raw = match self.classifier.classify(transcript, self.clock.today()).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(owner_id, %error, "classifier request failed");
                progress.advance(InterpretState::Rejected);
                return CommandOutcome::rejected(FailureKind::Classification, UNRECOGNIZED_MESSAGE);
            }
        };
        let intent = match parse_intent(&raw) {
            Ok(intent) => intent,
            Err(error) => {
                tracing::warn!(owner_id, %error, raw = %raw, "unrecognized classifier reply");
                progress.advance(InterpretState::Rejected);
                return CommandOutcome::rejected(FailureKind::Classification, UNRECOGNIZED_MESSAGE);
            }
        };

        progress.advance(InterpretState::Executing);
        let action = intent.action();
        match self.execute(intent, owner_id).await {
            Ok(outcome) => {
                progress.advance(InterpretState::Completed);
                outcome
            }
            Err(error) => {
                progress.advance(InterpretState::Failed);
                if let InterpretError::Store { source, .. } = &error {
                    tracing::error!(owner_id, %action, error = %source, "command failed");
                } else {
                    tracing::info!(owner_id, %action, %error, "command failed");
                }
                CommandOutcome::failed(action, error.kind(), error.to_string())
            }
        }
    }

    async fn execute(&self, intent: Intent, owner_id: &str) -> Result<CommandOutcome, InterpretError> {
        match intent {
            Intent::CreateTask(new) => self.create_task(owner_id, &new).await,
            Intent::MarkCompleted { task_title } => self.mark_completed(owner_id, &task_title).await,
            Intent::EmailNextMeeting => self.email_next_meeting(owner_id).await,
            Intent::ListTasks { filter } => self.list_tasks(owner_id, filter).await,
        }
    }

    async fn create_task(&self, owner_id: &str, new: &NewTask) -> Result<CommandOutcome, InterpretError> {
        let task = self
            .store
            .create_task(owner_id, new)
            .await
            .map_err(store_error("Failed to create task"))?;
        tracing::info!(owner_id, task_id = %task.id, "task created from command");
        Ok(CommandOutcome::completed(
            IntentAction::CreateTask,
            format!("Task \"{}\" created successfully!", task.title),
            Some(OutcomePayload::Task(Box::new(task))),
        ))
    }

    async fn mark_completed(&self, owner_id: &str, query: &str) -> Result<CommandOutcome, InterpretError> {
        if query.is_empty() {
            return Err(InterpretError::Validation("Task title is required".into()));
        }
        let not_found = || InterpretError::NotFound(format!("Task \"{query}\" not found or already completed"));

        let filter = TaskFilter {
            completed: Some(false),
            title_contains: Some(query.to_string()),
            order: TaskOrder::Inserted,
            ..TaskFilter::owned_by(owner_id)
        };
        let candidates = self
            .store
            .find_tasks(&filter)
            .await
            .map_err(store_error("Failed to mark task as completed"))?;

        let chosen = self.choose(query, candidates)?.ok_or_else(not_found)?;
        let task = self
            .store
            .complete_task(owner_id, &chosen.id)
            .await
            .map_err(store_error("Failed to mark task as completed"))?
            .ok_or_else(not_found)?;

        Ok(CommandOutcome::completed(
            IntentAction::MarkCompleted,
            format!("Task \"{}\" marked as completed!", task.title),
            Some(OutcomePayload::Task(Box::new(task))),
        ))
    }

    /// Pick the one candidate to complete, per the ambiguity policy.
    fn choose(&self, query: &str, mut candidates: Vec<Task>) -> Result<Option<Task>, InterpretError> {
        if candidates.len() <= 1 {
            return Ok(candidates.pop());
        }
        match self.ambiguity {
            AmbiguityPolicy::FirstMatch => Ok(candidates.into_iter().next()),
            AmbiguityPolicy::Reject => {
                let wanted = query.to_lowercase();
                let mut exact: Vec<&Task> = candidates
                    .iter()
                    .filter(|task| task.title.to_lowercase() == wanted)
                    .collect();
                if exact.len() == 1 {
                    return Ok(exact.pop().cloned());
                }
                Err(InterpretError::Ambiguous {
                    query: query.to_string(),
                    candidates: candidates.into_iter().map(|task| task.title).collect(),
                })
            }
        }
    }

    async fn email_next_meeting(&self, owner_id: &str) -> Result<CommandOutcome, InterpretError> {
        let now = self.clock.now();
        let filter = TaskFilter {
            completed: Some(false),
            fully_scheduled: true,
            scheduled_from: Some(now.date()),
            ..TaskFilter::owned_by(owner_id)
        };
        let next = self
            .store
            .find_tasks(&filter)
            .await
            .map_err(store_error("Failed to send email"))?
            .into_iter()
            .find(|task| task.scheduled_instant().is_some_and(|at| at > now))
            .ok_or_else(|| InterpretError::NotFound("No upcoming meetings found".into()))?;

        let user = self
            .store
            .find_user(owner_id)
            .await
            .map_err(store_error("Failed to send email"))?
            .ok_or_else(|| InterpretError::NotFound("No contact address on file".into()))?;

        // The lookup suspends, so the meeting may have started since `now`.
        let starts_at = next
            .scheduled_instant()
            .ok_or_else(|| InterpretError::NotFound("No upcoming meetings found".into()))?;
        if starts_at <= self.clock.now() {
            return Err(InterpretError::NotFound("Next meeting has already passed".into()));
        }

        if !self.notifier.send(&user.email, &user.name, &next).await {
            return Err(InterpretError::Delivery("Failed to send email".into()));
        }

        let verb = if self.notifier.delivers() {
            "Email sent"
        } else {
            "Dry run, email not sent"
        };
        Ok(CommandOutcome::completed(
            IntentAction::EmailNextMeeting,
            format!(
                "{verb} for \"{}\" scheduled on {}",
                next.title,
                starts_at.format("%Y-%m-%d %H:%M")
            ),
            Some(OutcomePayload::Task(Box::new(next))),
        ))
    }

    async fn list_tasks(&self, owner_id: &str, filter: ListFilter) -> Result<CommandOutcome, InterpretError> {
        let query = TaskFilter {
            completed: filter.completed(),
            scheduled_on: filter.pinned_date(self.clock.today()),
            order: TaskOrder::Schedule,
            ..TaskFilter::owned_by(owner_id)
        };
        let tasks = self
            .store
            .find_tasks(&query)
            .await
            .map_err(store_error("Failed to list tasks"))?;
        Ok(CommandOutcome::completed(
            IntentAction::ListTasks,
            format!("Found {} tasks", tasks.len()),
            Some(OutcomePayload::Tasks(tasks)),
        ))
    }
}
