use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ClassifierError;

/// Sends a transcript to a language-understanding service and returns its raw reply.
///
/// The reply is untrusted text; callers parse it with
/// [`parse_intent`](crate::intent::parse_intent).
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, transcript: &str, today: NaiveDate) -> Result<String, ClassifierError>;
}
