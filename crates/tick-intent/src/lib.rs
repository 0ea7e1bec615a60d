//! # tick-intent
//!
//! Turns a spoken or typed command into one validated action against the
//! task store.
//!
//! - [`IntentClassifier`] is the seam to the language-understanding service;
//!   [`GeminiClassifier`] is the HTTP implementation.
//! - [`intent::parse_intent`] treats the classifier's reply as untrusted: it
//!   strips markdown fencing, checks the action tag, validates against the
//!   generated JSON Schema, and normalizes fields into an [`Intent`].
//! - [`CommandInterpreter`] drives one transcript through
//!   `received → classifying → executing → completed | failed` (or
//!   `rejected`) and always answers with a [`CommandOutcome`](tick_core::responses::CommandOutcome).

pub mod classifier;
pub mod error;
pub mod gemini;
mod http;
pub mod intent;
pub mod interpreter;
pub mod prompt;
pub mod schema;

pub use classifier::IntentClassifier;
pub use error::{ClassifierError, IntentError};
pub use gemini::GeminiClassifier;
pub use intent::Intent;
pub use interpreter::{CommandInterpreter, InterpretError};
