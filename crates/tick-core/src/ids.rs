//! ID prefixes for store-generated identifiers.
//!
//! IDs are produced by the database as `{prefix}-{8 hex chars}`.

pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_USER: &str = "usr";
/// Reminder send claims. Never stored as a primary key.
pub const PREFIX_CLAIM: &str = "clm";

/// Every prefix in use, for exhaustive ID-generation tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_TASK, PREFIX_USER, PREFIX_CLAIM];
