//! # tick-core
//!
//! Core types, schedule math, and error types for Tickler.
//!
//! This crate provides the foundational types shared across all Tickler crates:
//! - Entity structs (tasks and user contact records)
//! - Enums for list filters, intent actions, and the interpretation state machine
//! - ID prefix constants
//! - Scheduled-instant and eligibility-window math
//! - Input validation for titles, names, and email addresses
//! - A `Clock` abstraction so schedulers and interpreters can be driven by tests
//! - Response types returned by the interpreter and the reminder cycle

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod schedule;
pub mod validation;
