//! # tick-reminder
//!
//! Sends each scheduled task's reminder once, shortly before it starts.
//!
//! [`ReminderScheduler::run_cycle`] is the single code path for both the
//! periodic timer ([`ReminderService`]) and the manual trigger. Double sends
//! are prevented in two layers: an in-process guard makes overlapping cycles
//! skip, and the store's claim protocol arbitrates between processes.

mod cycle;
mod service;
mod upcoming;

pub use cycle::ReminderScheduler;
pub use service::ReminderService;
pub use upcoming::upcoming_reminders;
