pub mod reminder;
pub mod task;
pub mod user;
