//! Entity structs persisted by the task store.

mod task;
mod user;

pub use task::{NewTask, Task};
pub use user::User;
