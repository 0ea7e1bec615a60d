mod remind;
mod task;
mod user;

pub use remind::RemindCommands;
pub use task::TaskCommands;
pub use user::UserCommands;
