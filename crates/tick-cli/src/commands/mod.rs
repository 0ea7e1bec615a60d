pub mod dispatch;
pub mod remind;
pub mod say;
pub mod serve;
pub mod shared;
pub mod task;
pub mod user;
