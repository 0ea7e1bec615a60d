pub mod limit;
pub mod owner;
pub mod parse;
