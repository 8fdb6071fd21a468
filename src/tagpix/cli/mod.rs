pub mod commands;
pub mod print;
pub mod setup;

pub use commands::run;
