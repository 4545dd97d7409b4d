pub mod cli;
pub mod commands;
pub mod config;
pub mod introspect;
pub mod prompt;

pub use cli::*;
pub use commands::*;
pub use config::*;
pub use introspect::*;
