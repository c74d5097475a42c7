pub mod commands;

pub use commands::{Cli, DEFAULT_API_BASE_URL};
