//! CLI command handlers. Each command is in its own file.

mod check;
mod config;
mod render;
mod validate;

pub use check::{run_check, CheckOptions};
pub use config::run_config;
pub use validate::run_validate;
