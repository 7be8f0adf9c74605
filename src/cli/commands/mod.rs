//! CLI commands implementation, one module per subcommand.

pub mod aggregate;
pub mod batch;
pub mod config_cmd;
pub mod correct;
pub mod extract;
pub mod score;
