//! CLI command handlers.

pub mod config;
pub mod info;
pub mod schema;
pub mod validate;

pub use config::{ConfigShowFormat, run_config_show};
pub use info::run_info;
pub use schema::run_schema;
pub use validate::{InputSource, run_validate};
