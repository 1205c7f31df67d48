// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod filtering;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod processing;
pub mod validation;


// Re-export commonly used items
pub use client::TrackerClient;
pub use config::{Config, load_config, save_config};
pub use error::{TrackerError, TrackerResult};
pub use models::*;
