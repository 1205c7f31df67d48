pub mod config;

pub use config::{Config, config_path, get_token, get_project_id, get_api_url, load_config, load_config_from, save_config, save_config_to};
