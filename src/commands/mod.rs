pub mod auth;
pub mod stories;

pub use auth::handle_auth;
pub use stories::handle_stories;
