pub mod tracker_client;

pub use tracker_client::TrackerClient;
