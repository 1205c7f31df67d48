pub mod labels;
pub mod query;

pub use labels::filter_by_labels;
pub use query::{FilterTerm, StoryQuery};
