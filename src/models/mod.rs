pub mod person;
pub mod story;
pub mod timing;
pub mod transition;

// Re-export commonly used types
pub use person::{Membership, MembershipIndex, Person};
pub use story::{Estimate, Label, RawStory, Story, StoryRecord};
pub use timing::{RawTimingSummary, TimingSummary};
pub use transition::{RawTransition, StoryState, Transition};
