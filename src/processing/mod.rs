pub mod cycle_time;
pub mod flatten;
pub mod normalize;

pub use cycle_time::{derive_timing, final_cycle_time};
pub use flatten::flatten_story;
pub use normalize::{normalize_story, normalize_transitions, parse_occurred_at, resolve_owners, resolve_transition};

use serde_json::Value;

use crate::error::TrackerResult;
use crate::filtering::filter_by_labels;
use crate::logging::log_debug;
use crate::models::{MembershipIndex, RawStory, StoryRecord};
use crate::tracker_error;

/// Label-filter, normalize and flatten the fetched stories.
pub fn process_stories(
    stories: Vec<RawStory>,
    labels: &[String],
    index: &MembershipIndex,
) -> TrackerResult<Vec<StoryRecord>> {
    let fetched = stories.len();
    let stories = filter_by_labels(stories, labels);
    log_debug(&format!(
        "{} of {} stories carry labels {:?}",
        stories.len(),
        fetched,
        labels
    ));

    stories
        .into_iter()
        .map(|story| normalize_story(story, index).map(flatten_story))
        .collect()
}

/// Label-filter only; stories stay in the API's shape.
pub fn raw_records(stories: Vec<RawStory>, labels: &[String]) -> TrackerResult<Vec<StoryRecord>> {
    filter_by_labels(stories, labels)
        .into_iter()
        .map(|story| -> TrackerResult<StoryRecord> {
            let id = story.id;
            match serde_json::to_value(story)? {
                Value::Object(record) => Ok(record),
                _ => Err(tracker_error!(RenderError, "story {} is not a JSON object", id)),
            }
        })
        .collect()
}
