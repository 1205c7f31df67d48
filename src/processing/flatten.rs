use serde_json::Value;

use crate::models::{Story, StoryRecord};

/// Turn a normalized story into an output record. Timing fields are lifted
/// to the top level under their published names and transitions become
/// display strings.
pub fn flatten_story(story: Story) -> StoryRecord {
    let mut record = StoryRecord::new();
    record.insert("id".to_string(), Value::from(story.id));
    record.insert("name".to_string(), Value::from(story.name));
    record.insert("story_type".to_string(), Value::from(story.story_type));
    record.insert("current_state".to_string(), Value::from(String::from(story.current_state)));
    record.insert("estimate".to_string(), Value::from(story.estimate));
    record.insert("url".to_string(), Value::from(story.url));
    record.insert(
        "accepted_at".to_string(),
        story.accepted_at.map(Value::from).unwrap_or(Value::Null),
    );
    record.insert("labels".to_string(), Value::from(story.labels));
    record.insert("owners".to_string(), Value::from(story.owners));
    record.insert(
        "transitions".to_string(),
        Value::from(
            story
                .transitions
                .iter()
                .map(|t| t.display_string())
                .collect::<Vec<_>>(),
        ),
    );

    for (name, value) in story.cycle_time_details {
        record.insert(name, value);
    }

    record
}
