use crate::models::RawStory;

/// Keep only the stories that carry every label in `labels`.
///
/// The server-side search is looser than this, so the result of a label
/// query is narrowed again here, one label at a time.
pub fn filter_by_labels(stories: Vec<RawStory>, labels: &[String]) -> Vec<RawStory> {
    labels.iter().fold(stories, |remaining, label| {
        remaining
            .into_iter()
            .filter(|story| story.has_label(label))
            .collect()
    })
}
