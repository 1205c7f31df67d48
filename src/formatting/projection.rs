use crate::error::{TrackerError, TrackerResult};
use crate::models::StoryRecord;

/// Split a `--fields` value such as `id, name,owners` into field names.
pub fn parse_field_list(fields: &str) -> Vec<String> {
    fields
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only `fields`, in the order requested. A field missing from any
/// story is an error naming that field.
pub fn project_fields(records: Vec<StoryRecord>, fields: &[String]) -> TrackerResult<Vec<StoryRecord>> {
    if fields.is_empty() {
        return Ok(records);
    }

    records
        .into_iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| {
                    record
                        .get(field)
                        .map(|value| (field.clone(), value.clone()))
                        .ok_or_else(|| TrackerError::UnknownField(field.clone()))
                })
                .collect::<TrackerResult<StoryRecord>>()
        })
        .collect()
}
