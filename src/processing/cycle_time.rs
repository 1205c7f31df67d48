use crate::constants::ZERO_DURATION;
use crate::formatting::utils::{format_duration, format_millis};
use crate::models::{RawTimingSummary, StoryState, TimingSummary, Transition};

pub const FINAL_CYCLE_TIME: &str = "final_cycle_time";

/// Keys in the API summary that carry no timing information.
const NOISE_KEYS: &[&str] = &["kind", "story_id", ""];

/// API duration field and the name it is published under when present.
/// An absent field is published under its API name as a zero duration.
const RENAMED_FIELDS: &[(&str, &str)] = &[
    ("total_cycle_time", "total_cycle_time"),
    ("started_time", "development_time"),
    ("finished_time", "review_process_time"),
    ("delivered_time", "acceptance_process_time"),
];

fn last_in_state<'a>(transitions: &'a [Transition], state: &StoryState) -> Option<&'a Transition> {
    transitions.iter().rev().find(|t| &t.state == state)
}

/// Time from the last start to the last acceptance. Only the final pass
/// counts when a story was restarted or re-accepted.
pub fn final_cycle_time(transitions: &[Transition]) -> String {
    let started = last_in_state(transitions, &StoryState::Started);
    let accepted = last_in_state(transitions, &StoryState::Accepted);

    match (started, accepted) {
        (Some(started), Some(accepted)) => {
            format_duration(accepted.occurred.signed_duration_since(started.occurred))
        }
        _ => ZERO_DURATION.to_string(),
    }
}

fn raw_millis(raw: &RawTimingSummary, field: &str) -> Option<i64> {
    match field {
        "total_cycle_time" => raw.total_cycle_time,
        "started_time" => raw.started_time,
        "finished_time" => raw.finished_time,
        "delivered_time" => raw.delivered_time,
        _ => None,
    }
}

/// Derive the published timing fields from sorted transitions and the raw
/// API summary.
pub fn derive_timing(transitions: &[Transition], raw: &RawTimingSummary) -> TimingSummary {
    let mut summary = TimingSummary::new();
    summary.insert(FINAL_CYCLE_TIME, final_cycle_time(transitions));

    for (api_name, published_name) in RENAMED_FIELDS {
        match raw_millis(raw, api_name) {
            Some(millis) => summary.insert(*published_name, format_millis(millis)),
            None => summary.insert(*api_name, ZERO_DURATION),
        }
    }

    for (key, value) in &raw.extra {
        if NOISE_KEYS.contains(&key.as_str()) || summary.contains(key) {
            continue;
        }
        summary.insert(key.clone(), value.clone());
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalize::parse_occurred_at;
    use serde_json::json;

    fn transition(state: StoryState, at: &str) -> Transition {
        Transition {
            state,
            occurred_at: at.to_string(),
            performed_by: "Alice".to_string(),
            occurred: parse_occurred_at(at).unwrap(),
        }
    }

    #[test]
    fn test_uses_last_start_and_last_acceptance() {
        let transitions = vec![
            transition(StoryState::Started, "2021-01-01T00:00:00Z"),
            transition(StoryState::Accepted, "2021-01-02T00:00:00Z"),
            transition(StoryState::Started, "2021-01-05T00:00:00Z"),
            transition(StoryState::Accepted, "2021-01-05T02:30:00Z"),
        ];
        assert_eq!(final_cycle_time(&transitions), "2:30:00");
    }

    #[test]
    fn test_zero_without_start_or_acceptance() {
        let only_started = vec![transition(StoryState::Started, "2021-01-01T00:00:00Z")];
        let only_accepted = vec![transition(StoryState::Accepted, "2021-01-01T00:00:00Z")];
        assert_eq!(final_cycle_time(&only_started), "0:00:00");
        assert_eq!(final_cycle_time(&only_accepted), "0:00:00");
        assert_eq!(final_cycle_time(&[]), "0:00:00");
    }

    #[test]
    fn test_present_fields_are_renamed() {
        let raw: RawTimingSummary = serde_json::from_value(json!({
            "total_cycle_time": 3661000,
            "started_time": 60000,
            "finished_time": 120000,
            "delivered_time": 7200000
        }))
        .unwrap();

        let summary = derive_timing(&[], &raw);
        assert_eq!(summary.get("total_cycle_time"), Some(&json!("1:01:01")));
        assert_eq!(summary.get("development_time"), Some(&json!("0:01:00")));
        assert_eq!(summary.get("review_process_time"), Some(&json!("0:02:00")));
        assert_eq!(summary.get("acceptance_process_time"), Some(&json!("2:00:00")));
        assert!(!summary.contains("started_time"));
    }

    #[test]
    fn test_absent_fields_keep_api_names() {
        let summary = derive_timing(&[], &RawTimingSummary::default());
        assert_eq!(summary.get("total_cycle_time"), Some(&json!("0:00:00")));
        assert_eq!(summary.get("started_time"), Some(&json!("0:00:00")));
        assert_eq!(summary.get("finished_time"), Some(&json!("0:00:00")));
        assert_eq!(summary.get("delivered_time"), Some(&json!("0:00:00")));
        assert!(!summary.contains("development_time"));
        assert_eq!(summary.get(FINAL_CYCLE_TIME), Some(&json!("0:00:00")));
    }

    #[test]
    fn test_noise_keys_dropped_and_others_kept() {
        let raw: RawTimingSummary = serde_json::from_value(json!({
            "kind": "cycle_time_details",
            "story_id": 100,
            "": "junk",
            "rejected_count": 1
        }))
        .unwrap();

        let summary = derive_timing(&[], &raw);
        assert!(!summary.contains("kind"));
        assert!(!summary.contains("story_id"));
        assert!(!summary.contains(""));
        assert_eq!(summary.get("rejected_count"), Some(&json!(1)));
    }

    #[test]
    fn test_field_order() {
        let raw: RawTimingSummary = serde_json::from_value(json!({"finished_time": 1000})).unwrap();
        let summary = derive_timing(&[], &raw);
        let keys: Vec<&str> = summary.keys().collect();
        assert_eq!(
            keys,
            vec![
                "final_cycle_time",
                "total_cycle_time",
                "started_time",
                "review_process_time",
                "delivered_time"
            ]
        );
    }
}
