use chrono::NaiveDateTime;

use crate::constants::INACTIVE_USER;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{MembershipIndex, RawStory, RawTransition, Story, Transition};
use super::cycle_time::derive_timing;

/// Parse an API timestamp such as `2021-01-01T12:30:00Z`.
///
/// The trailing zone designator is dropped, not applied: every timestamp
/// the API returns is UTC, so they compare correctly as naive times.
pub fn parse_occurred_at(timestamp: &str) -> TrackerResult<NaiveDateTime> {
    let naive = match timestamp.char_indices().last() {
        Some((last, _)) => &timestamp[..last],
        None => timestamp,
    };

    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f").map_err(|e| {
        TrackerError::ParseError(format!("invalid transition timestamp '{}': {}", timestamp, e))
    })
}

/// Resolve the actor and drop the linkage fields. Former members show up
/// as the inactive-user placeholder.
pub fn resolve_transition(raw: RawTransition, index: &MembershipIndex) -> TrackerResult<Transition> {
    let occurred = parse_occurred_at(&raw.occurred_at)?;
    let performed_by = index
        .name_of(raw.performed_by_id)
        .unwrap_or(INACTIVE_USER)
        .to_string();

    Ok(Transition {
        state: raw.state,
        occurred_at: raw.occurred_at,
        performed_by,
        occurred,
    })
}

/// Owners must all be current members; an unknown owner id is an error.
pub fn resolve_owners(owner_ids: &[u64], index: &MembershipIndex) -> TrackerResult<Vec<String>> {
    owner_ids
        .iter()
        .map(|&id| {
            index
                .name_of(id)
                .map(str::to_string)
                .ok_or(TrackerError::UnknownOwner(id))
        })
        .collect()
}

/// Resolve and chronologically sort transitions. Equal timestamps keep
/// their input order.
pub fn normalize_transitions(
    raw: Vec<RawTransition>,
    index: &MembershipIndex,
) -> TrackerResult<Vec<Transition>> {
    let mut transitions = raw
        .into_iter()
        .map(|t| resolve_transition(t, index))
        .collect::<TrackerResult<Vec<_>>>()?;

    transitions.sort_by(|a, b| a.occurred.cmp(&b.occurred));
    Ok(transitions)
}

pub fn normalize_story(raw: RawStory, index: &MembershipIndex) -> TrackerResult<Story> {
    let owners = resolve_owners(&raw.owner_ids, index)?;
    let transitions = normalize_transitions(raw.transitions, index)?;
    let cycle_time_details = derive_timing(&transitions, &raw.cycle_time_details);

    Ok(Story {
        id: raw.id,
        name: raw.name,
        story_type: raw.story_type,
        current_state: raw.current_state,
        estimate: raw.estimate.into(),
        url: raw.url,
        accepted_at: raw.accepted_at,
        labels: raw.labels.into_iter().map(|label| label.name).collect(),
        owners,
        transitions,
        cycle_time_details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Estimate, Person, StoryState};
    use serde_json::json;

    fn index() -> MembershipIndex {
        MembershipIndex::from_people(vec![
            Person { id: 1, name: "Alice".to_string() },
            Person { id: 2, name: "Bob".to_string() },
        ])
    }

    fn raw_transition(state: &str, at: &str, by: u64) -> RawTransition {
        serde_json::from_value(json!({
            "kind": "story_transition",
            "state": state,
            "story_id": 100,
            "project_id": 99,
            "project_version": 5,
            "occurred_at": at,
            "performed_by_id": by
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_strips_zone_designator() {
        let parsed = parse_occurred_at("2021-01-01T10:20:30Z").unwrap();
        assert_eq!(parsed.to_string(), "2021-01-01 10:20:30");

        let fractional = parse_occurred_at("2021-01-01T10:20:30.250Z").unwrap();
        assert_eq!(fractional.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_occurred_at("yesterday"), Err(TrackerError::ParseError(_))));
        assert!(parse_occurred_at("").is_err());
    }

    #[test]
    fn test_unknown_actor_is_inactive_user() {
        let single = MembershipIndex::from_people(vec![Person { id: 1, name: "Alice".to_string() }]);
        let transition =
            resolve_transition(raw_transition("started", "2021-01-01T00:00:00Z", 2), &single).unwrap();
        assert_eq!(transition.performed_by, "Inactive User");
        assert_eq!(transition.state, StoryState::Started);
    }

    #[test]
    fn test_owners_resolve_in_order() {
        assert_eq!(resolve_owners(&[2, 1], &index()).unwrap(), vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_unknown_owner_fails() {
        let err = resolve_owners(&[1, 3], &index()).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownOwner(3)));
    }

    #[test]
    fn test_transitions_sorted_and_stable() {
        let transitions = normalize_transitions(
            vec![
                raw_transition("accepted", "2021-01-03T00:00:00Z", 1),
                raw_transition("started", "2021-01-01T00:00:00Z", 1),
                raw_transition("finished", "2021-01-02T00:00:00Z", 1),
                raw_transition("delivered", "2021-01-02T00:00:00Z", 2),
            ],
            &index(),
        )
        .unwrap();

        let states: Vec<&str> = transitions.iter().map(|t| t.state.as_str()).collect();
        assert_eq!(states, vec!["started", "finished", "delivered", "accepted"]);
        assert_eq!(transitions[2].performed_by, "Bob");
    }

    #[test]
    fn test_normalize_story() {
        let raw: RawStory = serde_json::from_value(json!({
            "id": 100,
            "name": "Export report",
            "story_type": "feature",
            "current_state": "accepted",
            "url": "https://www.pivotaltracker.com/story/show/100",
            "labels": [{"id": 1, "name": "backend"}, {"id": 2, "name": "p1"}],
            "owner_ids": [1],
            "transitions": [
                {"state": "accepted", "occurred_at": "2021-01-02T00:00:00Z", "performed_by_id": 2},
                {"state": "started", "occurred_at": "2021-01-01T00:00:00Z", "performed_by_id": 1}
            ],
            "cycle_time_details": {"kind": "cycle_time_details", "total_cycle_time": 86400000}
        }))
        .unwrap();

        let story = normalize_story(raw, &index()).unwrap();
        assert_eq!(story.labels, vec!["backend", "p1"]);
        assert_eq!(story.owners, vec!["Alice"]);
        assert_eq!(story.estimate, Estimate::Unestimated);
        assert_eq!(story.transitions[0].state, StoryState::Started);
        assert_eq!(
            story.cycle_time_details.get("final_cycle_time"),
            Some(&json!("1 day, 0:00:00"))
        );
    }
}
