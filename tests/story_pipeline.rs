use serde_json::{json, Value};

use tracker_stories::formatting::{parse_field_list, project_fields, render, OutputFormat};
use tracker_stories::processing::{process_stories, raw_records};
use tracker_stories::{Membership, MembershipIndex, RawStory, StoryRecord, TrackerError};

fn index() -> MembershipIndex {
    let memberships: Vec<Membership> = serde_json::from_value(json!([
        {"kind": "project_membership", "person": {"kind": "person", "id": 1, "name": "Alice", "initials": "AL"}},
        {"kind": "project_membership", "person": {"kind": "person", "id": 2, "name": "Bob", "initials": "BO"}}
    ]))
    .unwrap();
    MembershipIndex::from_memberships(memberships)
}

fn transition(state: &str, at: &str, by: u64) -> Value {
    json!({
        "kind": "story_transition",
        "state": state,
        "story_id": 555,
        "project_id": 99,
        "project_version": 12,
        "occurred_at": at,
        "performed_by_id": by
    })
}

fn stories() -> Vec<RawStory> {
    serde_json::from_value(json!([
        {
            "id": 555,
            "name": "Reworked export",
            "story_type": "feature",
            "current_state": "accepted",
            "estimate": 3,
            "url": "https://www.pivotaltracker.com/story/show/555",
            "accepted_at": "2021-01-10T12:00:00Z",
            "labels": [{"id": 1, "name": "backend"}, {"id": 2, "name": "sprint 1"}],
            "owner_ids": [2, 1],
            "transitions": [
                transition("accepted", "2021-01-10T12:00:00Z", 1),
                transition("started", "2021-01-01T09:00:00Z", 2),
                transition("accepted", "2021-01-03T09:00:00Z", 1),
                transition("started", "2021-01-08T10:00:00Z", 3),
                transition("finished", "2021-01-09T10:00:00Z", 2),
                transition("delivered", "2021-01-09T10:00:00Z", 2)
            ],
            "cycle_time_details": {
                "kind": "cycle_time_details",
                "total_cycle_time": 3661000,
                "started_time": 7200000,
                "started_count": 2,
                "story_id": 555
            }
        },
        {
            "id": 556,
            "name": "Untouched chore",
            "story_type": "chore",
            "current_state": "unstarted",
            "url": "https://www.pivotaltracker.com/story/show/556",
            "labels": [{"id": 1, "name": "backend"}],
            "owner_ids": [],
            "transitions": [],
            "cycle_time_details": {"kind": "cycle_time_details"}
        }
    ]))
    .unwrap()
}

fn by_id(records: &[StoryRecord], id: u64) -> &StoryRecord {
    records.iter().find(|r| r["id"] == json!(id)).unwrap()
}

#[test]
fn test_full_pipeline() {
    let records = process_stories(stories(), &[], &index()).unwrap();
    assert_eq!(records.len(), 2);

    let reworked = by_id(&records, 555);
    assert_eq!(reworked["owners"], json!(["Bob", "Alice"]));
    assert_eq!(reworked["labels"], json!(["backend", "sprint 1"]));
    assert_eq!(reworked["estimate"], json!(3));
    // last start 01-08 10:00 to last acceptance 01-10 12:00
    assert_eq!(reworked["final_cycle_time"], json!("2 days, 2:00:00"));
    assert_eq!(reworked["total_cycle_time"], json!("1:01:01"));
    assert_eq!(reworked["development_time"], json!("2:00:00"));
    assert_eq!(reworked["finished_time"], json!("0:00:00"));
    assert_eq!(reworked["delivered_time"], json!("0:00:00"));
    assert_eq!(reworked["started_count"], json!(2));
    assert!(reworked.get("kind").is_none());
    assert!(reworked.get("story_id").is_none());
    assert!(reworked.get("owner_ids").is_none());

    let transitions = reworked["transitions"].as_array().unwrap();
    assert_eq!(
        transitions[0],
        json!("state:started,occurred_at:2021-01-01T09:00:00Z,performed_by:Bob")
    );
    assert_eq!(
        transitions[2],
        json!("state:started,occurred_at:2021-01-08T10:00:00Z,performed_by:Inactive User")
    );
    // equal timestamps keep their input order
    assert!(transitions[3].as_str().unwrap().starts_with("state:finished"));
    assert!(transitions[4].as_str().unwrap().starts_with("state:delivered"));

    let chore = by_id(&records, 556);
    assert_eq!(chore["estimate"], json!("-"));
    assert_eq!(chore["final_cycle_time"], json!("0:00:00"));
    assert_eq!(chore["started_time"], json!("0:00:00"));
    assert!(chore.get("development_time").is_none());
}

#[test]
fn test_label_filter_requires_every_label() {
    let labels = vec!["sprint 1".to_string(), "backend".to_string()];
    let records = process_stories(stories(), &labels, &index()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], json!(555));
}

#[test]
fn test_unknown_owner_aborts_the_run() {
    let lonely = MembershipIndex::from_people(Vec::new());
    let err = process_stories(stories(), &[], &lonely).unwrap_err();
    assert!(matches!(err, TrackerError::UnknownOwner(2)));
}

#[test]
fn test_projection_and_csv() {
    let records = process_stories(stories(), &[], &index()).unwrap();
    let projected = project_fields(records, &parse_field_list("id,name,final_cycle_time")).unwrap();
    let csv = render(&projected, OutputFormat::Csv, false).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "id,name,final_cycle_time");
    assert_eq!(lines[1], "555,Reworked export,\"2 days, 2:00:00\"");
    assert_eq!(lines[2], "556,Untouched chore,0:00:00");
}

#[test]
fn test_bogus_field_is_reported() {
    let records = process_stories(stories(), &[], &index()).unwrap();
    let err = project_fields(records, &parse_field_list("id,name,bogus_field")).unwrap_err();
    assert!(err.to_string().contains("bogus_field"));
}

#[test]
fn test_raw_records_keep_api_shape() {
    let labels = vec!["sprint 1".to_string()];
    let records = raw_records(stories(), &labels).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["owner_ids"], json!([2, 1]));
    assert_eq!(records[0]["cycle_time_details"]["total_cycle_time"], json!(3661000));
    assert_eq!(records[0]["transitions"][0]["performed_by_id"], json!(1));
}

#[test]
fn test_json_output_parses_back() {
    let records = process_stories(stories(), &[], &index()).unwrap();
    let json = render(&records, OutputFormat::Json, false).unwrap();
    let parsed: Vec<StoryRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, records);
}
