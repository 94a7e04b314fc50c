use frntx_assistants::types::{Annotation, MessageContent, RunStatus, ThreadMessage};
use frntx_assistants::RunEvent;

#[test]
fn run_status_parses_wire_values() {
    let status: RunStatus = serde_json::from_str("\"in_progress\"").unwrap();
    assert_eq!(status, RunStatus::InProgress);

    let status: RunStatus = serde_json::from_str("\"requires_action\"").unwrap();
    assert_eq!(status, RunStatus::RequiresAction);
}

#[test]
fn run_status_terminal_classification() {
    assert!(RunStatus::Completed.is_terminal());
    assert!(RunStatus::Failed.is_terminal());
    assert!(RunStatus::Cancelled.is_terminal());
    assert!(RunStatus::Expired.is_terminal());
    assert!(!RunStatus::Queued.is_terminal());
    assert!(!RunStatus::InProgress.is_terminal());
    assert!(!RunStatus::RequiresAction.is_terminal());

    assert!(!RunStatus::Completed.is_failure());
    assert!(RunStatus::Failed.is_failure());
    assert!(RunStatus::Cancelled.is_failure());
}

#[test]
fn thread_message_decodes_text_parts() {
    let json = r#"{
        "id": "msg_1",
        "role": "assistant",
        "created_at": 1700000000,
        "content": [
            {"type": "text", "text": {"value": "Hi there", "annotations": []}}
        ]
    }"#;

    let message: ThreadMessage = serde_json::from_str(json).unwrap();
    assert_eq!(message.text(), "Hi there");
    assert!(matches!(message.content[0], MessageContent::Text { .. }));
}

#[test]
fn thread_message_text_skips_image_parts() {
    let json = r#"{
        "id": "msg_2",
        "role": "assistant",
        "created_at": 1700000000,
        "content": [
            {"type": "image_file", "image_file": {"file_id": "file-img"}},
            {"type": "text", "text": {"value": "caption"}}
        ]
    }"#;

    let message: ThreadMessage = serde_json::from_str(json).unwrap();
    assert_eq!(message.text(), "caption");
}

#[test]
fn file_path_annotation_decodes() {
    let json = r#"{
        "type": "file_path",
        "text": "sandbox:/mnt/data/report.csv",
        "start_index": 10,
        "end_index": 38,
        "file_path": {"file_id": "file-abc"}
    }"#;

    let annotation: Annotation = serde_json::from_str(json).unwrap();
    match annotation {
        Annotation::FilePath {
            text, file_path, ..
        } => {
            assert_eq!(text, "sandbox:/mnt/data/report.csv");
            assert_eq!(file_path.file_id, "file-abc");
        }
        _ => panic!("expected file_path annotation"),
    }
}

#[test]
fn run_event_round_trips_through_json() {
    let event = RunEvent::TextDelta {
        value: Some("Hel".to_string()),
        annotations: Vec::new(),
    };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"text_delta\""));

    let back: RunEvent = serde_json::from_str(&json).unwrap();
    match back {
        RunEvent::TextDelta { value, .. } => assert_eq!(value.as_deref(), Some("Hel")),
        _ => panic!("expected text_delta"),
    }
}

#[test]
fn run_event_failed_carries_status() {
    let event = RunEvent::RunFailed {
        status: RunStatus::Failed,
        message: Some("rate limited".to_string()),
    };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"run_failed\""));
    assert!(json.contains("\"status\":\"failed\""));
}
