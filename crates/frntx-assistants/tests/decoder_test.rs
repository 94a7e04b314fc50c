use frntx_assistants::{RunEvent, RunEventDecoder};

fn feed_all(lines: &[&str]) -> Vec<RunEvent> {
    let mut decoder = RunEventDecoder::new();
    let mut events = Vec::new();
    for line in lines {
        events.extend(decoder.feed_line(line).unwrap());
    }
    events
}

#[test]
fn decodes_text_lifecycle_in_order() {
    let events = feed_all(&[
        "event: thread.message.created",
        r#"data: {"id":"msg_1","object":"thread.message","delta":{"content":[]}}"#,
        "",
        "event: thread.message.delta",
        r#"data: {"id":"msg_1","delta":{"content":[{"index":0,"type":"text","text":{"value":"Hel","annotations":[]}}]}}"#,
        "",
        "event: thread.message.delta",
        r#"data: {"id":"msg_1","delta":{"content":[{"index":0,"type":"text","text":{"value":"lo","annotations":[]}}]}}"#,
        "",
        "event: thread.run.completed",
        r#"data: {"id":"run_1","thread_id":"t_1","assistant_id":"a_1","status":"completed"}"#,
        "",
        "event: done",
        "data: [DONE]",
    ]);

    assert_eq!(events.len(), 5);
    assert!(matches!(events[0], RunEvent::TextCreated));
    assert!(
        matches!(&events[1], RunEvent::TextDelta { value: Some(v), .. } if v == "Hel"),
        "got {:?}",
        events[1]
    );
    assert!(matches!(&events[2], RunEvent::TextDelta { value: Some(v), .. } if v == "lo"));
    assert!(matches!(events[3], RunEvent::RunCompleted));
    assert!(matches!(events[4], RunEvent::Done));
}

#[test]
fn decodes_annotations_on_text_delta() {
    let events = feed_all(&[
        "event: thread.message.delta",
        r#"data: {"id":"msg_1","delta":{"content":[{"index":0,"type":"text","text":{"value":null,"annotations":[{"type":"file_path","text":"[ref]","file_path":{"file_id":"file-abc"}}]}}]}}"#,
    ]);

    assert_eq!(events.len(), 1);
    match &events[0] {
        RunEvent::TextDelta { value, annotations } => {
            assert!(value.is_none());
            assert_eq!(annotations.len(), 1);
        }
        other => panic!("expected text_delta, got {other:?}"),
    }
}

#[test]
fn decodes_code_interpreter_steps() {
    let events = feed_all(&[
        "event: thread.run.step.created",
        r#"data: {"id":"step_1","step_details":{"type":"tool_calls","tool_calls":[{"type":"code_interpreter","code_interpreter":{"input":"","outputs":[]}}]}}"#,
        "event: thread.run.step.delta",
        r#"data: {"id":"step_1","delta":{"step_details":{"type":"tool_calls","tool_calls":[{"index":0,"type":"code_interpreter","code_interpreter":{"input":"print(1)"}}]}}}"#,
    ]);

    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], RunEvent::ToolCallCreated { kind } if kind == "code_interpreter"));
    assert!(matches!(&events[1], RunEvent::ToolCallDelta { input } if input == "print(1)"));
}

#[test]
fn decodes_image_file_part() {
    let events = feed_all(&[
        "event: thread.message.delta",
        r#"data: {"id":"msg_1","delta":{"content":[{"index":0,"type":"image_file","image_file":{"file_id":"file-img"}}]}}"#,
    ]);

    assert!(matches!(&events[0], RunEvent::ImageFileDone { file_id } if file_id == "file-img"));
}

#[test]
fn decodes_run_failed_with_error_message() {
    let events = feed_all(&[
        "event: thread.run.failed",
        r#"data: {"id":"run_1","thread_id":"t_1","assistant_id":"a_1","status":"failed","last_error":{"code":"server_error","message":"boom"}}"#,
    ]);

    match &events[0] {
        RunEvent::RunFailed { status, message } => {
            assert!(status.is_failure());
            assert_eq!(message.as_deref(), Some("boom"));
        }
        other => panic!("expected run_failed, got {other:?}"),
    }
}

#[test]
fn decodes_requires_action_with_tool_calls() {
    let events = feed_all(&[
        "event: thread.run.requires_action",
        r#"data: {"id":"run_1","thread_id":"t_1","assistant_id":"a_1","status":"requires_action","required_action":{"type":"submit_tool_outputs","submit_tool_outputs":{"tool_calls":[{"id":"call_1","type":"function","function":{"name":"lookup","arguments":"{}"}}]}}}"#,
    ]);

    match &events[0] {
        RunEvent::RequiresAction { run_id, tool_calls } => {
            assert_eq!(run_id, "run_1");
            assert_eq!(tool_calls.len(), 1);
            assert_eq!(tool_calls[0].function.name, "lookup");
        }
        other => panic!("expected requires_action, got {other:?}"),
    }
}

#[test]
fn skips_unknown_events_without_error() {
    let events = feed_all(&[
        "event: thread.run.created",
        r#"data: {"id":"run_1","thread_id":"t_1","assistant_id":"a_1","status":"queued"}"#,
        "event: thread.message.completed",
        r#"data: {"id":"msg_1","role":"assistant","created_at":1,"content":[]}"#,
    ]);

    assert!(events.is_empty());
}

#[test]
fn data_without_event_name_is_skipped() {
    let events = feed_all(&[r#"data: {"id":"msg_1","delta":{"content":[]}}"#]);
    assert!(events.is_empty());
}

#[test]
fn malformed_payload_of_known_event_is_an_error() {
    let mut decoder = RunEventDecoder::new();
    decoder.feed_line("event: thread.message.delta").unwrap();
    assert!(decoder.feed_line("data: {not json").is_err());
}
