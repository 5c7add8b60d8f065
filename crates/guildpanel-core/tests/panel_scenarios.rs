#![allow(clippy::expect_used)]

use guildpanel_core::action::{ActionAttributes, plan_removal};
use guildpanel_core::api::{HttpMethod, decode_response};
use guildpanel_core::audit::AuditFeed;
use guildpanel_core::backup::RestoreRequest;
use guildpanel_core::bulk::{BulkAction, BulkRequest, require_selection};
use guildpanel_core::console::{ConsoleEffect, ControlState};
use guildpanel_core::countdown::{CountdownDisplay, countdown_display};
use guildpanel_core::model::{GlobalStats, Violation};
use guildpanel_core::render;
use guildpanel_core::socket::{ChannelEvent, SocketIoClient, SocketOutput};
use guildpanel_core::stats::StatCounter;
use guildpanel_core::{
    ActionCommand, ApiEnvelope, CollectionKind, FieldValue, FormSnapshot, FormSubmission,
    JobConsole, JobKind, ValidationError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn violation_json(event_id: &str) -> serde_json::Value {
    json!({
        "event_id": event_id,
        "auto_deleted": false,
        "user": {"id": "77", "name": "spammer", "avatar_url": "https://cdn/a.png"},
        "message": {
            "id": "m1",
            "channel_id": "c1",
            "channel_name": "general",
            "content": "buy now",
            "jump_url": "https://discord.com/channels/1/2/3"
        },
        "violation_type": "spam",
        "timestamp": "2024-03-01T10:20:30Z"
    })
}

fn connect_session(effects: &[ConsoleEffect]) -> Option<guildpanel_core::console::SessionId> {
    effects.iter().find_map(|effect| match effect {
        ConsoleEffect::Connect { session } => Some(*session),
        _ => None,
    })
}

#[test]
fn stats_latency_is_suffixed_and_counts_are_bare() {
    let stats: GlobalStats = decode_response(
        200,
        r#"{"guilds": 12, "users": 3400, "latency": 42, "commands": 7}"#,
    )
    .expect("stats should decode");
    assert_eq!(stats.counter_text(StatCounter::Latency), "42 ms");
    assert_eq!(stats.counter_text(StatCounter::Guilds), "12");
    assert_eq!(stats.counter_text(StatCounter::Users), "3400");
}

#[test]
fn duplicate_violation_renders_once() {
    let mut feed = AuditFeed::default();
    let mut log = Vec::new();
    for raw in [violation_json("ev-9"), violation_json("ev-9")] {
        let violation: Violation = serde_json::from_value(raw).expect("violation should decode");
        if feed.admit(violation.event_id.as_str()) {
            log.insert(0, render::audit::violation_card(&violation));
        }
    }
    assert_eq!(log.len(), 1);
    assert_eq!(feed.len(), 1);
    assert!(log[0].contains(r#"data-event-id="ev-9""#));
}

#[test]
fn bulk_kick_without_selection_sends_nothing() {
    assert_eq!(
        require_selection(&[]),
        Err(ValidationError::NoMembersSelected)
    );
    assert_eq!(
        ValidationError::NoMembersSelected.to_string(),
        "Please select at least one member."
    );

    let request = BulkRequest {
        action: BulkAction::Kick,
        target_ids: vec!["1".to_string(), "2".to_string()],
        role_id: None,
    }
    .request("guild-1");
    assert_eq!(request.path, "/api/guild/guild-1/bulk_action");
    assert_eq!(
        request.body,
        Some(json!({"action": "bulk_kick", "target_ids": ["1", "2"], "role_id": null}))
    );
}

#[test]
fn restore_phrase_mismatch_never_opens_a_channel() {
    let mut console = JobConsole::new(JobKind::Restore);
    let outcome = RestoreRequest::validate(true, "delete everything", Some("RESTORE MY GUILD"));
    assert_eq!(outcome, Err(ValidationError::PhraseMismatch));
    assert!(console.active_session().is_none());

    let request = RestoreRequest::validate(true, " RESTORE MY GUILD ", Some("RESTORE MY GUILD"))
        .expect("trimmed phrase should match");
    let job = request.into_job("g1", "{\"roles\":[]}".to_string());
    let effects = console.start(serde_json::to_value(&job).expect("job should serialize"));
    assert!(connect_session(&effects).is_some());
}

#[test]
fn countdown_flips_to_expired_at_the_deadline() {
    let expires_at = 1_700_000_000;
    assert_eq!(
        countdown_display(Some(expires_at), expires_at - 1),
        CountdownDisplay::Remaining("00:01".to_string())
    );
    assert!(countdown_display(Some(expires_at), expires_at).is_expired());
    assert_eq!(
        countdown_display(Some(expires_at), expires_at - 90_061).text(),
        "1d 01:01:01"
    );
}

#[test]
fn confirmation_templates() {
    let command = |action: &str| {
        ActionCommand::from_attributes(&ActionAttributes {
            action: Some(action),
            target_id: Some("12345"),
            ..ActionAttributes::default()
        })
        .expect("command should validate")
    };
    assert_eq!(
        command("action/kick").confirmation_message(),
        "Are you sure you want to kick user 12345?"
    );
    assert_eq!(
        command("action/unmute").confirmation_message(),
        "Are you sure you want to remove the mute on user 12345?"
    );
    assert_eq!(
        command("action/vc_kick").confirmation_message(),
        "Are you sure you want to perform this action on item 12345?"
    );
}

#[test]
fn removing_the_last_item_draws_the_placeholder_once() {
    let plan = plan_removal(Some("kb-list"), 0);
    assert_eq!(plan.empty_state, Some(CollectionKind::KnowledgeBase));
    let placeholder = render::empty_state(CollectionKind::KnowledgeBase);
    assert!(placeholder.contains("The knowledge base is empty."));

    assert_eq!(plan_removal(Some("kb-list"), 2).empty_state, None);
    assert_eq!(plan_removal(Some("unrelated"), 0).empty_state, None);
}

#[test]
fn multi_select_is_always_an_array() {
    let snapshot = |values: &[&str]| FormSnapshot {
        form_id: "role-settings-form".to_string(),
        entries: values
            .iter()
            .map(|value| ("role_ids".to_string(), (*value).to_string()))
            .collect(),
        multi_fields: vec!["role_ids".to_string()],
        submitter_action: None,
    };
    for values in [&[][..], &["1"][..], &["1", "2"][..]] {
        let submission = FormSubmission::from_snapshot(&snapshot(values));
        let body = submission.to_json();
        assert_eq!(body["role_ids"], json!(values));
        assert_eq!(body["form_id"], json!("role-settings-form"));
        assert_eq!(
            submission.field("role_ids"),
            Some(&FieldValue::Multi(
                values.iter().map(|value| (*value).to_string()).collect()
            ))
        );
    }
}

#[test]
fn restarting_a_console_disconnects_the_old_session_first() {
    let mut console = JobConsole::new(JobKind::Broadcast);
    let first = connect_session(&console.start(json!({"title": "a"}))).expect("first session");
    let effects = console.start(json!({"title": "b"}));
    assert_eq!(effects.first(), Some(&ConsoleEffect::Disconnect { session: first }));
    let second = connect_session(&effects).expect("second session");
    assert_ne!(first, second);

    let stale = console.on_event(first, ChannelEvent::Opened, "10:00:00");
    assert!(stale.is_empty());
}

#[test]
fn restore_job_runs_over_socket_frames() {
    let mut console = JobConsole::new(JobKind::Restore);
    let session = connect_session(&console.start(json!({"guild_id": "g1"}))).expect("session");
    let mut client = SocketIoClient::default();

    let mut events = Vec::new();
    for frame in [
        r#"0{"sid":"abc","pingInterval":25000,"pingTimeout":20000}"#,
        r#"40{"sid":"def"}"#,
        r#"42["restore_progress",{"type":"success","message":"roles restored"}]"#,
        r#"42["restore_finished",{"status":"success"}]"#,
    ] {
        for output in client.on_frame(frame).expect("frame should parse") {
            if let SocketOutput::Channel(event) = output {
                events.push(event);
            }
        }
    }
    assert_eq!(events.len(), 3);

    let mut effects = Vec::new();
    for event in events {
        effects.extend(console.on_event(session, event, "10:00:00"));
    }
    let emitted: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            ConsoleEffect::Emit { event, .. } => Some(*event),
            _ => None,
        })
        .collect();
    assert_eq!(emitted, vec!["start_restore"]);
    assert!(effects.contains(&ConsoleEffect::Control(ControlState::Ready)));
    assert_eq!(effects.last(), Some(&ConsoleEffect::Disconnect { session }));
    assert!(console.active_session().is_none());
}

#[test]
fn no_content_reads_as_success() {
    let envelope: ApiEnvelope = decode_response(204, "").expect("204 should decode");
    assert!(envelope.is_success());
    assert_eq!(envelope.message_text(), "Operation succeeded");

    let error = decode_response::<ApiEnvelope>(403, r#"{"message": "Missing permission"}"#)
        .expect_err("403 should fail");
    assert_eq!(error.notice(), "Operation failed: Missing permission");
    assert_eq!(
        guildpanel_core::api::Endpoint::Stats.get().method,
        HttpMethod::Get
    );
}
