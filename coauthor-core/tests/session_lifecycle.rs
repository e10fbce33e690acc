//! Tests for session creation, membership, and automatic closure.

use coauthor_core::{Role, SessionStatus, SessionUpdate};
use coauthor_test_harness::Harness;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn creator_is_sole_participant() {
    init_logging();

    let mut harness = Harness::new();
    let session = harness.create_session("Design Sync", "alice");

    assert!(session.status.is_active());
    let connected = harness.workspace().connected_users();
    assert_eq!(connected.len(), 1);
    assert_eq!(connected[0].id, session.created_by);

    let events = harness.session_events();
    assert!(matches!(&events[..], [SessionUpdate::Created { session: s }] if s.id == session.id));
}

/// Joining before any session exists returns false, never raises.
#[test]
fn join_before_any_session_returns_false() {
    init_logging();

    let mut harness = Harness::new();
    assert!(!harness.join_session("bob"));
    assert!(harness.session_events().is_empty());
}

#[test]
fn join_with_mismatched_id_returns_false() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");

    let bob = harness.user("bob");
    let stale_id = coauthor_core::SessionId::new();
    assert!(!harness.workspace_mut().join_session(&stale_id, bob));
    assert_eq!(harness.workspace().connected_users().len(), 1);
}

/// Re-joining an already-connected user is idempotent: it returns true, does
/// not duplicate the participant, and does not emit a second UserJoined.
#[test]
fn rejoin_is_idempotent() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    harness.session_events();

    assert!(harness.join_session("bob"));
    assert!(harness.join_session("bob"));

    assert_eq!(harness.workspace().connected_users().len(), 2);
    let joins = harness
        .session_events()
        .into_iter()
        .filter(|e| matches!(e, SessionUpdate::UserJoined { .. }))
        .count();
    assert_eq!(joins, 1);
}

#[test]
fn leave_by_unconnected_user_is_noop() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    harness.session_events();

    harness.leave_session("bob");

    assert_eq!(harness.workspace().connected_users().len(), 1);
    assert!(harness.session_events().is_empty());
}

/// Removing the last connected participant transitions the session to
/// Closed and emits sessionClosed after the final userLeft.
#[test]
fn last_leaver_closes_session() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    harness.join_session("bob");
    harness.session_events();

    harness.leave_session("alice");
    let session = harness.workspace().session().unwrap().clone();
    assert!(session.status.is_active(), "bob is still connected");

    harness.leave_session("bob");
    let session = harness.workspace().session().unwrap().clone();
    assert_eq!(session.status, SessionStatus::Closed);

    let events = harness.session_events();
    assert!(matches!(
        &events[..],
        [
            SessionUpdate::UserLeft { .. },
            SessionUpdate::UserLeft { .. },
            SessionUpdate::Closed { session_id }
        ] if *session_id == session.id
    ));
}

/// Closing a session does not freeze its documents: they remain editable by
/// anyone the ACL already admits.
#[test]
fn documents_survive_session_close() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    let doc = harness.create_document("Spec", "Hello", "alice").unwrap();

    harness.leave_session("alice");
    assert_eq!(
        harness.workspace().session().unwrap().status,
        SessionStatus::Closed
    );

    assert!(harness.insert(&doc.id, "alice", 5, " World"));
    assert_eq!(harness.content(&doc.id).unwrap(), "Hello World");
    assert_eq!(harness.version(&doc.id).unwrap(), 2);
}

/// Creating a session while one is already active replaces it outright; the
/// replaced session's participants are discarded with it and no Closed event
/// fires for it.
#[test]
fn create_session_replaces_previous() {
    init_logging();

    let mut harness = Harness::new();
    let first = harness.create_session("Morning", "alice");
    harness.join_session("bob");
    harness.session_events();

    let second = harness.create_session("Afternoon", "carol");
    assert_ne!(first.id, second.id);

    let connected = harness.workspace().connected_users();
    assert_eq!(connected.len(), 1);
    assert_eq!(connected[0].name, "carol");

    let events = harness.session_events();
    assert!(matches!(&events[..], [SessionUpdate::Created { session }] if session.id == second.id));
}

/// There is no buffering or replay: a subscriber that attaches after an
/// event fired never sees it.
#[test]
fn late_subscribers_see_no_replay() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");

    let mut late_rx = harness.workspace_mut().subscribe_session_updates();
    assert!(late_rx.try_next().is_err(), "no replay of the Created event");

    harness.join_session("bob");
    let event = late_rx.try_next().unwrap().unwrap();
    assert!(matches!(event, SessionUpdate::UserJoined { .. }));
}

#[test]
fn share_conversation_requires_active_session_and_connected_sharer() {
    init_logging();

    let mut harness = Harness::new();
    let alice = harness.user_id("alice");
    let bob = harness.user_id("bob");

    assert!(
        !harness
            .workspace_mut()
            .share_conversation("conv-1", &alice)
    );

    let session = harness.create_session("Design Sync", "alice");
    harness.session_events();

    assert!(!harness.workspace_mut().share_conversation("conv-1", &bob));
    assert!(harness.workspace_mut().share_conversation("conv-1", &alice));

    let events = harness.session_events();
    assert!(matches!(
        &events[..],
        [SessionUpdate::ConversationShared { session_id, conversation_id, shared_by }]
            if *session_id == session.id && conversation_id == "conv-1" && *shared_by == alice
    ));
}

/// Session access is the only gate on document creation; a user who is not
/// even in the session can still be granted a role afterwards.
#[test]
fn sharing_with_users_outside_the_session() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    let doc = harness.create_document("Spec", "Hello", "alice").unwrap();

    assert!(harness.share_document(&doc.id, "mallory", Role::Viewer));
    let mallory = harness.user_id("mallory");
    assert!(
        harness
            .workspace()
            .has_document_access(&mallory, &doc.id, Role::Viewer)
    );
}
