//! Tests for sequential operation application, position clamping, and
//! annotation anchoring.

use coauthor_core::{AnnotationKind, AnnotationReply, Role};
use coauthor_test_harness::Harness;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Applying O1..On sequentially yields the deterministic left-to-right fold
/// of each operation over the prior content.
#[test]
fn sequential_application_is_a_left_fold() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    let doc = harness.create_document("Spec", "the cat sat", "alice").unwrap();

    assert!(harness.replace(&doc.id, "alice", 4, "dog"));
    assert_eq!(harness.content(&doc.id).unwrap(), "the dog sat");

    assert!(harness.insert(&doc.id, "alice", 11, " down"));
    assert_eq!(harness.content(&doc.id).unwrap(), "the dog sat down");

    assert!(harness.delete(&doc.id, "alice", 0, "the "));
    assert_eq!(harness.content(&doc.id).unwrap(), "dog sat down");

    assert_eq!(harness.version(&doc.id).unwrap(), 4);
    assert_eq!(harness.workspace().edit_history(&doc.id).len(), 3);
}

/// Application is order-dependent: the same two inserts in opposite orders
/// produce different documents. Arrival order at this authority *is* the
/// document's total order.
#[test]
fn application_order_matters() {
    init_logging();

    let mut left = Harness::new();
    left.create_session("s", "alice");
    let doc_left = left.create_document("d", "ab", "alice").unwrap();
    left.insert(&doc_left.id, "alice", 1, "X");
    left.insert(&doc_left.id, "alice", 1, "Y");
    assert_eq!(left.content(&doc_left.id).unwrap(), "aYXb");

    let mut right = Harness::new();
    right.create_session("s", "alice");
    let doc_right = right.create_document("d", "ab", "alice").unwrap();
    right.insert(&doc_right.id, "alice", 1, "Y");
    right.insert(&doc_right.id, "alice", 1, "X");
    assert_eq!(right.content(&doc_right.id).unwrap(), "aXYb");
}

/// Out-of-range positions are clamped into the document bounds, not
/// rejected: the edit still applies and still bumps the version.
#[test]
fn out_of_range_positions_clamp() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    let doc = harness.create_document("Spec", "Hello", "alice").unwrap();

    assert!(harness.insert(&doc.id, "alice", 1000, "!"));
    assert_eq!(harness.content(&doc.id).unwrap(), "Hello!");

    assert!(harness.delete(&doc.id, "alice", 5, "!!!!!!!!"));
    assert_eq!(harness.content(&doc.id).unwrap(), "Hello");

    assert_eq!(harness.version(&doc.id).unwrap(), 3);
}

/// A delete removes a run whose length comes from the operation's recorded
/// content; the live text is not compared against it. A stale position
/// deletes whatever is there now.
#[test]
fn stale_delete_removes_current_text() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    harness.join_session("bob");
    let doc = harness.create_document("Spec", "abcdef", "alice").unwrap();
    harness.share_document(&doc.id, "bob", Role::Editor);

    // Alice rewrites the start; Bob deletes "abc" against his stale view
    assert!(harness.replace(&doc.id, "alice", 0, "XYZ"));
    assert!(harness.delete(&doc.id, "bob", 0, "abc"));

    // Bob's delete removed the three characters now at position 0
    assert_eq!(harness.content(&doc.id).unwrap(), "def");
}

/// Annotation anchors are stored verbatim and are not shifted by a later
/// insert earlier in the document.
#[test]
fn annotation_positions_do_not_track_edits() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    let doc = harness.create_document("Spec", "Hello World", "alice").unwrap();

    assert!(harness.annotate(&doc.id, "alice", AnnotationKind::Highlight, 6, "nice word"));
    assert!(harness.insert(&doc.id, "alice", 0, ">>> "));

    let annotations = harness.workspace().annotations(&doc.id).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].position, 6);
}

/// Viewer access is enough to annotate, and annotations from users with no
/// role at all are rejected.
#[test]
fn annotations_require_viewer_access() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    let doc = harness.create_document("Spec", "Hello", "alice").unwrap();
    harness.share_document(&doc.id, "bob", Role::Viewer);

    assert!(harness.annotate(&doc.id, "bob", AnnotationKind::Comment, 0, "hm"));
    assert!(!harness.annotate(&doc.id, "stranger", AnnotationKind::Comment, 0, "hi"));

    assert_eq!(harness.workspace().annotations(&doc.id).unwrap().len(), 1);
}

#[test]
fn annotation_replies_accumulate() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    let doc = harness.create_document("Spec", "Hello", "alice").unwrap();
    harness.share_document(&doc.id, "bob", Role::Viewer);

    assert!(harness.annotate(&doc.id, "alice", AnnotationKind::Suggestion, 0, "tighten this"));
    let annotation_id = harness.workspace().annotations(&doc.id).unwrap()[0].id;

    let bob = harness.user_id("bob");
    let at = harness.tick();
    let reply = AnnotationReply::new(bob, "agreed", at);
    assert!(
        harness
            .workspace_mut()
            .add_annotation_reply(&doc.id, &annotation_id, reply)
    );

    let alice = harness.user_id("alice");
    let at = harness.tick();
    let reply = AnnotationReply::new(alice, "done", at);
    assert!(
        harness
            .workspace_mut()
            .add_annotation_reply(&doc.id, &annotation_id, reply)
    );

    let annotations = harness.workspace().annotations(&doc.id).unwrap();
    assert_eq!(annotations[0].replies.len(), 2);
    assert_eq!(annotations[0].replies[0].content, "agreed");
    assert_eq!(annotations[0].replies[1].content, "done");
}

/// Edits update the document's modification metadata from the operation's
/// own timestamp and author.
#[test]
fn edits_update_modification_metadata() {
    init_logging();

    let mut harness = Harness::new();
    harness.create_session("Design Sync", "alice");
    harness.join_session("bob");
    let doc = harness.create_document("Spec", "Hello", "alice").unwrap();
    harness.share_document(&doc.id, "bob", Role::Editor);

    assert!(harness.insert(&doc.id, "bob", 5, "!"));

    let bob = harness.user_id("bob");
    let meta = harness.workspace().document(&doc.id).unwrap();
    assert_eq!(meta.last_modified_by, bob);
    assert!(meta.last_modified_at > meta.created_at);
}
