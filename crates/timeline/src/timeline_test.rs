//! Tests for the message timeline

use super::*;
use crate::Category;
use chrono::TimeZone;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Timeline with `n` messages on topics `t/0 .. t/{n-1}`
fn filled(n: usize) -> MessageTimeline {
    let mut timeline = MessageTimeline::new();
    for i in 0..n {
        timeline.ingest(format!("t/{i}"), Bytes::new(), at(i as i64));
    }
    timeline
}

fn selected_topic(timeline: &MessageTimeline) -> &str {
    &timeline.selected().unwrap().topic
}

// ============================================================================
// Ingest and capacity
// ============================================================================

#[test]
fn test_new_timeline_is_empty_and_following() {
    let timeline = MessageTimeline::new();
    assert!(timeline.is_empty());
    assert_eq!(timeline.capacity(), DEFAULT_CAPACITY);
    assert_eq!(timeline.selected_index(), 0);
    assert!(timeline.selected().is_none());
    assert!(timeline.is_following());
}

#[test]
fn test_huge_capacity_does_not_reserve_up_front() {
    let mut timeline = MessageTimeline::with_capacity(1_000_000_000_000);
    assert_eq!(timeline.capacity(), 1_000_000_000_000);

    timeline.ingest("t/0", Bytes::new(), at(0));
    assert_eq!(timeline.len(), 1);
    assert_eq!(selected_topic(&timeline), "t/0");
}

#[test]
fn test_ingest_classifies_and_follows() {
    let mut timeline = MessageTimeline::new();
    timeline.ingest("spBv1.0/g/NDATA/n", vec![1, 2, 3], at(0));
    timeline.ingest("te/device/main///m/", &b"{}"[..], at(1));

    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.selected_index(), 1);
    assert_eq!(timeline.get(0).unwrap().category, Category::BinaryProtocol);
    assert_eq!(timeline.selected().unwrap().category, Category::PrimaryTelemetry);
}

#[test]
fn test_capacity_evicts_oldest() {
    let timeline = filled(501);

    assert_eq!(timeline.len(), 500);
    assert_eq!(timeline.get(0).unwrap().topic, "t/1");
    assert_eq!(timeline.get(499).unwrap().topic, "t/500");
    assert_eq!(timeline.selected_index(), 499);
    assert_eq!(selected_topic(&timeline), "t/500");
}

#[test]
fn test_eviction_keeps_fixed_selection_on_same_message() {
    let mut timeline = filled(500);
    for _ in 0..10 {
        timeline.move_up();
    }
    assert_eq!(selected_topic(&timeline), "t/489");

    timeline.ingest("t/500", Bytes::new(), at(500));

    assert!(!timeline.is_following());
    assert_eq!(timeline.selected_index(), 488);
    assert_eq!(selected_topic(&timeline), "t/489");
}

#[test]
fn test_eviction_at_index_zero_stays_at_zero() {
    let mut timeline = filled(500);
    timeline.jump_to_top();

    timeline.ingest("t/500", Bytes::new(), at(500));

    assert_eq!(timeline.selected_index(), 0);
    assert_eq!(selected_topic(&timeline), "t/1");
}

#[test]
fn test_small_capacity() {
    let mut timeline = MessageTimeline::with_capacity(0);
    assert_eq!(timeline.capacity(), 1);

    timeline.ingest("a", Bytes::new(), at(0));
    timeline.ingest("b", Bytes::new(), at(1));
    assert_eq!(timeline.len(), 1);
    assert_eq!(selected_topic(&timeline), "b");
}

// ============================================================================
// Navigation and follow mode
// ============================================================================

#[test]
fn test_move_up_leaves_follow_mode() {
    let mut timeline = filled(5);

    timeline.move_up();
    assert_eq!(timeline.selected_index(), 3);
    assert!(!timeline.is_following());

    timeline.ingest("t/5", Bytes::new(), at(5));
    assert_eq!(timeline.selected_index(), 3);
}

#[test]
fn test_move_up_at_top_is_noop() {
    let mut timeline = filled(1);
    timeline.move_up();
    assert_eq!(timeline.selected_index(), 0);
    assert!(timeline.is_following());
}

#[test]
fn test_move_down_to_last_resumes_follow() {
    let mut timeline = filled(5);
    timeline.move_up();
    timeline.move_up();

    timeline.move_down();
    assert_eq!(timeline.selected_index(), 3);
    assert!(!timeline.is_following());

    timeline.move_down();
    assert_eq!(timeline.selected_index(), 4);
    assert!(timeline.is_following());

    timeline.ingest("t/5", Bytes::new(), at(5));
    assert_eq!(timeline.selected_index(), 5);
}

#[test]
fn test_move_down_at_bottom_is_noop() {
    let mut timeline = filled(3);
    timeline.jump_to_top();
    timeline.jump_to_bottom();
    timeline.move_down();
    assert_eq!(timeline.selected_index(), 2);
}

#[test]
fn test_jump_to_top_and_bottom() {
    let mut timeline = filled(10);

    timeline.jump_to_top();
    assert_eq!(timeline.selected_index(), 0);
    assert_eq!(timeline.offset(), 0);
    assert!(!timeline.is_following());

    timeline.jump_to_bottom();
    assert_eq!(timeline.selected_index(), 9);
    assert!(timeline.is_following());
}

#[test]
fn test_jump_to_bottom_on_empty_keeps_state() {
    let mut timeline = MessageTimeline::new();
    timeline.jump_to_top();
    timeline.jump_to_bottom();
    assert!(!timeline.is_following());
    assert_eq!(timeline.selected_index(), 0);
}

#[test]
fn test_clear_resets_everything() {
    let mut timeline = filled(20);
    timeline.set_window_height(5);
    timeline.move_up();

    timeline.clear();

    assert!(timeline.is_empty());
    assert_eq!(timeline.selected_index(), 0);
    assert_eq!(timeline.offset(), 0);
    assert!(timeline.is_following());
    assert!(timeline.selected().is_none());
}

// ============================================================================
// List window
// ============================================================================

#[test]
fn test_window_follows_newest() {
    let mut timeline = MessageTimeline::new();
    timeline.set_window_height(4);
    for i in 0..10 {
        timeline.ingest(format!("t/{i}"), Bytes::new(), at(i));
    }

    assert_eq!(timeline.offset(), 6);
    let shown: Vec<usize> = timeline.visible().map(|(i, _)| i).collect();
    assert_eq!(shown, vec![6, 7, 8, 9]);
}

#[test]
fn test_window_scrolls_up_with_selection() {
    let mut timeline = filled(10);
    timeline.set_window_height(4);
    assert_eq!(timeline.offset(), 6);

    for _ in 0..4 {
        timeline.move_up();
    }
    assert_eq!(timeline.selected_index(), 5);
    assert_eq!(timeline.offset(), 5);

    timeline.move_down();
    assert_eq!(timeline.offset(), 5);
}

#[test]
fn test_window_grows_without_moving_selection_out() {
    let mut timeline = filled(10);
    timeline.set_window_height(3);
    timeline.set_window_height(20);

    assert_eq!(timeline.window_height(), 20);
    assert_eq!(timeline.visible().count(), 10 - timeline.offset());
    let selected = timeline.selected_index();
    assert!(timeline.offset() <= selected && selected < timeline.offset() + 20);
}

#[test]
fn test_window_height_zero_is_one_row() {
    let mut timeline = filled(3);
    timeline.set_window_height(0);
    assert_eq!(timeline.window_height(), 1);
    assert_eq!(timeline.offset(), 2);
}

// ============================================================================
// Rebirth target
// ============================================================================

fn mixed_timeline() -> MessageTimeline {
    let mut timeline = MessageTimeline::new();
    let topics = [
        "spBv1.0/g0/NBIRTH/node0",
        "te/device/main///m/",
        "c8y/s/us",
        "spBv1.0/g1/DATA/node7/dev1",
        "te/device/child///m/env",
        "c8y/measurement/measurements/create",
    ];
    for (i, topic) in topics.iter().enumerate() {
        timeline.ingest(*topic, Bytes::new(), at(i as i64));
    }
    timeline
}

#[test]
fn test_rebirth_target_scans_back_from_selection() {
    let timeline = mixed_timeline();
    assert_eq!(timeline.selected_index(), 5);

    let target = timeline.rebirth_target("tedge", "gateway01");
    assert_eq!(target, RebirthTarget::new("g1", "node7"));
}

#[test]
fn test_rebirth_target_ignores_messages_after_selection() {
    let mut timeline = mixed_timeline();
    timeline.move_up();
    timeline.move_up();
    timeline.move_up();
    assert_eq!(timeline.selected_index(), 2);

    let target = timeline.rebirth_target("tedge", "gateway01");
    assert_eq!(target, RebirthTarget::new("g0", "node0"));
}

#[test]
fn test_rebirth_target_skips_malformed_sparkplug_topics() {
    let mut timeline = MessageTimeline::new();
    timeline.ingest("spBv1.0/g2/NDATA/n2", Bytes::new(), at(0));
    timeline.ingest("spBv1.0/STATE/host", Bytes::new(), at(1));
    timeline.ingest("spBv1.0//NDATA/n3", Bytes::new(), at(2));

    let target = timeline.rebirth_target("tedge", "gateway01");
    assert_eq!(target, RebirthTarget::new("g2", "n2"));
}

#[test]
fn test_rebirth_target_defaults() {
    let timeline = MessageTimeline::new();
    assert_eq!(
        timeline.rebirth_target("tedge", "gateway01"),
        RebirthTarget::new("tedge", "gateway01")
    );

    let mut timeline = MessageTimeline::new();
    timeline.ingest("te/device/main///m/", Bytes::new(), at(0));
    assert_eq!(
        timeline.rebirth_target("site", "edge"),
        RebirthTarget::new("site", "edge")
    );
}
