//! Integration tests for the planning board
//!
//! These exercise the board end to end through PlanningSession: drag
//! gestures, promotion, deletion, ordering, and the column/routine-index
//! membership invariant.

use proptest::prelude::*;

use planboard::{
    Category, ColumnId, DateKey, DragEvent, DragOutcome, PlanningSession, Routine, Spot,
};

fn day(n: u32) -> DateKey {
    DateKey::from_ymd(2024, 6, n).expect("valid date")
}

fn session_with_spots(n: usize) -> PlanningSession {
    let mut session = PlanningSession::new("trip", "Taipei", vec![day(1), day(2), day(3)]);
    for i in 0..n {
        let spot = Spot::with_id(format!("s{}", i), format!("Place {}", i), Category::Attraction);
        session.add_spot(spot).expect("staging push");
    }
    session
}

// =============================================================================
// Scenario tests
// =============================================================================

#[test]
fn test_promotion_end_to_end() {
    let mut session = PlanningSession::new("trip", "Taipei", vec![day(1)]);
    session
        .add_spot(Spot::with_id("s1", "Cafe A", Category::Food))
        .unwrap();

    let outcome = session
        .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(day(1)), 0))
        .expect("promotion");

    let DragOutcome::Promoted { date, .. } = outcome else {
        panic!("Expected promotion");
    };
    assert_eq!(date, day(1));

    let routines = session.routines().day(day(1));
    assert_eq!(routines.len(), 1);
    assert_eq!(routines[0].category, Category::Food);
    assert_eq!(routines[0].start, day(1).as_millis());
    assert_eq!(routines[0].end, day(1).as_millis());
    assert!(!session.columns().get(ColumnId::Staging).unwrap().contains("s1"));
}

#[test]
fn test_membership_invariant_after_transfers() {
    let mut session = session_with_spots(4);

    for (i, spot) in ["s0", "s1", "s2"].iter().enumerate() {
        session
            .handle_drag_end(DragEvent::new(*spot, ColumnId::Staging, 0, ColumnId::Day(day(1)), i))
            .unwrap();
    }
    session
        .handle_drag_end(DragEvent::new("s1", ColumnId::Day(day(1)), 1, ColumnId::Day(day(2)), 0))
        .unwrap();

    // For every day: the routine spot-id set equals the column's id set
    for d in [day(1), day(2), day(3)] {
        let mut from_routines: Vec<String> = session
            .routines()
            .day(d)
            .iter()
            .filter_map(|r| r.spot_id.clone())
            .collect();
        let mut from_column = session.columns().get(ColumnId::Day(d)).unwrap().spot_ids.clone();
        from_routines.sort();
        from_column.sort();
        assert_eq!(from_routines, from_column, "membership invariant for {}", d);
    }
}

#[test]
fn test_order_by_start_morning_scenario() {
    let mut session = PlanningSession::new("trip", "Taipei", vec![day(1)]);
    let base = day(1).as_millis();
    let nine = base + 9 * 3600 * 1000;
    let eight = base + 8 * 3600 * 1000;

    session.add_routine(day(1), Routine::new("Late breakfast", Category::Food, nine, nine));
    session.add_routine(day(1), Routine::new("Early walk", Category::Attraction, eight, eight));

    let ordered = session.ordered_routines();
    assert_eq!(ordered[0].location, "Early walk");
    assert_eq!(ordered[1].location, "Late breakfast");
}

#[test]
fn test_cancelled_drag_leaves_board_byte_identical() {
    let mut session = session_with_spots(3);
    session
        .handle_drag_end(DragEvent::new("s0", ColumnId::Staging, 0, ColumnId::Day(day(1)), 0))
        .unwrap();

    let staging_before = session.columns().get(ColumnId::Staging).unwrap().spot_ids.clone();
    let day_before = session.columns().get(ColumnId::Day(day(1))).unwrap().spot_ids.clone();
    let routines_before = session.routines().to_map();
    let scheduled_before: Vec<bool> = session.spots().iter().map(|s| s.is_scheduled).collect();

    session
        .handle_drag_end(DragEvent::dropped_outside("s1", ColumnId::Staging, 0))
        .unwrap();

    assert_eq!(session.columns().get(ColumnId::Staging).unwrap().spot_ids, staging_before);
    assert_eq!(session.columns().get(ColumnId::Day(day(1))).unwrap().spot_ids, day_before);
    assert_eq!(session.routines().to_map(), routines_before);
    let scheduled_after: Vec<bool> = session.spots().iter().map(|s| s.is_scheduled).collect();
    assert_eq!(scheduled_after, scheduled_before);
}

#[test]
fn test_promote_delete_restores_availability() {
    let mut session = session_with_spots(2);

    let outcome = session
        .handle_drag_end(DragEvent::new("s0", ColumnId::Staging, 0, ColumnId::Day(day(1)), 0))
        .unwrap();
    let DragOutcome::Promoted { routine_id, .. } = outcome else {
        panic!("Expected promotion");
    };
    assert_eq!(session.spots().available().count(), 1);

    session.set_active_date(day(1));
    session.delete_routine(&routine_id).expect("delete");

    assert_eq!(session.spots().available().count(), 2);
    assert!(session.columns().get(ColumnId::Day(day(1))).unwrap().is_empty());
    assert!(session.routines().day(day(1)).is_empty());
}

#[test]
fn test_daily_routines_wire_round_trip() {
    let mut session = PlanningSession::new("trip", "Taipei", vec![day(1)]);
    session
        .add_spot(Spot::with_id("s1", "Cafe A", Category::Food))
        .unwrap();
    session
        .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(day(1)), 0))
        .unwrap();

    let map = session.routines().to_map();
    let json = serde_json::to_string(&map).unwrap();

    // Object keyed by the millisecond string, routines carry postItId
    assert!(json.contains(&format!(r#""{}""#, day(1).as_millis())));
    assert!(json.contains(r#""postItId":"s1""#));

    let back: std::collections::BTreeMap<DateKey, Vec<Routine>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Reordering preserves the id set and the length for any valid pair.
    #[test]
    fn prop_reorder_preserves_set(len in 1usize..8, from in 0usize..8, to in 0usize..8) {
        prop_assume!(from < len && to < len);

        let mut session = session_with_spots(len);
        let mut before = session.columns().get(ColumnId::Staging).unwrap().spot_ids.clone();

        session
            .handle_drag_end(DragEvent::new(
                format!("s{}", from),
                ColumnId::Staging,
                from,
                ColumnId::Staging,
                to,
            ))
            .unwrap();

        let mut after = session.columns().get(ColumnId::Staging).unwrap().spot_ids.clone();
        prop_assert_eq!(after.len(), before.len());
        before.sort();
        after.sort();
        prop_assert_eq!(after, before);
    }

    /// order_by_start yields ascending starts and keeps every routine.
    #[test]
    fn prop_order_by_start_sorted_and_complete(starts in proptest::collection::vec(0i64..100, 0..12)) {
        let mut session = PlanningSession::new("trip", "Taipei", vec![day(1)]);
        for (i, start) in starts.iter().enumerate() {
            let mut routine = Routine::new(format!("r{}", i), Category::Attraction, *start, *start);
            routine.id = format!("r{}", i);
            session.add_routine(day(1), routine);
        }

        let ordered = session.routines().order_by_start(day(1));
        prop_assert_eq!(ordered.len(), starts.len());
        for pair in ordered.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
            // Stable: ties keep insertion order, and ids encode that order
            if pair[0].start == pair[1].start {
                let a: usize = pair[0].id[1..].parse().unwrap();
                let b: usize = pair[1].id[1..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}
