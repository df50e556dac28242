//! Integration tests for the animation core.
//!
//! These drive a [`Session`] the way the render loop does and check the
//! trajectory, the trail restart behavior, and trail serialization.

use lorenz_trail::attractor::step;
use lorenz_trail::{AttractorState, LorenzParams, Session, TrailBuffer, TrailError, Vec3};

// ============================================================================
// Trajectory
// ============================================================================

#[test]
fn test_long_run_stays_on_attractor() {
    let mut session = Session::new(20_000);

    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for _ in 0..20_000 {
        let frame = session.tick();
        assert!(frame.marker.is_finite(), "non-finite state {:?}", frame.marker);
        let p = frame.marker.to_vec3();
        min = min.min(p);
        max = max.max(p);
    }

    assert!(min.x >= -25.0 && max.x <= 25.0, "x range {}..{}", min.x, max.x);
    assert!(min.y >= -30.0 && max.y <= 30.0, "y range {}..{}", min.y, max.y);
    assert!(min.z >= -1.0 && max.z <= 55.0, "z range {}..{}", min.z, max.z);

    // The trajectory actually visits both lobes.
    assert!(min.x < -5.0 && max.x > 5.0);
}

#[test]
fn test_session_matches_manual_integration() {
    let params = LorenzParams::default();
    let mut expected = AttractorState::INITIAL;
    let mut session = Session::new(100);

    for _ in 0..250 {
        expected = step(expected, &params);
        assert_eq!(session.tick().marker, expected);
    }
}

// ============================================================================
// Trail restart
// ============================================================================

#[test]
fn test_trail_restarts_every_capacity_ticks() {
    let capacity = 20_000;
    let mut session = Session::new(capacity);

    for _ in 0..capacity {
        session.tick();
    }
    assert_eq!(session.trail().valid_count(), capacity);
    assert_eq!(session.trail().write_cursor(), 0);

    let frame = session.tick();
    assert_eq!(frame.draw_count, 1);
    assert_eq!(session.trail().draw_range(), 0..1);
    assert_eq!(session.trail().positions()[0], frame.marker.to_vec3());
}

#[test]
fn test_trail_colors_follow_hue() {
    let mut session = Session::new(10_000);
    for _ in 0..5_001 {
        session.tick();
    }
    let colors = session.trail().colors();
    // First vertex is pure red, a sixth of a hue turn later is yellow.
    assert!((colors[0] - Vec3::X).abs().max_element() < 1e-4);
    assert!((colors[833] - Vec3::new(1.0, 1.0, 0.0)).abs().max_element() < 1e-2);
    // After a full turn the hue is back at red.
    assert!((colors[5_000] - Vec3::X).abs().max_element() < 1e-2);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_trail_round_trip_reproduces_behavior() {
    let mut original = TrailBuffer::new(64);
    for i in 0..100 {
        original.push(Vec3::splat(i as f32), Vec3::new(0.5, 0.25, i as f32 / 100.0));
    }

    let json = serde_json::to_string(&original).unwrap();
    let mut restored: TrailBuffer = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.capacity(), original.capacity());
    assert_eq!(restored.write_cursor(), original.write_cursor());
    assert_eq!(restored.valid_count(), original.valid_count());
    assert_eq!(restored.positions(), original.positions());
    assert_eq!(restored.colors(), original.colors());
    assert_eq!(restored, original);

    // A restored trail must be re-uploaded in full.
    assert_eq!(restored.take_dirty(), Some(0..64));

    for i in 0..200 {
        let p = Vec3::new(i as f32, -(i as f32), 1.0);
        assert_eq!(restored.push(p, Vec3::ONE), original.push(p, Vec3::ONE));
        assert_eq!(restored.draw_range(), original.draw_range());
    }
    assert_eq!(restored.positions(), original.positions());
}

#[test]
fn test_session_resumes_from_snapshot() {
    let mut original = Session::new(128);
    for _ in 0..300 {
        original.tick();
    }

    let trail_json = serde_json::to_string(original.trail()).unwrap();
    let state_json = serde_json::to_string(&original.state()).unwrap();
    let hue_json = serde_json::to_string(original.hue()).unwrap();

    let mut resumed = Session::from_parts(
        *original.params(),
        serde_json::from_str(&state_json).unwrap(),
        serde_json::from_str(&hue_json).unwrap(),
        serde_json::from_str(&trail_json).unwrap(),
    );

    for _ in 0..500 {
        assert_eq!(resumed.tick(), original.tick());
    }
    assert_eq!(resumed.trail().positions(), original.trail().positions());
    assert_eq!(resumed.trail().colors(), original.trail().colors());
}

#[test]
fn test_invalid_snapshots_rejected() {
    let zero = r#"{"capacity":0,"positions":[],"colors":[],"write_cursor":0,"valid_count":0}"#;
    let err = serde_json::from_str::<TrailBuffer>(zero).unwrap_err();
    assert!(err.to_string().contains(&TrailError::ZeroCapacity.to_string()));

    let short = r#"{"capacity":2,"positions":[[0,0,0]],"colors":[[0,0,0],[0,0,0]],"write_cursor":0,"valid_count":0}"#;
    assert!(serde_json::from_str::<TrailBuffer>(short).is_err());

    let cursor = r#"{"capacity":1,"positions":[[0,0,0]],"colors":[[0,0,0]],"write_cursor":1,"valid_count":0}"#;
    assert!(serde_json::from_str::<TrailBuffer>(cursor).is_err());

    let count = r#"{"capacity":1,"positions":[[0,0,0]],"colors":[[0,0,0]],"write_cursor":0,"valid_count":2}"#;
    assert!(serde_json::from_str::<TrailBuffer>(count).is_err());

    // Count and cursor must agree, or a draw would reach past the last write.
    let mismatch = r#"{"capacity":4,"positions":[[0,0,0],[0,0,0],[0,0,0],[0,0,0]],"colors":[[0,0,0],[0,0,0],[0,0,0],[0,0,0]],"write_cursor":1,"valid_count":3}"#;
    let err = serde_json::from_str::<TrailBuffer>(mismatch).unwrap_err();
    let expected = TrailError::CountMismatch { count: 3, cursor: 1 };
    assert!(err.to_string().contains(&expected.to_string()));
}

#[test]
fn test_restored_draw_range_ends_at_cursor() {
    let zeros = "[[0,0,0],[0,0,0],[0,0,0],[0,0,0]]";
    let snapshot = |cursor: usize, count: usize| {
        format!(
            r#"{{"capacity":4,"positions":{zeros},"colors":{zeros},"write_cursor":{cursor},"valid_count":{count}}}"#
        )
    };

    for cursor in 0..4 {
        for count in 0..=4 {
            let result = serde_json::from_str::<TrailBuffer>(&snapshot(cursor, count));
            let reachable = count == cursor || (cursor == 0 && count == 4);
            match result {
                Ok(trail) => {
                    assert!(reachable, "accepted cursor {} count {}", cursor, count);
                    let end = trail.draw_range().end;
                    assert!(end == trail.write_cursor() || (end == 4 && trail.write_cursor() == 0));
                }
                Err(_) => assert!(!reachable, "rejected cursor {} count {}", cursor, count),
            }
        }
    }
}
