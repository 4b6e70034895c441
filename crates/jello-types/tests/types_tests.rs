//! Integration tests for jello-types.

use jello_types::{GridCoord, GridOffset, JelloError};

// ─── Coordinate Tests ─────────────────────────────────────────

#[test]
fn offset_inside_grid() {
    let c = GridCoord::new(1, 1, 1);
    let moved = c.offset(GridOffset::new(1, -1, 0), 3).unwrap();
    assert_eq!(moved, GridCoord::new(2, 0, 1));
}

#[test]
fn offset_below_zero_is_none() {
    let c = GridCoord::new(0, 2, 2);
    assert!(c.offset(GridOffset::new(-1, 0, 0), 3).is_none());
}

#[test]
fn offset_past_dim_is_none() {
    let c = GridCoord::new(1, 1, 1);
    assert!(c.offset(GridOffset::new(0, 0, 2), 3).is_none());
    assert!(c.offset(GridOffset::new(0, 0, 1), 3).is_some());
}

#[test]
fn offset_lengths() {
    assert_eq!(GridOffset::new(1, 0, 0).length(), 1.0);
    assert!((GridOffset::new(1, -1, 0).length() - 2.0f32.sqrt()).abs() < 1e-6);
    assert!((GridOffset::new(1, 1, -1).length() - 3.0f32.sqrt()).abs() < 1e-6);
    assert_eq!(GridOffset::new(0, 0, -2).length(), 2.0);
}

#[test]
fn axis_count() {
    assert_eq!(GridOffset::new(0, 2, 0).axis_count(), 1);
    assert_eq!(GridOffset::new(1, 0, -1).axis_count(), 2);
    assert_eq!(GridOffset::new(-1, 1, 1).axis_count(), 3);
}

#[test]
fn coords_are_serializable() {
    let c = GridCoord::new(3, 4, 5);
    let json = serde_json::to_string(&c).unwrap();
    let back: GridCoord = serde_json::from_str(&json).unwrap();
    assert_eq!(c, back);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = JelloError::InvalidLattice("expected 8 points, got 7".into());
    assert!(err.to_string().contains("expected 8 points"));
}

#[test]
fn unknown_name_display() {
    let err = JelloError::UnknownName {
        kind: "preset",
        name: "lime".into(),
    };
    assert_eq!(err.to_string(), "Unknown preset: 'lime'");
}
