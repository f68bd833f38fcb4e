//! Unit tests for jv-geometry.

use jv_core::{AgentId, Frame, Point, TrajectoryRecord, TrajectoryTable};

use crate::{GeometryError, WalkableArea};

fn table(points: &[(f64, f64)]) -> TrajectoryTable {
    let records = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| TrajectoryRecord::new(AgentId(i as u32), Frame(0), x, y))
        .collect();
    TrajectoryTable::new(records).unwrap()
}

const SQUARE: &str = "POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0))";

// ── WKT ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wkt {
    use super::*;

    #[test]
    fn parse_closed_square() {
        let area = WalkableArea::from_wkt(SQUARE).unwrap();
        assert_eq!(area.exterior().len(), 4, "closing vertex is dropped");
        assert_eq!(area.exterior()[1], Point::new(10.0, 0.0));
        assert!(area.interiors().is_empty());
    }

    #[test]
    fn write_closes_ring() {
        let area = WalkableArea::from_wkt(SQUARE).unwrap();
        assert_eq!(area.to_wkt(), SQUARE);
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_open_ring() {
        let area = WalkableArea::from_wkt("polygon((0 0,4 0,4 3))").unwrap();
        assert_eq!(area.exterior().len(), 3);
    }

    #[test]
    fn parse_holes() {
        let area = WalkableArea::from_wkt(
            "POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 3 2, 3 3, 2 3, 2 2))",
        )
        .unwrap();
        assert_eq!(area.interiors().len(), 1);
        assert_eq!(area.interiors()[0][2], Point::new(3.0, 3.0));
        assert_eq!(
            area.to_wkt(),
            "POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 3 2, 3 3, 2 3, 2 2))"
        );
    }

    #[test]
    fn parse_drops_z() {
        let area = WalkableArea::from_wkt("POLYGON Z ((0 0 1, 5 0 1, 5 5 1, 0 0 1))").unwrap();
        assert_eq!(area.exterior()[2], Point::new(5.0, 5.0));
    }

    #[test]
    fn parse_scientific_and_negative() {
        let area = WalkableArea::from_wkt("POLYGON ((-1.5e1 -2, 3.25 -2, 3.25 .5))").unwrap();
        assert_eq!(area.exterior()[0], Point::new(-15.0, -2.0));
        assert_eq!(area.exterior()[2], Point::new(3.25, 0.5));
    }

    #[test]
    fn fractional_coordinates_round_trip_exactly() {
        let area = WalkableArea::new(vec![
            Point::new(0.1, 0.2),
            Point::new(1.0 / 3.0, -7.25),
            Point::new(123456.789, 2.0 / 3.0),
        ])
        .unwrap();
        assert_eq!(WalkableArea::from_wkt(&area.to_wkt()).unwrap(), area);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "POINT (1 2)",
            "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)))",
            "POLYGON EMPTY",
            "POLYGON Z EMPTY",
            "POLYGON ((0 0, 1 0, 0 0))",
            "POLYGON ((0 0, 1 0, 1 1, 0 0)",
            "POLYGON ((0 0, 1 0, 1 1, 0 0))) ",
            "POLYGON ((0 0, 1 0, 1 1, 0 0)) junk",
            "POLYGON ((0 0, 1, 1 1, 0 0))",
            "POLYGON ((0 0, 1 0, 1 x, 0 0))",
            "POLYGON ((0 0, 1 0, 1 1e, 0 0))",
            "POLYGON ((0 0, 1 0, 1 1; 0 0))",
        ] {
            let err = WalkableArea::from_wkt(bad).unwrap_err();
            assert!(matches!(err, GeometryError::Parse { .. }), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn from_str_and_display() {
        let area: WalkableArea = SQUARE.parse().unwrap();
        assert_eq!(area.to_string(), SQUARE);
    }

    #[test]
    fn bounds_cover_exterior() {
        let area = WalkableArea::from_wkt("POLYGON ((1 2, 7 -3, 4 9))").unwrap();
        let b = area.bounds();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (1.0, -3.0, 7.0, 9.0));
    }
}

// ── Option resolution ─────────────────────────────────────────────────────────

#[cfg(test)]
mod options {
    use std::io::Write;

    use jv_core::Resolution;

    use super::*;
    use crate::{geometry_from_options, read_wkt_file};

    #[test]
    fn neither_means_inferred() {
        assert!(geometry_from_options(None, None).unwrap().is_inferred());
    }

    #[test]
    fn inline_is_explicit() {
        let r = geometry_from_options(Some(SQUARE), None).unwrap();
        assert_eq!(r, Resolution::Explicit(WalkableArea::from_wkt(SQUARE).unwrap()));
    }

    #[test]
    fn both_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geo.wkt");
        std::fs::write(&path, SQUARE).unwrap();
        let err = geometry_from_options(Some(SQUARE), Some(path.as_path())).unwrap_err();
        assert!(matches!(err, GeometryError::ConflictingGeometry));
    }

    #[test]
    fn file_reads_first_line_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  {SQUARE}  ").unwrap();
        writeln!(file, "this line is ignored").unwrap();
        let area = read_wkt_file(file.path()).unwrap();
        assert_eq!(area.to_wkt(), SQUARE);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.wkt");
        let err = geometry_from_options(None, Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, GeometryError::Io { .. }));
    }

    #[test]
    fn empty_file_is_parse_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = read_wkt_file(file.path()).unwrap_err();
        assert!(matches!(err, GeometryError::Parse { .. }));
    }
}

// ── Inference ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod inference {
    use jv_core::Resolution;
    use proptest::prelude::*;

    use super::*;
    use crate::{BOUNDING_BOX_PADDING, infer_walkable_area, resolve_walkable_area};

    #[test]
    fn padded_box_vertex_order() {
        let area = infer_walkable_area(&table(&[(0.0, 0.0), (10.0, 5.0)])).unwrap();
        assert_eq!(area.to_wkt(), "POLYGON ((11 -1, 11 6, -1 6, -1 -1, 11 -1))");
    }

    #[test]
    fn single_point_still_has_area() {
        let area = infer_walkable_area(&table(&[(3.0, 4.0)])).unwrap();
        let b = area.bounds();
        assert_eq!(b.width(), 2.0 * BOUNDING_BOX_PADDING);
        assert_eq!(b.height(), 2.0 * BOUNDING_BOX_PADDING);
    }

    #[test]
    fn collinear_points_still_have_area() {
        let area = infer_walkable_area(&table(&[(0.0, 1.0), (5.0, 1.0), (9.0, 1.0)])).unwrap();
        assert!(area.bounds().height() > 0.0);
    }

    #[test]
    fn empty_table_cannot_be_inferred() {
        let err = infer_walkable_area(&TrajectoryTable::default()).unwrap_err();
        assert!(matches!(err, GeometryError::NoPositions));
    }

    #[test]
    fn explicit_area_is_kept() {
        let explicit = WalkableArea::from_wkt(SQUARE).unwrap();
        let resolved =
            resolve_walkable_area(&Resolution::Explicit(explicit.clone()), &table(&[(50.0, 50.0)]))
                .unwrap();
        assert_eq!(resolved, explicit);
    }

    proptest! {
        #[test]
        fn inferred_box_strictly_contains_points_with_unit_margin(
            points in prop::collection::vec((-1.0e4f64..1.0e4, -1.0e4f64..1.0e4), 1..40)
        ) {
            let t = table(&points);
            let area = infer_walkable_area(&t).unwrap();
            let tight = t.bounds().unwrap();
            let b = area.bounds();

            prop_assert_eq!(b.min_x, tight.min_x - 1.0);
            prop_assert_eq!(b.min_y, tight.min_y - 1.0);
            prop_assert_eq!(b.max_x, tight.max_x + 1.0);
            prop_assert_eq!(b.max_y, tight.max_y + 1.0);
            for r in &t {
                prop_assert!(b.contains_strictly(r.position()));
            }
        }
    }
}
