//! Unit tests for jv-txt.

use std::io::Cursor;
use std::path::Path;

use jv_core::{AgentId, Frame};

use crate::{
    ColumnLayout, Delimiter, LengthUnit, ParsedTrajectory, TxtError, TxtFormat, TxtResult,
    load_trajectory_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load(text: &str) -> TxtResult<ParsedTrajectory> {
    load_with(text, &TxtFormat::JPSVIS)
}

fn load_with(text: &str, format: &TxtFormat) -> TxtResult<ParsedTrajectory> {
    load_trajectory_reader(Cursor::new(text), Path::new("test.txt"), format)
}

/// Header + three agents in the layout jpscore writes.
const JPSVIS_SAMPLE: &str = "\
#description: jpscore (0.8.4)
#agents: 3
#framerate: 16.00
#ID: the agent ID
#FR: the current frame
#X,Y,Z: the agents coordinates (in metres)

#ID\tFR\tX\tY\tZ\tA\tB\tANGLE\tCOLOR
1\t0\t1.00\t2.00\t0.00\t0.2\t0.2\t0.0\t220
2\t0\t4.00\t1.00\t0.00\t0.2\t0.2\t0.0\t220
1\t1\t1.10\t2.05\t0.00\t0.2\t0.2\t0.0\t220
2\t1\t4.10\t1.00\t0.00\t0.2\t0.2\t0.0\t220
3\t1\t0.00\t0.00\t0.00\t0.2\t0.2\t0.0\t220
";

fn parse_error_line(err: TxtError) -> usize {
    match err {
        TxtError::Parse { line, .. } => line,
        other => panic!("expected parse error, got {other}"),
    }
}

// ── jpsvis layout ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod jpsvis {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn sample_is_sorted_by_agent_then_frame() {
        let parsed = load(JPSVIS_SAMPLE).unwrap();
        let keys: Vec<(u32, u32)> =
            parsed.table.iter().map(|r| (r.agent_id.0, r.frame.0)).collect();
        assert_eq!(keys, vec![(1, 0), (1, 1), (2, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn coordinates_are_preserved() {
        let parsed = load(JPSVIS_SAMPLE).unwrap();
        let r = parsed.table.records()[1];
        assert_eq!((r.agent_id, r.frame), (AgentId(1), Frame(1)));
        assert_eq!(r.x, 1.10);
        assert_eq!(r.y, 2.05);
    }

    #[test]
    fn header_metadata() {
        let parsed = load(JPSVIS_SAMPLE).unwrap();
        assert_eq!(parsed.metadata.frame_rate, Some(16.0));
        assert_eq!(parsed.metadata.unit, Some(LengthUnit::Meter));
        assert_relative_eq!(parsed.metadata.seconds_per_tick.unwrap(), 1.0 / 16.0);
    }

    #[test]
    fn no_header_means_no_time_base() {
        let parsed = load("1 0 0.0 0.0\n1 1 0.5 0.0\n").unwrap();
        assert_eq!(parsed.metadata.frame_rate, None);
        assert_eq!(parsed.metadata.seconds_per_tick, None);
    }

    #[test]
    fn centimeters_are_scaled_to_meters() {
        let parsed = load("# x/cm y/cm\n1 0 150 -20\n").unwrap();
        let r = parsed.table.records()[0];
        assert_relative_eq!(r.x, 1.5);
        assert_relative_eq!(r.y, -0.2);
    }

    #[test]
    fn framerate_without_colon() {
        let parsed = load("#framerate 10\n1 0 0 0\n").unwrap();
        assert_eq!(parsed.metadata.frame_rate, Some(10.0));
    }

    #[test]
    fn bad_framerate_is_parse_error_on_its_line() {
        let err = load("#agents: 1\n#framerate: 0\n1 0 0 0\n").unwrap_err();
        assert_eq!(parse_error_line(err), 2);

        let err = load("#framerate: -4 fps\n1 0 0 0\n").unwrap_err();
        assert_eq!(parse_error_line(err), 1);

        let err = load("#framerate: inf\n1 0 0 0\n").unwrap_err();
        assert_eq!(parse_error_line(err), 1);
    }

    #[test]
    fn framerate_without_number_is_ignored() {
        let parsed = load("#framerate: unknown\n1 0 0 0\n").unwrap();
        assert_eq!(parsed.metadata.frame_rate, None);
    }

    #[test]
    fn petrack_header() {
        let text = "# framerate: 25 fps\n# id frame x/cm y/cm z/cm\n1 0 100 200 0\n1 1 110 200 0\n";
        let parsed = load(text).unwrap();
        assert_eq!(parsed.metadata.frame_rate, Some(25.0));
        assert_eq!(parsed.metadata.unit, Some(LengthUnit::Centimeter));
        assert_relative_eq!(parsed.metadata.seconds_per_tick.unwrap(), 0.04);

        let r = parsed.table.records()[1];
        assert_relative_eq!(r.x, 1.1);
        assert_relative_eq!(r.y, 2.0);
    }

    #[test]
    fn framerate_must_be_the_key() {
        let text = "#description: framerate study\n#framerates are listed below\n1 0 0 0\n";
        let parsed = load(text).unwrap();
        assert_eq!(parsed.metadata.frame_rate, None);
    }

    #[test]
    fn comments_after_data_are_not_header() {
        let parsed = load("#framerate: 8\n1 0 0 0\n#framerate: 0\n# x/cm\n1 1 1 0\n").unwrap();
        assert_eq!(parsed.metadata.frame_rate, Some(8.0));
        assert_eq!(parsed.metadata.unit, None);
        assert_eq!(parsed.table.records()[1].x, 1.0);
    }

    #[test]
    fn extra_spaces_and_blank_lines() {
        let parsed = load("\n   1   0    2.5   3.5  \n\n  # trailing comment\n").unwrap();
        assert_eq!(parsed.table.len(), 1);
        assert_eq!(parsed.table.records()[0].x, 2.5);
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn too_few_fields() {
        let err = load("1 0 0.0 0.0\n1 1 0.5\n").unwrap_err();
        assert_eq!(parse_error_line(err), 2);
    }

    #[test]
    fn non_numeric_fields() {
        for (text, line) in [
            ("x 0 0.0 0.0\n", 1),
            ("1 0 0 0\n1 one 0.0 0.0\n", 2),
            ("1 0 0 0\n\n1 1 abc 0.0\n", 3),
            ("1 0 0.0 NaN\n", 1),
            ("1 0 inf 0.0\n", 1),
            ("-1 0 0.0 0.0\n", 1),
            ("1 2.5 0.0 0.0\n", 1),
        ] {
            let err = load(text).unwrap_err();
            assert_eq!(parse_error_line(err), line, "{text:?}");
        }
    }

    #[test]
    fn duplicate_frame_references_later_line() {
        let text = "#framerate: 8\n1 0 0 0\n1 1 0 0\n2 0 5 5\n1 1 9 9\n";
        let err = load(text).unwrap_err();
        let msg = err.to_string();
        assert_eq!(parse_error_line(err), 5);
        assert!(msg.contains("duplicate frame 1 for agent 1"), "{msg}");
        assert!(msg.starts_with("test.txt:5:"), "{msg}");
    }

    #[test]
    fn comments_only_is_empty() {
        let err = load("#framerate: 8\n# nothing else\n").unwrap_err();
        assert!(matches!(err, TxtError::EmptyTrajectory { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = crate::load_trajectory_txt(&dir.path().join("absent.txt"), &TxtFormat::JPSVIS)
            .unwrap_err();
        assert!(matches!(err, TxtError::Io { .. }));
    }
}

// ── Other layouts ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod layouts {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn csv_with_column_names() {
        let text = "id,frame,x,y\n1,0,0.5,1.5\n1,1,0.6,1.5\n";
        let parsed = load_with(text, &TxtFormat::CSV).unwrap();
        assert_eq!(parsed.table.len(), 2);
        assert_eq!(parsed.table.records()[0].x, 0.5);
    }

    #[test]
    fn csv_without_column_names() {
        let parsed = load_with("1, 0, 0.5, 1.5\n", &TxtFormat::CSV).unwrap();
        assert_eq!(parsed.table.records()[0].y, 1.5);
    }

    #[test]
    fn column_names_are_not_skipped_for_jpsvis() {
        let err = load("ID FR X Y\n1 0 0 0\n").unwrap_err();
        assert_eq!(parse_error_line(err), 1);
    }

    #[test]
    fn reordered_layout_with_time_column() {
        // frame, time, id, x, y — one sample every 2 ticks, 0.05 s apart.
        let format = TxtFormat {
            delimiter: Delimiter::Comma,
            layout: ColumnLayout { agent_id: 2, frame: 0, x: 3, y: 4, time: Some(1) },
            header_row: false,
            ..TxtFormat::CSV
        };
        let text = "0,0.00,7,1,1\n2,0.05,7,2,1\n4,0.10,7,3,1\n";
        let parsed = load_with(text, &format).unwrap();
        assert_eq!(parsed.table.records()[2].frame, Frame(4));
        assert_eq!(parsed.table.records()[2].agent_id, AgentId(7));
        assert_relative_eq!(parsed.metadata.seconds_per_tick.unwrap(), 0.025, epsilon = 1e-12);
    }

    #[test]
    fn header_framerate_beats_time_column() {
        let format = TxtFormat {
            layout: ColumnLayout { time: Some(4), ..ColumnLayout::ID_FRAME_X_Y },
            ..TxtFormat::JPSVIS
        };
        let parsed = load_with("#framerate: 4\n1 0 0 0 0.0\n1 1 0 0 1.0\n", &format).unwrap();
        assert_relative_eq!(parsed.metadata.seconds_per_tick.unwrap(), 0.25);
    }

    #[test]
    fn min_fields_follows_layout() {
        assert_eq!(ColumnLayout::ID_FRAME_X_Y.min_fields(), 4);
        let wide = ColumnLayout { time: Some(6), ..ColumnLayout::ID_FRAME_X_Y };
        assert_eq!(wide.min_fields(), 7);
    }

    #[test]
    fn whitespace_delimiter_mixes_tabs_and_spaces() {
        let parsed = load("1 \t 0\t\t2.5  3.5\n").unwrap();
        assert_eq!(parsed.table.records()[0].y, 3.5);
    }

    #[test]
    fn csv_quoted_fields() {
        let text = "# x/cm\n\"id\",\"frame\",\"x\",\"y\"\n1,0,\"150\", 20\n";
        let parsed = load_with(text, &TxtFormat::CSV).unwrap();
        let r = parsed.table.records()[0];
        assert_relative_eq!(r.x, 1.5);
        assert_relative_eq!(r.y, 0.2);
    }

    #[test]
    fn csv_error_reports_source_line() {
        let text = "#framerate: 4\n\nid,frame,x,y\n  # note\n1,0,0,0\n\n1,1,oops,0\n";
        let err = load_with(text, &TxtFormat::CSV).unwrap_err();
        assert_eq!(parse_error_line(err), 7);
    }

    #[test]
    fn csv_duplicate_reports_later_line() {
        let text = "id,frame,x,y\n1,0,0,0\n# gap\n1,0,1,1\n";
        let err = load_with(text, &TxtFormat::CSV).unwrap_err();
        assert_eq!(parse_error_line(err), 4);
    }
}
