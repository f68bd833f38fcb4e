//! Legacy trajectory text loader.
//!
//! # jpsvis format
//!
//! One record per line, whitespace separated, `#` comments.  Only the first
//! four columns are read; anything after them is ignored.
//!
//! ```text
//! #framerate: 8
//! #ID  FR  X     Y     Z
//! 1    0   1.20  3.40  0.00
//! 1    1   1.25  3.42  0.00
//! 2    0   4.00  0.50  0.00
//! ```
//!
//! Parsing is all-or-nothing: the first malformed line fails the whole file
//! with its line number.  Comma separated files go through the `csv` reader,
//! so quoted fields are accepted.  Records come back sorted by `(agent_id, frame)`;
//! a repeated `(agent_id, frame)` pair is reported at the later line.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use jv_core::{AgentId, CoreError, Frame, TrajectoryRecord, TrajectoryTable};

use crate::format::{Delimiter, TxtFormat};
use crate::header::TxtMetadata;
use crate::{TxtError, TxtResult};

/// Result of loading one file.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedTrajectory {
    /// Records in meters, sorted by `(agent_id, frame)`.
    pub table:    TrajectoryTable,
    pub metadata: TxtMetadata,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a trajectory text file.
pub fn load_trajectory_txt(path: &Path, format: &TxtFormat) -> TxtResult<ParsedTrajectory> {
    let file = std::fs::File::open(path).map_err(|source| TxtError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_trajectory_reader(file, path, format)
}

/// Like [`load_trajectory_txt`] but accepts any `Read` source.
///
/// `origin` only labels errors; nothing is opened through it.
pub fn load_trajectory_reader<R: Read>(
    mut reader: R,
    origin:     &Path,
    format:     &TxtFormat,
) -> TxtResult<ParsedTrajectory> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| TxtError::Io { path: origin.to_path_buf(), source })?;

    // ── Header ────────────────────────────────────────────────────────────
    let mut metadata = TxtMetadata::default();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(comment) = line.strip_prefix(format.comment) else {
            break;
        };
        metadata
            .scan(comment)
            .map_err(|reason| parse_error(origin, idx + 1, reason))?;
    }

    // ── Data rows ─────────────────────────────────────────────────────────
    // (line number, trimmed text) of every non-blank, non-comment line.
    let data_lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(format.comment))
        .collect();

    let mut rows = RowCollector::new(origin, format);
    match format.delimiter {
        Delimiter::Whitespace => {
            for &(line_no, line) in &data_lines {
                let fields: Vec<&str> = line.split_whitespace().collect();
                rows.push(line_no, &fields)?;
            }
        }
        Delimiter::Comma => {
            // One record per data line; numeric rows never span lines.
            let joined = data_lines.iter().map(|&(_, line)| line).collect::<Vec<_>>().join("\n");
            let mut csv_reader = ReaderBuilder::new()
                .delimiter(b',')
                .has_headers(false)
                .flexible(true)
                .trim(Trim::All)
                .from_reader(joined.as_bytes());

            for (idx, result) in csv_reader.records().enumerate() {
                let line_no = data_lines.get(idx).map_or(text.lines().count(), |&(n, _)| n);
                let record = result.map_err(|e| parse_error(origin, line_no, e.to_string()))?;
                let fields: Vec<&str> = record.iter().collect();
                rows.push(line_no, &fields)?;
            }
        }
    }
    let RowCollector { mut records, line_of, times, .. } = rows;

    let Some(&last_line) = line_of.last() else {
        return Err(TxtError::EmptyTrajectory { path: origin.to_path_buf() });
    };

    // ── Normalize ─────────────────────────────────────────────────────────
    let unit = metadata.unit.unwrap_or(format.default_unit);
    let scale = unit.meters_per_unit();
    if scale != 1.0 {
        for r in &mut records {
            r.x *= scale;
            r.y *= scale;
        }
    }

    metadata.seconds_per_tick = match metadata.frame_rate {
        Some(fps) => Some(1.0 / fps),
        None if !times.is_empty() => median_seconds_per_tick(&records, &times),
        None => None,
    };

    let table = TrajectoryTable::new(records).map_err(|e| match e {
        CoreError::DuplicateFrame { agent, frame, index } => {
            parse_error(origin, line_of[index], format!("duplicate {frame} for {agent}"))
        }
        other => parse_error(origin, last_line, other.to_string()),
    })?;

    debug!(
        path = %origin.display(),
        records = table.len(),
        agents = table.agent_count(),
        ?unit,
        frame_rate = ?metadata.frame_rate,
        "parsed trajectory text"
    );

    Ok(ParsedTrajectory { table, metadata })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_error(origin: &Path, line: usize, reason: String) -> TxtError {
    TxtError::Parse { path: origin.to_path_buf(), line, reason }
}

/// Accumulates data rows in file order, remembering each record's line.
struct RowCollector<'a> {
    origin:         &'a Path,
    format:         &'a TxtFormat,
    header_pending: bool,
    records:        Vec<TrajectoryRecord>,
    line_of:        Vec<usize>,
    times:          Vec<f64>,
}

impl<'a> RowCollector<'a> {
    fn new(origin: &'a Path, format: &'a TxtFormat) -> Self {
        Self {
            origin,
            format,
            header_pending: format.header_row,
            records: Vec::new(),
            line_of: Vec::new(),
            times: Vec::new(),
        }
    }

    fn push(&mut self, line: usize, fields: &[&str]) -> TxtResult<()> {
        if self.header_pending {
            self.header_pending = false;
            let is_column_names = fields
                .get(self.format.layout.agent_id)
                .is_some_and(|f| f.parse::<u32>().is_err());
            if is_column_names {
                return Ok(());
            }
        }

        let row = parse_row(fields, self.format)
            .map_err(|reason| parse_error(self.origin, line, reason))?;
        self.records.push(row.record);
        self.line_of.push(line);
        self.times.extend(row.time);
        Ok(())
    }
}

struct Row {
    record: TrajectoryRecord,
    time:   Option<f64>,
}

fn parse_row(fields: &[&str], format: &TxtFormat) -> Result<Row, String> {
    let layout = &format.layout;
    let needed = layout.min_fields();
    if fields.len() < needed {
        return Err(format!("expected at least {needed} fields, found {}", fields.len()));
    }

    let agent_id = fields[layout.agent_id]
        .parse::<u32>()
        .map_err(|_| format!("invalid agent id {:?}", fields[layout.agent_id]))?;
    let frame = fields[layout.frame]
        .parse::<u32>()
        .map_err(|_| format!("invalid frame {:?}", fields[layout.frame]))?;
    let x = parse_finite(fields[layout.x], "x")?;
    let y = parse_finite(fields[layout.y], "y")?;
    let time = layout
        .time
        .map(|col| parse_finite(fields[col], "time"))
        .transpose()?;

    Ok(Row {
        record: TrajectoryRecord::new(AgentId(agent_id), Frame(frame), x, y),
        time,
    })
}

fn parse_finite(field: &str, what: &str) -> Result<f64, String> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("invalid {what} value {field:?}")),
    }
}

/// Median of `Δtime / Δframe` over consecutive records of each agent.
///
/// `times[i]` belongs to `records[i]`; neither needs to be sorted.
fn median_seconds_per_tick(records: &[TrajectoryRecord], times: &[f64]) -> Option<f64> {
    let mut samples: Vec<(AgentId, Frame, f64)> = records
        .iter()
        .zip(times)
        .map(|(r, &t)| (r.agent_id, r.frame, t))
        .collect();
    samples.sort_by_key(|&(agent, frame, _)| (agent, frame));

    let mut ratios: Vec<f64> = samples
        .windows(2)
        .filter(|w| w[0].0 == w[1].0 && w[1].1 > w[0].1)
        .map(|w| (w[1].2 - w[0].2) / f64::from(w[1].1.since(w[0].1)))
        .filter(|r| r.is_finite() && *r > 0.0)
        .collect();
    if ratios.is_empty() {
        return None;
    }

    ratios.sort_by(f64::total_cmp);
    let mid = ratios.len() / 2;
    Some(if ratios.len() % 2 == 0 {
        (ratios[mid - 1] + ratios[mid]) / 2.0
    } else {
        ratios[mid]
    })
}
