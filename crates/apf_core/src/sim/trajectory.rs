//! Step-by-step record of a run, exportable as JSON or CSV.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::geometry::Position;
use crate::robot::MoveOutcome;

/// One simulation step as observed by the driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// 1-based step number
    pub step: usize,
    pub from: Position,
    pub outcome: MoveOutcome,
    /// Position after the step
    pub position: Position,
    pub distance_to_goal: f64,
    /// Total potential at `position`
    pub total_cost: f64,
}

/// Flat CSV row; the csv writer does not support nested structs.
#[derive(Debug, Serialize)]
struct CsvRow {
    step: usize,
    from_x: f64,
    from_y: f64,
    status: &'static str,
    candidate_index: Option<usize>,
    x: f64,
    y: f64,
    distance_to_goal: f64,
    total_cost: f64,
}

impl From<&StepRecord> for CsvRow {
    fn from(r: &StepRecord) -> Self {
        Self {
            step: r.step,
            from_x: r.from.x,
            from_y: r.from.y,
            status: if r.outcome.is_moved() { "moved" } else { "no_improving_candidate" },
            candidate_index: r.outcome.candidate_index(),
            x: r.position.x,
            y: r.position.y,
            distance_to_goal: r.distance_to_goal,
            total_cost: r.total_cost,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    pub start: Position,
    pub steps: Vec<StepRecord>,
}

impl Trajectory {
    pub fn new(start: Position) -> Self {
        Self { start, steps: Vec::new() }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Start followed by the position after every step.
    pub fn positions(&self) -> Vec<Position> {
        std::iter::once(self.start).chain(self.steps.iter().map(|r| r.position)).collect()
    }

    /// Steps that ended without a move.
    pub fn stalls(&self) -> usize {
        self.steps.iter().filter(|r| !r.outcome.is_moved()).count()
    }

    /// Sum of the distances actually travelled.
    pub fn path_length(&self) -> f64 {
        self.steps.iter().map(|r| r.from.distance_to(&r.position)).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.steps {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory {
        let mut t = Trajectory::new(Position::new(0.0, 0.0));
        t.push(StepRecord {
            step: 1,
            from: Position::new(0.0, 0.0),
            outcome: MoveOutcome::Moved { position: Position::new(0.8, 0.0), candidate_index: 59 },
            position: Position::new(0.8, 0.0),
            distance_to_goal: 9.2,
            total_cost: -0.01,
        });
        t.push(StepRecord {
            step: 2,
            from: Position::new(0.8, 0.0),
            outcome: MoveOutcome::NoImprovingCandidate,
            position: Position::new(0.8, 0.0),
            distance_to_goal: 9.2,
            total_cost: -0.01,
        });
        t
    }

    #[test]
    fn test_summary_values() {
        let t = sample();
        assert_eq!(t.len(), 2);
        assert_eq!(t.stalls(), 1);
        assert!((t.path_length() - 0.8).abs() < 1e-12);
        assert_eq!(
            t.positions(),
            vec![Position::new(0.0, 0.0), Position::new(0.8, 0.0), Position::new(0.8, 0.0)]
        );
    }

    #[test]
    fn test_json_tags_outcome() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["steps"][0]["outcome"]["status"], "moved");
        assert_eq!(json["steps"][0]["outcome"]["candidate_index"], 59);
        assert_eq!(json["steps"][1]["outcome"]["status"], "no_improving_candidate");
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        sample().write_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "step,from_x,from_y,status,candidate_index,x,y,distance_to_goal,total_cost"
        );
        assert!(lines.next().unwrap().starts_with("1,0.0,0.0,moved,59,0.8,"));
        assert!(lines.next().unwrap().starts_with("2,0.8,0.0,no_improving_candidate,,0.8,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_json_file_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        sample().write_json(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["steps"].as_array().unwrap().len(), 2);
        assert_eq!(json["start"]["x"], 0.0);
    }
}
