//! Learning-history log parsing
//!
//! SPLConqueror writes one log per learning run. The region between the
//! `command: analyze-learning` line and the `Analyze finished` line holds a
//! table of every candidate model the learner evaluated: a comma-separated
//! header, two banner rows, then one semicolon-separated data row per
//! candidate. [`parse_learning_log`] extracts that table, picks the
//! candidate with the smallest validation error and parses it into an
//! [`InfluenceModel`], alongside the run's elapsed time and the tool's
//! large-deviation warning.

use crate::error::{Error, Result};
use crate::influence::InfluenceModel;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const ANALYZE_BEGIN: &str = "command: analyze-learning";
const ANALYZE_END: &str = "Analyze finished";
const ELAPSED_KEY: &str = "Elapsed=";
const DEVIATION_KEY: &str = "large deviation:";

/// Banner rows between the table header and the first data row
const BANNER_ROWS: usize = 2;

/// One candidate-model row, column header mapped to its raw cell value
pub type HistoryRow = HashMap<String, String>;

/// The parsed outcome of a learning run
#[derive(Debug, Clone)]
pub struct LearningLog {
    /// The candidate with the smallest `ValidationError`
    pub model: InfluenceModel,

    /// Every candidate the learner evaluated, in log order
    pub history: Vec<HistoryRow>,

    /// Total learner run time in seconds
    pub elapsed_seconds: f64,

    /// Configurations the learner flagged as badly predicted; empty when
    /// the log carries no such warning
    pub large_deviation: String,
}

/// Parse the raw text of a learning log
///
/// Fails with [`Error::MalformedLog`] when the analyze markers, the model
/// table or the elapsed-time line are missing, and with
/// [`Error::ModelParse`] when a `ValidationError` or `Model` cell does not
/// follow the learner's grammar.
pub fn parse_learning_log(log: &str) -> Result<LearningLog> {
    let lines: Vec<&str> = log.lines().collect();

    let begin = find_marker(&lines, 0, ANALYZE_BEGIN)?;
    let end = find_marker(&lines, begin + 1, ANALYZE_END)?;
    let table = &lines[begin + 1..end];

    let history = parse_history(table);
    log::debug!("parsed {} candidate models", history.len());

    let best = best_row(&history)?;
    let model_field = best
        .get("Model")
        .ok_or_else(|| Error::MalformedLog("model table has no Model column".into()))?;
    let model: InfluenceModel = model_field.parse()?;

    Ok(LearningLog {
        model,
        history,
        elapsed_seconds: parse_elapsed(log)?,
        large_deviation: parse_large_deviation(&lines),
    })
}

fn find_marker(lines: &[&str], from: usize, marker: &str) -> Result<usize> {
    lines[from..]
        .iter()
        .position(|line| line.trim_end() == marker)
        .map(|offset| from + offset)
        .ok_or_else(|| Error::MalformedLog(format!("missing `{}` marker", marker)))
}

/// Zip each data row positionally against the table header
///
/// The first table line is the header; the two banner rows after it carry
/// no data and are skipped. Surplus cells beyond the header are dropped.
fn parse_history(table: &[&str]) -> Vec<HistoryRow> {
    let Some(header_line) = table.first() else {
        return Vec::new();
    };
    let header: Vec<&str> = header_line.split(',').map(str::trim).collect();

    table
        .iter()
        .skip(1 + BANNER_ROWS)
        .map(|row| {
            header
                .iter()
                .zip(row.split(';'))
                .map(|(column, value)| ((*column).to_string(), value.to_string()))
                .collect()
        })
        .collect()
}

/// The row with the numerically smallest `ValidationError`; the earliest
/// row wins ties
fn best_row(history: &[HistoryRow]) -> Result<&HistoryRow> {
    let mut best: Option<(f64, &HistoryRow)> = None;
    for row in history {
        let error = row
            .get("ValidationError")
            .ok_or_else(|| Error::MalformedLog("model table has no ValidationError column".into()))?;
        let error: f64 = error.trim().parse().map_err(|_| {
            Error::ModelParse(format!("invalid validation error: `{}`", error.trim()))
        })?;
        if best.is_none_or(|(lowest, _)| error < lowest) {
            best = Some((error, row));
        }
    }
    best.map(|(_, row)| row)
        .ok_or_else(|| Error::MalformedLog("model table holds no candidate models".into()))
}

fn elapsed_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Elapsed=(\d+):(\d+):(\d+(?:\.\d+)?)").expect("hard-coded pattern")
    })
}

/// Total seconds of the `Elapsed=HH:MM:SS(.fraction)` line
fn parse_elapsed(log: &str) -> Result<f64> {
    let caps = elapsed_pattern()
        .captures(log)
        .ok_or_else(|| Error::MalformedLog(format!("missing `{}` line", ELAPSED_KEY)))?;
    let field = |i: usize| -> Result<f64> {
        caps[i]
            .parse()
            .map_err(|_| Error::MalformedLog(format!("invalid elapsed time: `{}`", &caps[0])))
    };
    Ok(field(1)? * 3600.0 + field(2)? * 60.0 + field(3)?)
}

/// Suffix of the large-deviation warning line, after its first `:`
fn parse_large_deviation(lines: &[&str]) -> String {
    lines
        .iter()
        .find(|line| line.contains(DEVIATION_KEY))
        .and_then(|line| line.splitn(2, ':').nth(1))
        .map(|suffix| suffix.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::influence::Term;

    const LOG: &str = "\
solver microsoft
command: analyze-learning
Model,ValidationError
--banner--
--banner--
2.0 * A;0.3
1.0 * A + 0.5 * B;0.2
Analyze finished
Elapsed=00:01:30
Configurations with large deviation: confA, confB
";

    #[test]
    fn test_parse_full_log() {
        let parsed = parse_learning_log(LOG).unwrap();
        assert_eq!(parsed.history.len(), 2);
        assert_eq!(parsed.history[0]["Model"], "2.0 * A");
        assert_eq!(parsed.history[0]["ValidationError"], "0.3");
        assert_eq!(parsed.elapsed_seconds, 90.0);
        assert_eq!(parsed.large_deviation, "confA, confB");

        // second row has the smaller validation error
        assert_eq!(
            parsed.model.terms(),
            [
                Term {
                    coefficient: 1.0,
                    options: vec!["A".into()],
                },
                Term {
                    coefficient: 0.5,
                    options: vec!["B".into()],
                },
            ]
        );
    }

    #[test]
    fn test_single_row_example() {
        let log = "command: analyze-learning\nModel,ValidationError\nx\ny\n2.0 * A;0.3\nAnalyze finished\nElapsed=00:00:01\n";
        let parsed = parse_learning_log(log).unwrap();
        assert_eq!(parsed.history.len(), 1);
        assert_eq!(
            parsed.model.terms(),
            [Term {
                coefficient: 2.0,
                options: vec!["A".into()],
            }]
        );
        assert_eq!(parsed.large_deviation, "");
    }

    #[test]
    fn test_tie_break_keeps_earlier_row() {
        let log = "command: analyze-learning\nModel,ValidationError\nx\ny\n1.0 * A;0.5\n2.0 * A;0.5\nAnalyze finished\nElapsed=00:00:01\n";
        let parsed = parse_learning_log(log).unwrap();
        assert_eq!(parsed.model.terms()[0].coefficient, 1.0);
    }

    #[test]
    fn test_missing_begin_marker() {
        let err = parse_learning_log("Analyze finished\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLog(m) if m.contains(ANALYZE_BEGIN)));
    }

    #[test]
    fn test_missing_end_marker() {
        let err = parse_learning_log("command: analyze-learning\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLog(m) if m.contains(ANALYZE_END)));
    }

    #[test]
    fn test_empty_table() {
        let log = "command: analyze-learning\nModel,ValidationError\nx\ny\nAnalyze finished\n";
        let err = parse_learning_log(log).unwrap_err();
        assert!(matches!(err, Error::MalformedLog(_)));
    }

    #[test]
    fn test_non_numeric_validation_error() {
        let log = "command: analyze-learning\nModel,ValidationError\nx\ny\n2.0 * A;bogus\nAnalyze finished\n";
        let err = parse_learning_log(log).unwrap_err();
        assert!(matches!(err, Error::ModelParse(m) if m.contains("bogus")));
    }

    #[test]
    fn test_elapsed_with_fraction() {
        let log = "command: analyze-learning\nModel,ValidationError\nx\ny\n2.0 * A;0.3\nAnalyze finished\nsome prefix Elapsed=01:02:03.5 trailing\n";
        let parsed = parse_learning_log(log).unwrap();
        assert_eq!(parsed.elapsed_seconds, 3723.5);
    }

    #[test]
    fn test_missing_elapsed() {
        let log = "command: analyze-learning\nModel,ValidationError\nx\ny\n2.0 * A;0.3\nAnalyze finished\n";
        let err = parse_learning_log(log).unwrap_err();
        assert!(matches!(err, Error::MalformedLog(m) if m.contains("Elapsed")));
    }

    #[test]
    fn test_history_keeps_extra_columns() {
        let log = "command: analyze-learning\nModel,ValidationError,Rounds\nx\ny\n2.0 * A;0.3;17\nAnalyze finished\nElapsed=00:00:01\n";
        let parsed = parse_learning_log(log).unwrap();
        assert_eq!(parsed.history[0]["Rounds"], "17");
    }
}
