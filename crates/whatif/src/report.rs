//! Result reporting: terminal tables, column summaries, CSV export

use std::fmt;
use std::path::Path;

use serde::Serialize;

use whatif_core::ResultTable;

/// Descriptive statistics for one scalar result column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count  {}", self.count)?;
        writeln!(f, "mean   {:.4}", self.mean)?;
        writeln!(f, "std    {:.4}", self.std_dev)?;
        writeln!(f, "min    {:.4}", self.min)?;
        write!(f, "max    {:.4}", self.max)
    }
}

/// Summarize a scalar column. Returns `None` for an unknown column, a
/// column with non-scalar cells, or an empty table.
pub fn summarize(table: &ResultTable, column: &str) -> Option<ColumnSummary> {
    let values = table.scalar_column(column)?;
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std_dev = if count > 1 {
        let variance = values
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(ColumnSummary {
        count,
        mean,
        std_dev,
        min,
        max,
    })
}

/// Write the table as CSV, one record per row, with a header line
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use whatif_core::Value;

    fn sample_table() -> ResultTable {
        let mut table = ResultTable::new(vec!["x".to_string(), "y".to_string()]);
        table.push_row(vec![Value::Scalar(1.0), Value::Scalar(10.0)]);
        table.push_row(vec![Value::Scalar(2.0), Value::Scalar(20.0)]);
        table.push_row(vec![Value::Scalar(3.0), Value::Scalar(30.0)]);
        table
    }

    #[test]
    fn test_summary_statistics() {
        let summary = summarize(&sample_table(), "y").unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 30.0);
        assert!((summary.std_dev - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_column_is_none() {
        assert_eq!(summarize(&sample_table(), "z"), None);
    }

    #[test]
    fn test_csv_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        write_csv(&sample_table(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("x,y"));
        assert_eq!(lines.next(), Some("1,10"));
        assert_eq!(lines.count(), 2);
    }
}
