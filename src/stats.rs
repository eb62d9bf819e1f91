//! Descriptive statistics over one matrix row
//!
//! Missing entries (null or NaN) are dropped before computing; zero is a
//! legitimate value. The standard deviation is the sample estimate
//! (divisor n - 1), taken as 0 for a single remaining value.

use statrs::statistics::Statistics;

use crate::data::Cell;

/// Two-valued tag recording whether a row had missing entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFlag {
    Yes,
    No,
}

impl MissingFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingFlag::Yes => "Yes",
            MissingFlag::No => "No",
        }
    }
}

/// Statistics over the non-missing entries of a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptive {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Summary of one row: `None` stats when every entry was missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSummary {
    pub stats: Option<Descriptive>,
    pub has_missing: MissingFlag,
}

impl RowSummary {
    /// `[min, max, mean, std_dev, has_missing]`, with "NA" for unavailable stats
    pub fn to_cells(&self) -> [Cell; 5] {
        let flag = Cell::from(self.has_missing.as_str());
        match self.stats {
            Some(d) => [
                Cell::Number(d.min),
                Cell::Number(d.max),
                Cell::Number(d.mean),
                Cell::Number(d.std_dev),
                flag,
            ],
            None => [Cell::na(), Cell::na(), Cell::na(), Cell::na(), flag],
        }
    }
}

fn is_missing(value: &Option<f64>) -> bool {
    value.map_or(true, f64::is_nan)
}

/// Summarize a row of conditional values
pub fn summarize_row(raw_row: &[Option<f64>]) -> RowSummary {
    let present: Vec<f64> = raw_row.iter().filter_map(|v| v.filter(|x| !x.is_nan())).collect();
    let mut has_missing = if raw_row.iter().any(is_missing) {
        MissingFlag::Yes
    } else {
        MissingFlag::No
    };

    if present.is_empty() {
        has_missing = MissingFlag::Yes;
        return RowSummary {
            stats: None,
            has_missing,
        };
    }

    let std_dev = if present.len() == 1 {
        0.0
    } else {
        Statistics::std_dev(present.iter())
    };

    RowSummary {
        stats: Some(Descriptive {
            min: Statistics::min(present.iter()),
            max: Statistics::max(present.iter()),
            mean: Statistics::mean(present.iter()),
            std_dev,
        }),
        has_missing,
    }
}

/// Summarize a dense row, treating NaN as missing
pub fn summarize_values(values: &[f64]) -> RowSummary {
    let row: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    summarize_row(&row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable() -> [Cell; 5] {
        [Cell::na(), Cell::na(), Cell::na(), Cell::na(), Cell::from("Yes")]
    }

    #[test]
    fn test_empty_row() {
        assert_eq!(summarize_row(&[]).to_cells(), unavailable());
    }

    #[test]
    fn test_all_missing() {
        assert_eq!(summarize_row(&[Some(f64::NAN)]).to_cells(), unavailable());
        assert_eq!(summarize_row(&[None, None]).to_cells(), unavailable());
    }

    #[test]
    fn test_single_value() {
        let summary = summarize_row(&[Some(5.0)]);
        assert_eq!(
            summary.to_cells(),
            [
                Cell::Number(5.0),
                Cell::Number(5.0),
                Cell::Number(5.0),
                Cell::Number(0.0),
                Cell::from("No")
            ]
        );
    }

    #[test]
    fn test_sample_std_dev() {
        let summary = summarize_values(&[1.0, 2.0, 3.0]);
        let stats = summary.stats.unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
        assert_eq!(summary.has_missing, MissingFlag::No);
    }

    #[test]
    fn test_zero_is_not_missing() {
        let summary = summarize_row(&[Some(0.0), None, Some(4.0)]);
        let stats = summary.stats.unwrap();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.std_dev - 8.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.has_missing, MissingFlag::Yes);
    }
}
