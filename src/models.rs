//! Data models for review tables and analysis results
//!
//! This module contains all data structures used throughout the library,
//! including the in-memory table, load metadata, and the analysis report.

use serde::{Deserialize, Serialize};

/// Name of the numeric rating column every dataset must carry
pub const RATING_COLUMN: &str = "rating";
/// Name of the free-text review column every dataset must carry
pub const REVIEW_TEXT_COLUMN: &str = "review_text";
/// Name of the polarity column appended by sentiment annotation
pub const SENTIMENT_COLUMN: &str = "sentiment";

/// A single cell of a loaded table.
///
/// Column types are inferred at load time: a column whose non-empty cells all
/// parse as floating-point numbers becomes numeric, everything else stays text.
/// Empty cells are `Missing` regardless of column type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Numeric cell
    Number(f64),
    /// Text cell
    Text(String),
    /// Empty cell
    Missing,
}

impl Value {
    /// Numeric content of the cell, if it is a number
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text content of the cell, if it is text
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the cell the way the writer serializes it.
    ///
    /// Numbers with no fractional part print without a decimal point so a
    /// load/save cycle is byte-stable for typical integer ratings.
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Text(s) => s.clone(),
            Self::Missing => String::new(),
        }
    }
}

/// An in-memory review table: one header row plus ordered data rows.
///
/// Rows are never deleted or reordered after load; annotation only appends
/// (or overwrites) the sentiment column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewTable {
    /// Column names, in file order
    pub headers: Vec<String>,
    /// Data rows; every row has exactly `headers.len()` cells
    pub rows: Vec<Vec<Value>>,
}

impl ReviewTable {
    /// Index of a column by name
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True once the sentiment column has been appended by annotation
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.column_index(SENTIMENT_COLUMN).is_some()
    }
}

/// Metadata captured when a file is loaded, reset wholesale on each load
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadMetadata {
    /// Byte size of the source file at load time
    pub original_byte_size: u64,
    /// Number of data rows parsed
    pub row_count: usize,
    /// Number of columns parsed
    pub column_count: usize,
}

/// A token and how many times it occurred in a sentiment bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    /// The whitespace-delimited token, exactly as it appeared
    pub token: String,
    /// Occurrences across all rows in the bucket
    pub count: usize,
}

/// Results of one full analysis pass.
///
/// Recomputed from scratch on every `analyze` call; never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Mean of the rating column, missing values excluded (NaN if all missing)
    pub average_rating: f64,
    /// Top keywords from rows with strictly positive sentiment, count-descending
    pub positive_keywords: Vec<KeywordCount>,
    /// Top keywords from rows with strictly negative sentiment, count-descending
    pub negative_keywords: Vec<KeywordCount>,
    /// Percentage difference between the original file size and the re-serialized size
    pub size_reduction_percent: f64,
    /// Mean Jaccard similarity of token sets between consecutive reviews
    pub similarity_index: f64,
}
