//! Session orchestration for the load / analyze / save operations.
//!
//! A [`ReviewSession`] owns at most one loaded table at a time, plus the
//! metadata captured when it was loaded. The "no table loaded" state is
//! explicit: `analyze` and `save` return [`ReviewLensError::NoTableLoaded`]
//! instead of guessing.

use crate::analysis;
use crate::error::{ReviewLensError, Result};
use crate::models::{AnalysisReport, LoadMetadata, ReviewTable};
use crate::sentiment::{LexiconScorer, SentimentScorer};
use crate::table;
use std::path::Path;
use tracing::{debug, info};

/// Default number of keywords reported per sentiment bucket
pub const DEFAULT_TOP_N: usize = 5;

/// One interactive analysis session over a single review dataset.
pub struct ReviewSession {
    scorer: Box<dyn SentimentScorer>,
    state: Option<SessionState>,
}

struct SessionState {
    table: ReviewTable,
    metadata: LoadMetadata,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new(Box::new(LexiconScorer::new()))
    }
}

impl ReviewSession {
    /// Create a session with an injected sentiment scorer.
    ///
    /// Tests pass a deterministic stub here; `Default` wires in the built-in
    /// [`LexiconScorer`].
    #[must_use]
    pub fn new(scorer: Box<dyn SentimentScorer>) -> Self {
        Self {
            scorer,
            state: None,
        }
    }

    /// True once a table has been loaded
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// The currently loaded table, if any
    #[must_use]
    pub fn table(&self) -> Option<&ReviewTable> {
        self.state.as_ref().map(|s| &s.table)
    }

    /// Load a CSV file, replacing any previously loaded table and metadata.
    pub fn load(&mut self, path: &Path) -> Result<LoadMetadata> {
        let (table, metadata) = table::load_table(path)?;
        info!(
            path = %path.display(),
            rows = metadata.row_count,
            columns = metadata.column_count,
            bytes = metadata.original_byte_size,
            "Review data loaded"
        );
        self.state = Some(SessionState { table, metadata });
        Ok(metadata)
    }

    /// Run the full analysis pipeline and return a fresh report.
    ///
    /// Annotates the table with a `sentiment` column as a side effect
    /// (overwritten on re-analysis). The serialized size is captured before
    /// annotation so the size-reduction figure compares like with like.
    pub fn analyze(&mut self, top_n: usize) -> Result<AnalysisReport> {
        let state = self.state.as_mut().ok_or(ReviewLensError::NoTableLoaded)?;

        let serialized_size = table::serialize_table(&state.table)?.len() as u64;
        debug!(serialized_size, "Table re-serialized");

        let average_rating = analysis::average_rating(&state.table)?;
        analysis::annotate_sentiment(&mut state.table, self.scorer.as_ref())?;
        let (positive_keywords, negative_keywords) =
            analysis::identify_frequent_keywords(&state.table, top_n)?;
        let size_reduction_percent =
            analysis::size_reduction_percent(serialized_size, state.metadata.original_byte_size)?;
        let similarity_index = analysis::similarity_index(&state.table)?;

        info!(
            average_rating,
            size_reduction_percent, similarity_index, "Analysis complete"
        );

        Ok(AnalysisReport {
            average_rating,
            positive_keywords,
            negative_keywords,
            size_reduction_percent,
            similarity_index,
        })
    }

    /// Write the current table (including any sentiment annotation) to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let state = self.state.as_ref().ok_or(ReviewLensError::NoTableLoaded)?;
        table::write_table(&state.table, path)?;
        info!(path = %path.display(), rows = state.table.row_count(), "Annotated table written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_before_load_is_typed_error() {
        let mut session = ReviewSession::default();
        assert!(matches!(
            session.analyze(DEFAULT_TOP_N),
            Err(ReviewLensError::NoTableLoaded)
        ));
    }

    #[test]
    fn test_save_before_load_is_typed_error() {
        let session = ReviewSession::default();
        assert!(matches!(
            session.save(Path::new("/tmp/out.csv")),
            Err(ReviewLensError::NoTableLoaded)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let mut session = ReviewSession::default();
        assert!(matches!(
            session.load(Path::new("/nonexistent/reviews.csv")),
            Err(ReviewLensError::Load(_))
        ));
        assert!(!session.is_loaded());
    }
}
