//! The analysis pipeline: rating aggregation, sentiment annotation, keyword
//! frequency extraction, and the size/similarity report inputs.
//!
//! Every function here is pure over the table (annotation mutates in place
//! but never deletes or reorders rows) and returns explicit errors; callers
//! own orchestration and presentation.

use crate::error::{ReviewLensError, Result};
use crate::models::{
    KeywordCount, ReviewTable, Value, RATING_COLUMN, REVIEW_TEXT_COLUMN, SENTIMENT_COLUMN,
};
use crate::sentiment::SentimentScorer;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Mean of the `rating` column.
///
/// Missing and non-numeric cells are excluded from both sum and count.
/// Returns NaN when every cell is missing, matching the usual numeric-column
/// convention rather than special-casing it.
///
/// # Errors
///
/// [`ReviewLensError::MissingColumn`] when the table has no `rating` column.
pub fn average_rating(table: &ReviewTable) -> Result<f64> {
    let idx = table
        .column_index(RATING_COLUMN)
        .ok_or_else(|| ReviewLensError::MissingColumn(RATING_COLUMN.to_string()))?;

    let mut sum = 0.0;
    let mut count = 0u64;
    for row in &table.rows {
        if let Some(n) = row[idx].as_number() {
            sum += n;
            count += 1;
        }
    }

    if count == 0 {
        Ok(f64::NAN)
    } else {
        Ok(sum / count as f64)
    }
}

/// Score every row's `review_text` and append the result as a `sentiment`
/// column (overwriting it when the table was already annotated).
///
/// Rows with empty or missing text get exactly 0.0.
///
/// # Errors
///
/// [`ReviewLensError::MissingColumn`] when the table has no `review_text` column.
pub fn annotate_sentiment(table: &mut ReviewTable, scorer: &dyn SentimentScorer) -> Result<()> {
    let text_idx = table
        .column_index(REVIEW_TEXT_COLUMN)
        .ok_or_else(|| ReviewLensError::MissingColumn(REVIEW_TEXT_COLUMN.to_string()))?;

    let scores: Vec<f64> = table
        .rows
        .iter()
        .map(|row| match row[text_idx].as_text() {
            Some(text) if !text.trim().is_empty() => scorer.score(text),
            _ => 0.0,
        })
        .collect();

    match table.column_index(SENTIMENT_COLUMN) {
        Some(sentiment_idx) => {
            // Re-analysis overwrites in place
            for (row, score) in table.rows.iter_mut().zip(scores) {
                row[sentiment_idx] = Value::Number(score);
            }
        }
        None => {
            table.headers.push(SENTIMENT_COLUMN.to_string());
            for (row, score) in table.rows.iter_mut().zip(scores) {
                row.push(Value::Number(score));
            }
        }
    }

    Ok(())
}

/// Top-N keyword frequencies from the positive and negative sentiment buckets.
///
/// Rows are partitioned by the sign of their `sentiment` cell; neutral rows
/// (exactly 0.0, or with no usable score) count toward neither bucket. Text
/// is split on whitespace with no stemming, case folding, or punctuation
/// stripping. Ties on count keep first-seen order. Each returned list has
/// length `min(top_n, distinct tokens)`.
///
/// # Errors
///
/// [`ReviewLensError::MissingColumn`] when the table lacks `review_text` or
/// has not been annotated with `sentiment`.
pub fn identify_frequent_keywords(
    table: &ReviewTable,
    top_n: usize,
) -> Result<(Vec<KeywordCount>, Vec<KeywordCount>)> {
    let text_idx = table
        .column_index(REVIEW_TEXT_COLUMN)
        .ok_or_else(|| ReviewLensError::MissingColumn(REVIEW_TEXT_COLUMN.to_string()))?;
    let sentiment_idx = table
        .column_index(SENTIMENT_COLUMN)
        .ok_or_else(|| ReviewLensError::MissingColumn(SENTIMENT_COLUMN.to_string()))?;

    let mut positive = TokenCounter::new();
    let mut negative = TokenCounter::new();

    for row in &table.rows {
        let Some(text) = row[text_idx].as_text() else {
            continue;
        };
        let Some(sentiment) = row[sentiment_idx].as_number() else {
            continue;
        };

        if sentiment > 0.0 {
            positive.update(text);
        } else if sentiment < 0.0 {
            negative.update(text);
        }
    }

    Ok((positive.most_common(top_n), negative.most_common(top_n)))
}

/// Size reduction of the re-serialized table relative to the source file,
/// as a percentage.
///
/// # Errors
///
/// [`ReviewLensError::ZeroOriginalSize`] when the original size is zero
/// (the loaded file was empty). The reference behavior here was an unguarded
/// division fault; this crate reports it as a typed error instead.
pub fn size_reduction_percent(serialized_size: u64, original_byte_size: u64) -> Result<f64> {
    if original_byte_size == 0 {
        return Err(ReviewLensError::ZeroOriginalSize);
    }
    Ok((1.0 - serialized_size as f64 / original_byte_size as f64) * 100.0)
}

/// Mean Jaccard similarity between the whitespace token sets of consecutive
/// reviews.
///
/// Pairs where both reviews tokenize to nothing are skipped. Tables with
/// fewer than two usable rows score 0.0.
///
/// # Errors
///
/// [`ReviewLensError::MissingColumn`] when the table has no `review_text` column.
pub fn similarity_index(table: &ReviewTable) -> Result<f64> {
    let text_idx = table
        .column_index(REVIEW_TEXT_COLUMN)
        .ok_or_else(|| ReviewLensError::MissingColumn(REVIEW_TEXT_COLUMN.to_string()))?;

    let token_sets: Vec<HashSet<&str>> = table
        .rows
        .iter()
        .map(|row| {
            row[text_idx]
                .as_text()
                .map(|text| text.split_whitespace().collect())
                .unwrap_or_default()
        })
        .collect();

    let mut total = 0.0;
    let mut pairs = 0u64;
    for window in token_sets.windows(2) {
        let union = window[0].union(&window[1]).count();
        if union == 0 {
            continue;
        }
        let intersection = window[0].intersection(&window[1]).count();
        total += intersection as f64 / union as f64;
        pairs += 1;
    }

    if pairs == 0 {
        Ok(0.0)
    } else {
        Ok(total / pairs as f64)
    }
}

/// Insertion-ordered token frequency counter.
///
/// `most_common` sorts count-descending with ties broken by first insertion,
/// the same contract as a standard frequency counter.
struct TokenCounter {
    counts: HashMap<String, (usize, usize)>, // token -> (count, first-seen rank)
    next_rank: usize,
}

impl TokenCounter {
    fn new() -> Self {
        Self {
            counts: HashMap::new(),
            next_rank: 0,
        }
    }

    fn update(&mut self, text: &str) {
        for token in text.split_whitespace() {
            match self.counts.entry(token.to_string()) {
                Entry::Occupied(mut entry) => entry.get_mut().0 += 1,
                Entry::Vacant(entry) => {
                    entry.insert((1, self.next_rank));
                    self.next_rank += 1;
                }
            }
        }
    }

    fn most_common(self, top_n: usize) -> Vec<KeywordCount> {
        let mut entries: Vec<(String, usize, usize)> = self
            .counts
            .into_iter()
            .map(|(token, (count, rank))| (token, count, rank))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        entries
            .into_iter()
            .take(top_n)
            .map(|(token, count, _)| KeywordCount { token, count })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[Vec<Value>]) -> ReviewTable {
        ReviewTable {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: rows.to_vec(),
        }
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_average_rating_exact() {
        let t = table(
            &["rating", "review_text"],
            &[
                vec![Value::Number(3.0), text("ok")],
                vec![Value::Number(4.0), text("fine")],
                vec![Value::Number(5.0), text("great")],
            ],
        );
        assert_eq!(average_rating(&t).expect("mean"), 4.0);
    }

    #[test]
    fn test_average_rating_skips_missing() {
        let t = table(
            &["rating", "review_text"],
            &[
                vec![Value::Number(3.0), text("ok")],
                vec![Value::Missing, text("no rating")],
                vec![Value::Number(5.0), text("great")],
            ],
        );
        // Missing excluded from sum and count, not treated as zero
        assert_eq!(average_rating(&t).expect("mean"), 4.0);
    }

    #[test]
    fn test_average_rating_all_missing_is_nan() {
        let t = table(
            &["rating", "review_text"],
            &[vec![Value::Missing, text("a")], vec![Value::Missing, text("b")]],
        );
        assert!(average_rating(&t).expect("mean").is_nan());
    }

    #[test]
    fn test_average_rating_missing_column() {
        let t = table(&["review_text"], &[vec![text("a")]]);
        assert!(matches!(
            average_rating(&t),
            Err(ReviewLensError::MissingColumn(c)) if c == "rating"
        ));
    }

    struct SignScorer;
    impl SentimentScorer for SignScorer {
        fn score(&self, text: &str) -> f64 {
            if text.contains("great") {
                0.8
            } else if text.contains("bad") {
                -0.6
            } else {
                0.0
            }
        }
    }

    #[test]
    fn test_annotate_appends_column_and_neutral_defaults() {
        let mut t = table(
            &["rating", "review_text"],
            &[
                vec![Value::Number(5.0), text("great stuff")],
                vec![Value::Number(1.0), text("bad stuff")],
                vec![Value::Number(3.0), Value::Missing],
            ],
        );
        annotate_sentiment(&mut t, &SignScorer).expect("annotate");

        assert!(t.is_annotated());
        assert_eq!(t.headers.last().map(String::as_str), Some("sentiment"));
        assert_eq!(t.rows[0][2], Value::Number(0.8));
        assert_eq!(t.rows[1][2], Value::Number(-0.6));
        assert_eq!(t.rows[2][2], Value::Number(0.0));
    }

    #[test]
    fn test_annotate_twice_overwrites_in_place() {
        let mut t = table(
            &["rating", "review_text"],
            &[vec![Value::Number(5.0), text("great")]],
        );
        annotate_sentiment(&mut t, &SignScorer).expect("annotate");
        annotate_sentiment(&mut t, &SignScorer).expect("re-annotate");

        assert_eq!(t.headers.len(), 3);
        assert_eq!(t.rows[0].len(), 3);
    }

    #[test]
    fn test_annotate_missing_text_column() {
        let mut t = table(&["rating"], &[vec![Value::Number(5.0)]]);
        assert!(matches!(
            annotate_sentiment(&mut t, &SignScorer),
            Err(ReviewLensError::MissingColumn(c)) if c == "review_text"
        ));
    }

    #[test]
    fn test_keywords_counts_and_tie_order() {
        let mut t = table(
            &["rating", "review_text"],
            &[vec![Value::Number(5.0), text("great service great staff")]],
        );
        annotate_sentiment(&mut t, &SignScorer).expect("annotate");

        let (positive, negative) = identify_frequent_keywords(&t, 2).expect("keywords");
        assert_eq!(
            positive,
            vec![
                KeywordCount { token: "great".to_string(), count: 2 },
                KeywordCount { token: "service".to_string(), count: 1 },
            ]
        );
        assert!(negative.is_empty());
    }

    #[test]
    fn test_keywords_top_n_zero_is_empty() {
        let mut t = table(
            &["rating", "review_text"],
            &[
                vec![Value::Number(5.0), text("great stuff")],
                vec![Value::Number(1.0), text("bad stuff")],
            ],
        );
        annotate_sentiment(&mut t, &SignScorer).expect("annotate");

        let (positive, negative) = identify_frequent_keywords(&t, 0).expect("keywords");
        assert!(positive.is_empty());
        assert!(negative.is_empty());
    }

    #[test]
    fn test_keywords_neutral_rows_count_nowhere() {
        let mut t = table(
            &["rating", "review_text"],
            &[
                vec![Value::Number(3.0), text("the order arrived")],
                vec![Value::Number(3.0), text("a plain box")],
            ],
        );
        annotate_sentiment(&mut t, &SignScorer).expect("annotate");

        let (positive, negative) = identify_frequent_keywords(&t, 5).expect("keywords");
        assert!(positive.is_empty());
        assert!(negative.is_empty());
    }

    #[test]
    fn test_keywords_require_annotation() {
        let t = table(
            &["rating", "review_text"],
            &[vec![Value::Number(5.0), text("great")]],
        );
        assert!(matches!(
            identify_frequent_keywords(&t, 5),
            Err(ReviewLensError::MissingColumn(c)) if c == "sentiment"
        ));
    }

    #[test]
    fn test_size_reduction_zero_when_sizes_match() {
        assert_eq!(size_reduction_percent(100, 100).expect("pct"), 0.0);
    }

    #[test]
    fn test_size_reduction_zero_denominator_is_error() {
        assert!(matches!(
            size_reduction_percent(10, 0),
            Err(ReviewLensError::ZeroOriginalSize)
        ));
    }

    #[test]
    fn test_similarity_identical_reviews() {
        let t = table(
            &["rating", "review_text"],
            &[
                vec![Value::Number(5.0), text("great coffee here")],
                vec![Value::Number(4.0), text("great coffee here")],
            ],
        );
        assert_eq!(similarity_index(&t).expect("similarity"), 1.0);
    }

    #[test]
    fn test_similarity_disjoint_reviews() {
        let t = table(
            &["rating", "review_text"],
            &[
                vec![Value::Number(5.0), text("great coffee")],
                vec![Value::Number(1.0), text("slow shipping")],
            ],
        );
        assert_eq!(similarity_index(&t).expect("similarity"), 0.0);
    }

    #[test]
    fn test_similarity_single_row_is_zero() {
        let t = table(
            &["rating", "review_text"],
            &[vec![Value::Number(5.0), text("great coffee")]],
        );
        assert_eq!(similarity_index(&t).expect("similarity"), 0.0);
    }
}
