//! # Statistics Module
//!
//! Group comparisons over annotated records: mean-difference significance,
//! linear and rank correlation, and categorical independence testing.
//! Every operation is stateless and pure given its inputs; degenerate
//! inputs come back as [`StatsError`] values, never as panics.

use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};
use thiserror::Error;

use crate::analysis::{AnnotatedRecord, ClickbaitLabel, SentimentLabel};

/// Errors for statistically degenerate inputs
#[derive(Error, Debug)]
pub enum StatsError {
    /// One of the compared groups has no records
    #[error("group `{0}` is empty")]
    EmptyGroup(&'static str),

    /// Too few records for the requested test
    #[error("need at least {required} records, got {actual}")]
    InsufficientData {
        /// Minimum record count for a defined result
        required: usize,
        /// Records actually supplied
        actual: usize,
    },

    /// An axis holds a single repeated value, so the statistic is
    /// undefined
    #[error("`{0}` values are constant, statistic undefined")]
    ConstantInput(&'static str),

    /// A contingency table row or column sums to zero
    #[error("contingency table has an empty {0} marginal")]
    EmptyMarginal(&'static str),
}

/// Independent-samples t-test result
#[derive(Debug, Clone, Copy)]
pub struct TTestResult {
    /// t statistic
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Single correlation measure with significance
#[derive(Debug, Clone, Copy)]
pub struct CorrelationResult {
    /// Correlation coefficient in [-1, 1]
    pub coefficient: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Linear and rank correlation over the same axes
#[derive(Debug, Clone, Copy)]
pub struct CorrelationPair {
    /// Pearson (linear) correlation
    pub pearson: CorrelationResult,
    /// Spearman (rank) correlation
    pub spearman: CorrelationResult,
}

/// Chi-square test of independence over a 2x2 contingency table
#[derive(Debug, Clone)]
pub struct ChiSquareResult {
    /// Chi-square statistic (Yates-corrected for one degree of freedom)
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom
    pub degrees_of_freedom: usize,
    /// Observed counts, clickbait rows x sentiment columns
    pub observed: [[u64; 2]; 2],
    /// Expected frequencies under independence
    pub expected: [[f64; 2]; 2],
}

/// Two-sided independent-samples t-test on word counts of two groups.
///
/// Pooled-variance Student's t with `n1 + n2 - 2` degrees of freedom.
/// A group compared with itself yields `t == 0` and `p ≈ 1`.
pub fn compare_lengths(
    group_a: &[AnnotatedRecord],
    group_b: &[AnnotatedRecord],
) -> Result<TTestResult, StatsError> {
    if group_a.is_empty() {
        return Err(StatsError::EmptyGroup("a"));
    }
    if group_b.is_empty() {
        return Err(StatsError::EmptyGroup("b"));
    }

    let a: Vec<f64> = group_a.iter().map(|r| r.word_count as f64).collect();
    let b: Vec<f64> = group_b.iter().map(|r| r.word_count as f64).collect();

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let df = n1 + n2 - 2.0;
    if df < 1.0 {
        return Err(StatsError::InsufficientData {
            required: 3,
            actual: a.len() + b.len(),
        });
    }

    let mean1 = mean(&a);
    let mean2 = mean(&b);
    let pooled_var = (sum_sq_dev(&a, mean1) + sum_sq_dev(&b, mean2)) / df;
    if pooled_var == 0.0 {
        return Err(StatsError::ConstantInput("word count"));
    }

    let se = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();
    let statistic = (mean1 - mean2) / se;

    Ok(TTestResult {
        statistic,
        p_value: two_sided_t_p_value(statistic, df),
    })
}

/// Pearson and Spearman correlation between sentiment score and word
/// count across a record collection.
pub fn correlate_sentiment_and_length(
    records: &[AnnotatedRecord],
) -> Result<CorrelationPair, StatsError> {
    if records.len() < 3 {
        return Err(StatsError::InsufficientData {
            required: 3,
            actual: records.len(),
        });
    }

    let scores: Vec<f64> = records.iter().map(|r| r.sentiment_score).collect();
    let counts: Vec<f64> = records.iter().map(|r| r.word_count as f64).collect();

    if is_constant(&scores) {
        return Err(StatsError::ConstantInput("sentiment score"));
    }
    if is_constant(&counts) {
        return Err(StatsError::ConstantInput("word count"));
    }

    let n = records.len();
    let pearson_r = pearson_correlation(&scores, &counts)
        .ok_or(StatsError::ConstantInput("sentiment score"))?;
    let spearman_r = spearman_correlation(&scores, &counts)
        .ok_or(StatsError::ConstantInput("sentiment score"))?;

    Ok(CorrelationPair {
        pearson: CorrelationResult {
            coefficient: pearson_r,
            p_value: correlation_p_value(pearson_r, n),
        },
        spearman: CorrelationResult {
            coefficient: spearman_r,
            p_value: correlation_p_value(spearman_r, n),
        },
    })
}

/// Chi-square test of independence between clickbait and sentiment
/// labels.
///
/// Builds the 2x2 contingency table, applies the Yates continuity
/// correction (the table always has one degree of freedom), and returns
/// the observed and expected tables alongside the test so callers can
/// judge validity themselves.
pub fn clickbait_sentiment_independence(
    records: &[AnnotatedRecord],
) -> Result<ChiSquareResult, StatsError> {
    let mut observed = [[0u64; 2]; 2];
    for record in records {
        let row = match record.clickbait {
            ClickbaitLabel::Clickbait => 0,
            ClickbaitLabel::NotClickbait => 1,
        };
        let col = match record.sentiment {
            SentimentLabel::Positive => 0,
            SentimentLabel::Negative => 1,
        };
        observed[row][col] += 1;
    }
    contingency_test(observed)
}

/// Chi-square independence test over an explicit 2x2 table
pub fn contingency_test(observed: [[u64; 2]; 2]) -> Result<ChiSquareResult, StatsError> {
    let row_totals = [observed[0][0] + observed[0][1], observed[1][0] + observed[1][1]];
    let col_totals = [observed[0][0] + observed[1][0], observed[0][1] + observed[1][1]];
    let total = row_totals[0] + row_totals[1];

    if row_totals.contains(&0) {
        return Err(StatsError::EmptyMarginal("row"));
    }
    if col_totals.contains(&0) {
        return Err(StatsError::EmptyMarginal("column"));
    }

    let mut expected = [[0.0f64; 2]; 2];
    let mut statistic = 0.0;
    for i in 0..2 {
        for j in 0..2 {
            let e = (row_totals[i] as f64) * (col_totals[j] as f64) / (total as f64);
            expected[i][j] = e;
            let o = observed[i][j] as f64;
            // Yates continuity correction: shift each observed count half
            // a unit toward its expected value.
            let diff = e - o;
            let adjusted = if diff == 0.0 { o } else { o + 0.5 * diff.signum() };
            statistic += (adjusted - e).powi(2) / e;
        }
    }

    let p_value = match ChiSquared::new(1.0) {
        Ok(dist) => 1.0 - dist.cdf(statistic),
        Err(_) => f64::NAN,
    };

    Ok(ChiSquareResult {
        statistic,
        p_value,
        degrees_of_freedom: 1,
        observed,
        expected,
    })
}

/// Pearson correlation coefficient.
///
/// `None` when the inputs are too short or either axis is constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x: f64 = x.iter().sum::<f64>() / n;
    let mean_y: f64 = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Spearman rank correlation: Pearson over tie-averaged ranks
pub fn spearman_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    pearson_correlation(&rank(x), &rank(y))
}

/// Assign ranks to a series, averaging over ties
fn rank(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && (indexed[j].1 - indexed[i].1).abs() < 1e-10 {
            j += 1;
        }
        // Ranks i+1..=j share the average (i + j) / 2 + 0.5.
        let avg_rank = (i + j) as f64 / 2.0 + 0.5;
        for k in i..j {
            ranks[indexed[k].0] = avg_rank;
        }
        i = j;
    }
    ranks
}

/// Two-sided p-value for a correlation coefficient via the
/// t-distribution transform `t = r * sqrt((n - 2) / (1 - r^2))`
fn correlation_p_value(r: f64, n: usize) -> f64 {
    let df = (n as f64) - 2.0;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        // |r| == 1: perfectly correlated.
        return 0.0;
    }
    let t = r * (df / denom).sqrt();
    two_sided_t_p_value(t, df)
}

fn two_sided_t_p_value(t: f64, df: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sum_sq_dev(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum()
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NormalizedRecord;

    fn record(
        clickbait: ClickbaitLabel,
        sentiment: SentimentLabel,
        score: f64,
        words: usize,
    ) -> AnnotatedRecord {
        AnnotatedRecord {
            record: NormalizedRecord {
                source: "Test".to_string(),
                title: "t".to_string(),
                text: "t".to_string(),
                published_at: String::new(),
            },
            clickbait,
            sentiment,
            sentiment_score: score,
            word_count: words,
        }
    }

    fn group(word_counts: &[usize]) -> Vec<AnnotatedRecord> {
        word_counts
            .iter()
            .map(|&w| record(ClickbaitLabel::NotClickbait, SentimentLabel::Positive, 0.9, w))
            .collect()
    }

    #[test]
    fn test_t_test_group_against_itself() {
        let g = group(&[10, 12, 14, 16]);
        let result = compare_lengths(&g, &g).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_t_test_known_value() {
        // scipy.stats.ttest_ind([1,2,3,4], [5,6,7,8]) -> t=-4.3818, p=0.00466
        let a = group(&[1, 2, 3, 4]);
        let b = group(&[5, 6, 7, 8]);
        let result = compare_lengths(&a, &b).unwrap();
        assert!((result.statistic - (-4.3818)).abs() < 1e-3);
        assert!((result.p_value - 0.00466).abs() < 1e-4);
    }

    #[test]
    fn test_t_test_empty_group() {
        let g = group(&[1, 2, 3]);
        assert!(matches!(
            compare_lengths(&g, &[]),
            Err(StatsError::EmptyGroup("b"))
        ));
    }

    #[test]
    fn test_t_test_constant_groups() {
        let a = group(&[5, 5]);
        let b = group(&[5, 5]);
        assert!(matches!(
            compare_lengths(&a, &b),
            Err(StatsError::ConstantInput(_))
        ));
    }

    #[test]
    fn test_t_test_single_samples() {
        let a = group(&[5]);
        let b = group(&[9]);
        assert!(matches!(
            compare_lengths(&a, &b),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_pearson_known_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let r = pearson_correlation(&x, &y).unwrap();
        assert!((r - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_axis_is_none() {
        let x = [1.0, 1.0, 1.0];
        let y = [2.0, 3.0, 4.0];
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn test_rank_averages_ties() {
        assert_eq!(rank(&[1.0, 2.0, 2.0, 3.0]), vec![1.0, 2.5, 2.5, 4.0]);
        assert_eq!(rank(&[3.0, 1.0, 2.0]), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_spearman_monotonic_is_one() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 100.0, 1000.0, 10000.0];
        let r = spearman_correlation(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlate_records() {
        let records: Vec<AnnotatedRecord> = [(0.9, 10), (0.7, 8), (0.8, 12), (0.6, 5), (0.95, 14)]
            .iter()
            .map(|&(s, w)| record(ClickbaitLabel::NotClickbait, SentimentLabel::Positive, s, w))
            .collect();

        let pair = correlate_sentiment_and_length(&records).unwrap();
        assert!(pair.pearson.coefficient > 0.5);
        assert!(pair.spearman.coefficient > 0.5);
        assert!((0.0..=1.0).contains(&pair.pearson.p_value));
        assert!((0.0..=1.0).contains(&pair.spearman.p_value));
    }

    #[test]
    fn test_correlate_degenerate_inputs() {
        let two: Vec<AnnotatedRecord> = group(&[3, 4]);
        assert!(matches!(
            correlate_sentiment_and_length(&two),
            Err(StatsError::InsufficientData { .. })
        ));

        // Constant sentiment scores.
        let constant = group(&[3, 4, 5]);
        assert!(matches!(
            correlate_sentiment_and_length(&constant),
            Err(StatsError::ConstantInput("sentiment score"))
        ));
    }

    #[test]
    fn test_chi_square_independent_table() {
        // Perfectly balanced: statistic 0, p-value 1.
        let result = contingency_test([[5, 5], [5, 5]]).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-9);
        assert_eq!(result.degrees_of_freedom, 1);
        for row in result.expected {
            for e in row {
                assert!((e - 5.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_chi_square_dependent_table() {
        // Clickbait perfectly predicts sentiment.
        let result = contingency_test([[10, 0], [0, 10]]).unwrap();
        // Yates-corrected: 4 * (4.5^2 / 5) = 16.2
        assert!((result.statistic - 16.2).abs() < 1e-9);
        assert!(result.p_value < 0.001);
    }

    #[test]
    fn test_chi_square_empty_marginal() {
        assert!(matches!(
            contingency_test([[0, 0], [3, 4]]),
            Err(StatsError::EmptyMarginal("row"))
        ));
        assert!(matches!(
            contingency_test([[3, 0], [4, 0]]),
            Err(StatsError::EmptyMarginal("column"))
        ));
    }

    #[test]
    fn test_chi_square_from_records() {
        let mut records = Vec::new();
        for _ in 0..8 {
            records.push(record(ClickbaitLabel::Clickbait, SentimentLabel::Positive, 0.9, 5));
            records.push(record(ClickbaitLabel::NotClickbait, SentimentLabel::Negative, 0.9, 5));
        }
        for _ in 0..2 {
            records.push(record(ClickbaitLabel::Clickbait, SentimentLabel::Negative, 0.9, 5));
            records.push(record(ClickbaitLabel::NotClickbait, SentimentLabel::Positive, 0.9, 5));
        }

        let result = clickbait_sentiment_independence(&records).unwrap();
        assert_eq!(result.observed, [[8, 2], [2, 8]]);
        assert!(result.p_value < 0.05);
    }
}
