use crate::sentiment::SentimentLabel;

/// Per-bank distribution of sentiment scores and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    pub bank: String,
    pub reviews: usize,
    pub mean_score: f64,
    /// Population standard deviation.
    pub std_score: f64,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Summaries per bank, in order of first appearance.
pub fn summarize<'a, I>(rows: I) -> Vec<SentimentSummary>
where
    I: IntoIterator<Item = (&'a str, f64, SentimentLabel)>,
{
    let mut groups: Vec<(&str, Vec<f64>, [usize; 3])> = Vec::new();

    for (bank, score, label) in rows {
        let idx = match groups.iter().position(|(b, _, _)| *b == bank) {
            Some(idx) => idx,
            None => {
                groups.push((bank, Vec::new(), [0; 3]));
                groups.len() - 1
            }
        };
        let (_, scores, counts) = &mut groups[idx];
        scores.push(score);
        match label {
            SentimentLabel::Positive => counts[0] += 1,
            SentimentLabel::Neutral => counts[1] += 1,
            SentimentLabel::Negative => counts[2] += 1,
        }
    }

    groups
        .into_iter()
        .map(|(bank, scores, [positive, neutral, negative])| {
            let mean_score = mean(&scores);
            SentimentSummary {
                bank: bank.to_string(),
                reviews: scores.len(),
                mean_score,
                std_score: stddev(&scores, mean_score),
                positive,
                neutral,
                negative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_stddev() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(stddev(&[], 0.0), 0.0);

        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert_eq!(stddev(&values, m), 2.0);
    }

    #[test]
    fn test_summarize_per_bank() {
        let rows = vec![
            ("CBE", 0.5, SentimentLabel::Positive),
            ("BOA", -0.4, SentimentLabel::Negative),
            ("CBE", -0.5, SentimentLabel::Negative),
            ("CBE", 0.0, SentimentLabel::Neutral),
        ];
        let summary = summarize(rows);

        assert_eq!(summary.len(), 2);
        let cbe = &summary[0];
        assert_eq!(cbe.bank, "CBE");
        assert_eq!(cbe.reviews, 3);
        assert_eq!(cbe.mean_score, 0.0);
        assert_eq!((cbe.positive, cbe.neutral, cbe.negative), (1, 1, 1));
        assert!((cbe.std_score - (1.0_f64 / 6.0).sqrt()).abs() < 1e-12);

        let boa = &summary[1];
        assert_eq!(boa.reviews, 1);
        assert_eq!(boa.std_score, 0.0);
    }
}
