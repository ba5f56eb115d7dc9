use anyhow::Result;
use tracing::{info, warn};

use super::pain_points::{BankPainPoints, LabeledText, PainPoints, TOP_PHRASES, extract_pain_points};
use super::summary::{SentimentSummary, summarize};
use crate::config::PipelineConfig;
use crate::nlp::TextNormalizer;
use crate::sentiment::{LexiconScorer, PolarityLexicon, PolarityScorer, SentimentLabel};
use crate::stage::StageOutcome;
use crate::table::Table;

pub const SCORE_COLUMN: &str = "sentiment_score";
pub const LABEL_COLUMN: &str = "sentiment_label";
pub const LEMMA_COLUMN: &str = "lemmatized_text";

/// What the analyzer found besides the per-row columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub summaries: Vec<SentimentSummary>,
    pub pain_points: Vec<BankPainPoints>,
}

pub struct ReviewAnalyzer<S = LexiconScorer> {
    scorer: S,
    normalizer: TextNormalizer,
}

impl ReviewAnalyzer {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            LexiconScorer::new(PolarityLexicon::english()),
            TextNormalizer::with_domain_stop_words(&config.domain_stop_words),
        )
    }
}

impl<S: PolarityScorer> ReviewAnalyzer<S> {
    pub fn new(scorer: S, normalizer: TextNormalizer) -> Self {
        Self { scorer, normalizer }
    }

    /// Scores, labels and normalizes every row, adding (or replacing) the
    /// score, label and lemma columns. All other columns are left as they are.
    pub fn analyze_table(&self, table: &mut Table) -> Result<AnalysisReport> {
        let text_idx = table.require_column("review_text")?;
        let bank_idx = table.require_column("bank_name")?;

        let texts: Vec<&str> = table.column(text_idx).collect();
        let scores: Vec<f64> = texts.iter().map(|t| self.scorer.polarity(t)).collect();
        let labels: Vec<SentimentLabel> =
            scores.iter().map(|s| SentimentLabel::from_score(*s)).collect();
        let lemmas: Vec<String> = texts.iter().map(|t| self.normalizer.normalize(t)).collect();
        let banks: Vec<String> = table.column(bank_idx).map(str::to_string).collect();

        let summaries = summarize(
            banks
                .iter()
                .zip(&scores)
                .zip(&labels)
                .map(|((bank, score), label)| (bank.as_str(), *score, *label)),
        );
        let pain_points = extract_pain_points(
            banks
                .iter()
                .zip(&labels)
                .zip(&lemmas)
                .map(|((bank, label), lemmatized)| LabeledText {
                    bank,
                    label: *label,
                    lemmatized,
                }),
            TOP_PHRASES,
        );

        table.set_column(SCORE_COLUMN, scores.iter().map(f64::to_string).collect())?;
        table.set_column(
            LABEL_COLUMN,
            labels.iter().map(|l| l.as_str().to_string()).collect(),
        )?;
        table.set_column(LEMMA_COLUMN, lemmas)?;

        Ok(AnalysisReport {
            summaries,
            pain_points,
        })
    }
}

fn log_report(report: &AnalysisReport) {
    for s in &report.summaries {
        info!(
            bank = %s.bank,
            reviews = s.reviews,
            mean_score = s.mean_score,
            std_score = s.std_score,
            positive = s.positive,
            neutral = s.neutral,
            negative = s.negative,
            "Sentiment summary"
        );
    }

    info!("--- Top Themes & Pain Points (N-Grams) ---");
    for bank in &report.pain_points {
        match &bank.pain_points {
            PainPoints::Phrases(phrases) => {
                info!(bank = %bank.bank, phrases = %phrases.join(", "), "{}", bank)
            }
            PainPoints::InsufficientData => info!(bank = %bank.bank, "{}", bank),
        }
    }
}

/// Reads the cleaned CSV, appends sentiment and lemma columns, reports
/// per-bank pain points, and writes the analyzed CSV.
#[tracing::instrument(skip_all, fields(input = %config.clean_path().display()))]
pub fn analyze(config: &PipelineConfig) -> Result<StageOutcome> {
    let input = config.clean_path();
    if !input.exists() {
        warn!(path = %input.display(), "Cleaned reviews not found");
        return Ok(StageOutcome::skipped("Run the cleaner first!"));
    }

    let mut table = Table::read(&input)?;
    info!("Loaded {} reviews.", table.len());

    let report = ReviewAnalyzer::from_config(config).analyze_table(&mut table)?;
    log_report(&report);

    let path = config.analyzed_path();
    table.write(&path)?;
    info!(path = %path.display(), "Analysis saved");

    Ok(StageOutcome::Written {
        path,
        rows: table.len(),
    })
}
