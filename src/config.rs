//! Immutable pipeline configuration.
//!
//! Every stage receives a [`PipelineConfig`] instead of reading module-level
//! constants, so tests can point stages at scratch directories and custom
//! registries.

use std::path::{Path, PathBuf};

pub const RAW_FILE: &str = "raw_reviews.csv";
pub const CLEAN_FILE: &str = "cleaned_reviews.csv";
pub const ANALYZED_FILE: &str = "sentiment_analysis.csv";

/// A store application whose reviews are collected, tagged with the label
/// that ends up in the `bank_name` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceApp {
    pub label: String,
    pub app_id: String,
}

impl SourceApp {
    pub fn new(label: &str, app_id: &str) -> Self {
        Self {
            label: label.to_string(),
            app_id: app_id.to_string(),
        }
    }
}

/// Store query parameters shared by every application.
#[derive(Debug, Clone)]
pub struct CollectionSettings {
    pub target_count: usize,
    pub lang: String,
    pub primary_country: String,
    pub fallback_country: String,
    /// Value written to the `source` column.
    pub platform: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            target_count: 450,
            lang: "en".to_string(),
            primary_country: "us".to_string(),
            fallback_country: "et".to_string(),
            platform: "Google Play".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub chart_dir: PathBuf,
    pub apps: Vec<SourceApp>,
    pub collection: CollectionSettings,
    pub domain_stop_words: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            chart_dir: PathBuf::from("."),
            apps: vec![
                SourceApp::new("CBE", "com.combanketh.mobilebanking"),
                SourceApp::new("BOA", "com.bankofabyssinia.boamobile.retail"),
                SourceApp::new("Dashen", "com.dashen.dashensuperapp"),
            ],
            collection: CollectionSettings::default(),
            domain_stop_words: ["app", "bank", "mobile", "money", "ethiopia", "phone", "use"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl PipelineConfig {
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_chart_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.chart_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_apps(mut self, apps: Vec<SourceApp>) -> Self {
        self.apps = apps;
        self
    }

    pub fn with_target_count(mut self, count: usize) -> Self {
        self.collection.target_count = count;
        self
    }

    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join(RAW_FILE)
    }

    pub fn clean_path(&self) -> PathBuf {
        self.data_dir.join(CLEAN_FILE)
    }

    pub fn analyzed_path(&self) -> PathBuf {
        self.data_dir.join(ANALYZED_FILE)
    }
}
