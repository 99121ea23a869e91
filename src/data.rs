// src/data.rs - Session recording of per-frame predictions
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use serde::Serialize;

use crate::predictor::Prediction;

#[derive(Debug, Serialize)]
struct PredictionRecord {
    frame: u64,
    symbol: Option<String>,
    confidence: f64,
    skipped: bool,
}

/// Collects predictions for a session and writes them as CSV.
pub struct PredictionRecorder {
    output_dir: PathBuf,
    session_name: String,
    records: Vec<PredictionRecord>,
}

impl PredictionRecorder {
    pub fn new(output_dir: impl AsRef<Path>, session_name: Option<String>) -> Self {
        let session_name = session_name.unwrap_or_else(|| {
            format!("session_{}", Local::now().format("%Y%m%d_%H%M%S"))
        });

        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            session_name,
            records: Vec::new(),
        }
    }

    /// `<documents>/ASLSigns`, or `./output` when no user directories exist.
    pub fn default_output_dir() -> PathBuf {
        directories::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|p| p.join("ASLSigns")))
            .unwrap_or_else(|| PathBuf::from("./output"))
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn session_dir(&self) -> PathBuf {
        self.output_dir.join(&self.session_name)
    }

    /// Record one processed frame. `skipped` marks frames that carried no
    /// usable hand, whatever was shown for them.
    pub fn add_frame(&mut self, frame: u64, prediction: &Prediction, skipped: bool) {
        self.records.push(PredictionRecord {
            frame,
            symbol: prediction.symbol.map(|s| s.to_string()),
            confidence: prediction.confidence,
            skipped,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn export_csv(&self) -> Result<PathBuf> {
        let csv_path = self.session_dir().join("predictions.csv");

        if let Some(parent) = csv_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = File::create(&csv_path)
            .with_context(|| format!("Failed to create {}", csv_path.display()))?;
        let mut writer = Writer::from_writer(file);

        for record in &self.records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(csv_path)
    }
}
