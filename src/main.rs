// src/main.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use asl_signs::data::PredictionRecorder;
use asl_signs::logging::init_logging;
use asl_signs::{FramePredictor, LandmarkFrame, Prediction, PredictorConfig, Symbol};

#[derive(Parser, Debug)]
#[command(name = "asl_signs")]
#[command(about = "Classify ASL fingerspelling from hand landmark frames", long_about = None)]
struct Cli {
    /// Model artifact (JSON, or the web demo's asl_model.js)
    #[arg(short, long)]
    model: PathBuf,

    /// Landmark frames, one JSON array per line; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Predictor configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write predictions.csv under this directory
    #[arg(long)]
    record: Option<Option<PathBuf>>,

    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[derive(Serialize)]
struct FrameOutput {
    frame: u64,
    symbol: Option<Symbol>,
    label: String,
    confidence: f64,
    displayed: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str::<PredictorConfig>(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => PredictorConfig::default(),
    };

    let mut predictor = FramePredictor::new(config)?;
    predictor
        .load_from_path(&cli.model)
        .with_context(|| format!("Failed to load model {}", cli.model.display()))?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut recorder = cli.record.as_ref().map(|dir| {
        let dir = dir.clone().unwrap_or_else(PredictionRecorder::default_output_dir);
        PredictionRecorder::new(dir, None)
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut frame_index: u64 = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed: Option<LandmarkFrame> = match serde_json::from_str(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Line {}: not a landmark frame: {}", line_no + 1, e);
                continue;
            }
        };

        let (prediction, skipped) = match parsed {
            Some(frame) => {
                let prediction = predictor.predict(&frame)?;
                (prediction, prediction.is_none())
            }
            None => (predictor.no_hand(), true),
        };

        write_frame(&mut out, &predictor, frame_index, &prediction)?;
        if let Some(recorder) = recorder.as_mut() {
            recorder.add_frame(frame_index, &prediction, skipped);
        }
        frame_index += 1;
    }

    out.flush()?;

    let metrics = predictor.metrics();
    info!(
        "Processed {} frames ({} classified, {} skipped), {:.3} ms/frame",
        frame_index,
        metrics.frames_classified,
        metrics.frames_skipped,
        metrics.avg_processing_time * 1000.0
    );

    if let Some(recorder) = recorder {
        let path = recorder.export_csv()?;
        info!("Saved {} predictions to {}", recorder.len(), path.display());
    }

    Ok(())
}

fn write_frame(out: &mut impl Write, predictor: &FramePredictor, frame: u64, prediction: &Prediction) -> Result<()> {
    let output = FrameOutput {
        frame,
        symbol: prediction.symbol,
        label: prediction.label(),
        confidence: prediction.confidence,
        displayed: predictor.should_display(prediction),
    };
    serde_json::to_writer(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}
