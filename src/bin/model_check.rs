use std::process::ExitCode;

use asl_signs::{Classifier, ModelArtifact, FEATURE_COUNT};
use nalgebra::DVector;
use std::sync::Arc;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: model_check <model.json | asl_model.js>");
        return ExitCode::from(2);
    };

    println!("Checking model artifact {}...\n", path);

    let artifact = match ModelArtifact::from_path(&path) {
        Ok(artifact) => artifact,
        Err(e) => {
            println!("✗ Artifact rejected: {}", e);
            if e.is_shape_error() {
                println!("\nThe file parsed, but its dimensions or values are unusable.");
                println!("Expected fc1 [h1][63], fc2 [h2][h1], fc3 [28][h2] and a non-zero scaler.scale.");
            }
            return ExitCode::FAILURE;
        }
    };

    println!("✓ Scaler: {} features", artifact.scaler().len());
    for layer in artifact.layers() {
        println!("✓ {}: {} -> {}", layer.name(), layer.columns(), layer.rows());
    }

    // A mean-valued frame standardizes to all zeros, so this exercises the
    // full forward pass without needing real landmarks.
    let classifier = Classifier::new(Arc::new(artifact));
    let mean_frame: DVector<f64> = classifier.artifact().scaler().mean().clone();
    if mean_frame.len() != FEATURE_COUNT {
        println!("✗ Scaler has {} features, expected {}", mean_frame.len(), FEATURE_COUNT);
        return ExitCode::FAILURE;
    }

    match classifier.classify(&mean_frame) {
        Ok(result) => {
            let symbol = asl_signs::decode(result.class_index)
                .map(|s| s.to_string())
                .unwrap_or_else(|e| e.to_string());
            println!("✓ Forward pass on the mean frame: {} ({:.3})", symbol, result.confidence);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("✗ Forward pass failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
