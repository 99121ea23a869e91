// src/metrics.rs - Rolling per-frame timing
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Seconds per frame, averaged over the window
    pub avg_processing_time: f32,
    /// Frames per second the predictor could sustain at that cost
    pub avg_fps: f32,
    pub frames_classified: u64,
    pub frames_skipped: u64,
    frame_times: VecDeque<f32>,
    window: usize,
}

impl PerformanceMetrics {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            avg_processing_time: 0.0,
            avg_fps: 0.0,
            frames_classified: 0,
            frames_skipped: 0,
            frame_times: VecDeque::with_capacity(window),
            window,
        }
    }

    pub fn record_classified(&mut self, elapsed: Duration) {
        self.frames_classified += 1;
        self.push_time(elapsed);
    }

    pub fn record_skipped(&mut self) {
        self.frames_skipped += 1;
    }

    pub fn samples(&self) -> usize {
        self.frame_times.len()
    }

    fn push_time(&mut self, elapsed: Duration) {
        self.frame_times.push_front(elapsed.as_secs_f32());
        if self.frame_times.len() > self.window {
            self.frame_times.pop_back();
        }

        self.avg_processing_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        self.avg_fps = if self.avg_processing_time > 0.0 {
            1.0 / self.avg_processing_time
        } else {
            0.0
        };
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new(30)
    }
}
