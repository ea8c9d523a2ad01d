use std::collections::HashMap;
use std::time::Instant;

/// Observer for frame pipeline events.
///
/// Keeps the pipelines free of any output device: the CLI prints, tests
/// record, library callers can ignore everything.
pub trait PipelineLogger: Send {
    /// Called once per processed frame with a 1-based `current`.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Progress callback: `(current, total)`.
pub type ProgressFn = Box<dyn FnMut(usize, usize) + Send>;

/// Forwards progress to a closure and drops everything else.
pub struct CallbackPipelineLogger {
    callback: ProgressFn,
}

impl CallbackPipelineLogger {
    pub fn new(callback: ProgressFn) -> Self {
        Self { callback }
    }
}

impl PipelineLogger for CallbackPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        (self.callback)(current, total);
    }

    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}

    fn info(&mut self, message: &str) {
        log::debug!("{message}");
    }
}

/// Logger backed by the `log` facade.
///
/// Progress lines are throttled to every `throttle_frames` frames; stage
/// timings are accumulated for the summary. An optional callback also
/// receives every progress event, unthrottled.
pub struct LogPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_frames: usize,
    on_progress: Option<ProgressFn>,
}

impl LogPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            start_time: Instant::now(),
            total_frames: 0,
            on_progress: None,
        }
    }

    /// Forwards each progress event to `callback` as well as the log.
    pub fn with_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Returns the formatted summary string, or `None` if no timings were recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.total_frames;
        let mut lines = vec![format!(
            "Pipeline summary ({frames} frames, {:.3}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:7.3}ms  total {total_ms:8.1}ms"
            ));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_frames = total;
        if let Some(callback) = self.on_progress.as_mut() {
            callback(current, total);
        }
        if total > 0 && (current % self.throttle_frames == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Processing: {current}/{total} frames ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
