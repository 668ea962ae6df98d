const FPS_SAMPLE_COUNT: usize = 60;

/// Turns host animation-frame timestamps (milliseconds) into per-tick deltas.
pub struct FrameClock {
    pub max_frame_dt: f64,
    pub frame_count: u64,
    pub real_dt: f64,
    pub now_ms: f64,
    last_timestamp_ms: Option<f64>,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(max_frame_dt: f64) -> Self {
        Self {
            max_frame_dt,
            frame_count: 0,
            real_dt: 0.0,
            now_ms: 0.0,
            last_timestamp_ms: None,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    /// Start a tick at `timestamp_ms` and return the delta in seconds.
    ///
    /// The first tick has no predecessor and yields zero. Timestamps that run
    /// backwards also yield zero rather than a negative delta.
    pub fn begin_frame(&mut self, timestamp_ms: f64) -> f64 {
        let raw = match self.last_timestamp_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        self.now_ms = timestamp_ms;
        self.real_dt = raw;

        // Spiral-of-death cap (tab was hidden, debugger pause, ...)
        if self.real_dt > self.max_frame_dt {
            log::warn!(
                "Frame took {:.1}ms, capping delta to {}ms",
                self.real_dt * 1000.0,
                self.max_frame_dt * 1000.0
            );
            self.real_dt = self.max_frame_dt;
        }

        self.frame_count += 1;

        if raw > 0.0 {
            self.fps_samples[self.fps_sample_index] = self.real_dt;
            self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
            let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
            self.smoothed_frame_time_ms = avg_dt * 1000.0;
            self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
        }

        self.real_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}
