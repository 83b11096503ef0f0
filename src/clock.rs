//! Frame clock for the display-synchronized loop

use crate::consts::FRAME_MS;

/// Turns frame timestamps into per-frame elapsed time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart timing from `now_ms` (called when a game starts)
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Milliseconds since the previous frame. A zero or unknown gap counts as
    /// one nominal frame.
    pub fn delta_ms(&mut self, now_ms: f64) -> f32 {
        let delta = self.last_ms.map(|last| now_ms - last).unwrap_or(0.0);
        self.last_ms = Some(now_ms);
        if delta == 0.0 || delta.is_nan() {
            FRAME_MS
        } else {
            delta as f32
        }
    }
}
