use std::time::Duration;

/// Simulation timer, driven by render-frame deltas.
///
/// Independent of the frame rate: `advance` is called every frame and
/// reports when a simulation tick is due. At most one tick fires per call.
#[derive(Clone, Debug)]
pub struct Cadence {
    interval: Duration,
    elapsed: f32,
    running: bool,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            running: true,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Add `delta_time` seconds; true when a tick is due
    pub fn advance(&mut self, delta_time: f32) -> bool {
        self.advance_when(delta_time, true)
    }

    /// Like [`Cadence::advance`], but a due tick only fires when `ready`.
    /// Otherwise it stays pending and fires on the first ready frame.
    pub fn advance_when(&mut self, delta_time: f32, ready: bool) -> bool {
        if !self.running {
            return false;
        }

        self.elapsed += delta_time;
        if ready && self.elapsed >= self.interval.as_secs_f32() {
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}
