use log::info;

/// View of the external audio transport, the single source of truth for
/// "now". The host feeds it from the playback position callback; gameplay
/// reads it once per tick and never consults wall-clock time or frame
/// counts, so pausing is simply the host not advancing it.
#[derive(Copy, Clone, Debug, Default)]
pub struct Transport {
    now: f32,
    started: bool,
    ended: bool,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current playback position in seconds. Regressions from
    /// jittery stream queries are clamped away; time only moves forward.
    pub fn set_time(&mut self, seconds: f32) {
        if !seconds.is_finite() {
            return;
        }
        if !self.started {
            self.started = true;
            info!("TRANSPORT START: t={seconds:.3}s");
        }
        self.now = self.now.max(seconds);
    }

    /// Signal that the track has played to its end.
    pub fn mark_ended(&mut self) {
        if self.started && !self.ended {
            self.ended = true;
            info!("TRANSPORT END: t={:.3}s", self.now);
        }
    }

    /// Current timeline instant, or `None` until playback has started.
    #[inline(always)]
    pub fn now(&self) -> Option<f32> {
        self.started.then_some(self.now)
    }

    #[inline(always)]
    pub fn ended(&self) -> bool {
        self.ended
    }
}
