use std::time::Duration;

/// Time slept between steps, adjustable while running.
///
/// Timers tick once per step, so this also sets how fast they count down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    sleep_micros: u64,
}

impl Pacing {
    pub fn new(sleep_micros: u64) -> Self {
        Pacing { sleep_micros }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_micros(self.sleep_micros)
    }

    /// Roughly halves the interval; it never reaches 0 so `slower` can always recover.
    pub fn faster(&mut self) {
        self.sleep_micros = self.sleep_micros / 2 + 1;
    }

    pub fn slower(&mut self) {
        self.sleep_micros = self.sleep_micros.saturating_mul(2);
    }
}
