use std::time::{Duration, Instant};

/// Time source for timer deferrals (animation steps, toast expiry).
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Wall clock.
    #[default]
    System,
    /// Time only moves when advanced explicitly. Used by tests and replays.
    Manual(Instant),
}

impl Clock {
    pub fn manual() -> Self {
        Clock::Manual(Instant::now())
    }

    pub fn now(&self) -> Instant {
        match self {
            Clock::System => Instant::now(),
            Clock::Manual(now) => *now,
        }
    }

    /// Move a manual clock forward. No-op for the system clock.
    pub fn advance(&mut self, by: Duration) {
        if let Clock::Manual(now) = self {
            *now += by;
        }
    }
}
