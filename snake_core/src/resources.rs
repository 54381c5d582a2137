use std::cell::Cell;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall-clock backed by `Instant`, zero at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Calendar time: milliseconds since the Unix epoch. Not monotonic.
#[derive(Debug, Default, Clone, Copy)]
pub struct EpochClock;

impl Clock for EpochClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, dt_ms: f64) {
        self.now_ms.set(self.now_ms.get() + dt_ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_rng_is_deterministic_per_seed() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.0.gen_range(0..100), b.0.gen_range(0..100));
        }
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(1000.0);
        assert_eq!(clock.now(), 1000.0);
        clock.advance(250.0);
        assert_eq!(clock.now(), 1250.0);
        clock.set(0.0);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_epoch_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(EpochClock.now() > 1_577_836_800_000.0);
    }
}
