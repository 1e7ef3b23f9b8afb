use chrono::Utc;

/// Source of "now" as Unix seconds.
///
/// New entry ids, relative filter bounds and entry ages all read the clock
/// through this trait so tests can pin time with [`FixedClock`].
pub trait Clock {
    fn now(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Clamp pre-epoch clocks to zero
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
