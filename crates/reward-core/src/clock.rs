//! Injectable time source.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" for boost expiry, event windows, and day boundaries.
///
/// Injected so tests can pin time; streak transitions use the server-local
/// calendar day, not UTC.
pub trait Clock: Send + Sync {
    /// Current instant, used for boost expiry and event window comparisons.
    fn now(&self) -> DateTime<Utc>;

    /// Server-local calendar day, used for streak day boundaries.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed instant and day, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    /// Pin the clock to the given instant; `today` is the instant's UTC day.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
        }
    }

    /// Pin `today` independently of the instant, e.g. to model a server
    /// time zone ahead of or behind UTC.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
