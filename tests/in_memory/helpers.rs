//! Shared fixtures for in-memory repository tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use taskledger::{config::AppConfig, entity::Entity, repository::Repository};

/// Clock that advances one second per reading, so successive writes get
/// strictly increasing timestamps.
pub struct StepClock {
    ticks: AtomicI32,
}

impl StepClock {
    /// Creates a clock whose first reading is [`StepClock::epoch`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: AtomicI32::new(0),
        }
    }

    /// The instant of the first reading.
    #[must_use]
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Self::epoch() + TimeDelta::seconds(i64::from(tick))
    }
}

/// Builds an empty repository over `config` with a fresh stepping clock.
#[must_use]
pub fn repository_with<E: Entity>(config: &Arc<AppConfig>) -> Repository<E, StepClock> {
    Repository::new(Arc::clone(config), StepClock::new())
}

/// Builds an empty repository with default limits.
#[must_use]
pub fn repository<E: Entity>() -> Repository<E, StepClock> {
    repository_with(&Arc::new(AppConfig::default()))
}
