//! Unit tests for the generic repository and its specialisations.

mod crud_tests;

use crate::config::AppConfig;
use crate::entity::Entity;
use crate::repository::Repository;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

/// Clock that advances one second every time it is read.
pub(super) struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI32,
}

impl StepClock {
    pub(super) fn new() -> Self {
        Self {
            start: Self::epoch(),
            ticks: AtomicI32::new(0),
        }
    }

    /// The instant of the first reading.
    pub(super) fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(i64::from(tick))
    }
}

/// Builds an empty repository with default limits and a stepping clock.
pub(super) fn repository<E: Entity>() -> Repository<E, StepClock> {
    Repository::new(Arc::new(AppConfig::default()), StepClock::new())
}
