//! Shared test helpers: deterministic port implementations and constructors.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use applife::application::{ApplicationHandler, ApplicationRegistry, Clock, IdGenerator};
use applife::domain::AppId;
use applife_common::{CreateAppRequest, RegistryConfig};
use chrono::{DateTime, Duration, TimeZone, Utc};

// ── Ports ────────────────────────────────────────────────────────────────────

/// Issues `app-0000000000000001`, `app-0000000000000002`, ...
#[derive(Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Result<AppId> {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(AppId::new(format!("app-{n:016x}")))
    }
}

/// Id source that is always exhausted.
pub struct ExhaustedIds;

impl IdGenerator for ExhaustedIds {
    fn next_id(&self) -> Result<AppId> {
        anyhow::bail!("id pool exhausted")
    }
}

/// Id source that panics, standing in for an unexpected bug.
pub struct PanickingIds;

impl IdGenerator for PanickingIds {
    fn next_id(&self) -> Result<AppId> {
        panic!("id source blew up")
    }
}

/// Id source that hands out the same id every time and records releases.
#[derive(Default)]
pub struct RepeatingIds {
    pub released: Mutex<Vec<AppId>>,
}

impl IdGenerator for RepeatingIds {
    fn next_id(&self) -> Result<AppId> {
        Ok(AppId::new("app-dup"))
    }

    fn release(&self, id: &AppId) {
        self.released
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id.clone());
    }
}

impl IdGenerator for &RepeatingIds {
    fn next_id(&self) -> Result<AppId> {
        (**self).next_id()
    }

    fn release(&self, id: &AppId) {
        (**self).release(id);
    }
}

/// Clock that advances one second per reading, starting at a fixed instant.
#[derive(Default)]
pub struct TickingClock(AtomicU64);

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let ticks = self.0.fetch_add(1, Ordering::SeqCst);
        epoch() + Duration::seconds(i64::try_from(ticks).unwrap_or(i64::MAX))
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub type TestHandler = ApplicationHandler<SequentialIds, TickingClock>;
pub type TestRegistry = ApplicationRegistry<SequentialIds, TickingClock>;

pub fn handler() -> TestHandler {
    ApplicationHandler::new(SequentialIds::default(), TickingClock::default())
}

pub fn registry() -> TestRegistry {
    registry_with(RegistryConfig::default())
}

pub fn registry_with(config: RegistryConfig) -> TestRegistry {
    ApplicationRegistry::new(handler(), config)
}

pub fn request(name: &str) -> CreateAppRequest {
    CreateAppRequest::new(name, "localhost", 8080)
}
