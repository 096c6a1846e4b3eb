use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use shared::domain::{Contact, Deal};

pub mod fixtures;
pub mod preferences;

pub use fixtures::FixtureError;
pub use preferences::{PreferenceStore, Preferences};

/// Simulated round trip of the seed data load.
pub const DEFAULT_FIXTURE_LATENCY: Duration = Duration::from_millis(800);

/// Asynchronous supplier of the seed dataset.
///
/// Callers are expected to invoke each load once per consumer lifetime; the
/// trait itself makes no caching promises.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn load_contacts(&self) -> Result<Vec<Contact>, FixtureError>;
    async fn load_deals(&self) -> Result<Vec<Deal>, FixtureError>;
}

/// Fixture source backed by the embedded JSON seed data, answering after a
/// fixed delay.
#[derive(Debug)]
pub struct MockFixtureSource {
    latency: Duration,
    contact_loads: AtomicUsize,
    deal_loads: AtomicUsize,
}

impl MockFixtureSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            contact_loads: AtomicUsize::new(0),
            deal_loads: AtomicUsize::new(0),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Number of `load_contacts` calls served so far.
    pub fn contact_loads(&self) -> usize {
        self.contact_loads.load(Ordering::SeqCst)
    }

    pub fn deal_loads(&self) -> usize {
        self.deal_loads.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockFixtureSource {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_LATENCY)
    }
}

#[async_trait]
impl FixtureSource for MockFixtureSource {
    async fn load_contacts(&self) -> Result<Vec<Contact>, FixtureError> {
        self.contact_loads.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let contacts = fixtures::seed_contacts()?;
        tracing::debug!(count = contacts.len(), "served contact fixtures");
        Ok(contacts)
    }

    async fn load_deals(&self) -> Result<Vec<Deal>, FixtureError> {
        self.deal_loads.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let deals = fixtures::seed_deals()?;
        tracing::debug!(count = deals.len(), "served deal fixtures");
        Ok(deals)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
