//! In-memory mock implementations for the business directory and audit log.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::business_directory::{
        BusinessDirectory, BusinessRecord, PaymentEventLogEntry, PaymentEventLogRepo,
    },
    domain::entities::{
        business_subscription::{BusinessId, BusinessSubscription, SubscriptionPatch},
        payment_provider::PaymentProvider,
    },
};

// ============================================================================
// InMemoryBusinessDirectory
// ============================================================================

#[derive(Default)]
pub struct InMemoryBusinessDirectory {
    pub businesses: Mutex<HashMap<BusinessId, BusinessRecord>>,
    applied: Mutex<HashSet<(PaymentProvider, String)>>,
    updates: AtomicUsize,
    delay: Option<Duration>,
    fail_writes: bool,
    concurrent_writer: bool,
}

impl InMemoryBusinessDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_businesses(businesses: Vec<BusinessRecord>) -> Self {
        let map: HashMap<BusinessId, BusinessRecord> =
            businesses.into_iter().map(|b| (b.id.clone(), b)).collect();
        Self {
            businesses: Mutex::new(map),
            ..Self::default()
        }
    }

    /// Sleep before every call, to exercise the write timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every `update_subscription` fails with a database error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Another writer applies the same payment just before each guarded update.
    pub fn with_concurrent_writer(mut self) -> Self {
        self.concurrent_writer = true;
        self
    }

    pub fn subscription(&self, business_id: &BusinessId) -> Option<BusinessSubscription> {
        self.businesses
            .lock()
            .unwrap()
            .get(business_id)
            .map(|b| b.subscription.clone())
    }

    /// Number of guarded updates that actually wrote a row
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    async fn maybe_delay(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl BusinessDirectory for InMemoryBusinessDirectory {
    async fn get_business(&self, business_id: &BusinessId) -> AppResult<Option<BusinessRecord>> {
        self.maybe_delay().await;
        Ok(self.businesses.lock().unwrap().get(business_id).cloned())
    }

    async fn is_payment_applied(
        &self,
        provider: PaymentProvider,
        payment_id: &str,
    ) -> AppResult<bool> {
        self.maybe_delay().await;
        Ok(self
            .applied
            .lock()
            .unwrap()
            .contains(&(provider, payment_id.to_string())))
    }

    async fn update_subscription(
        &self,
        business_id: &BusinessId,
        patch: &SubscriptionPatch,
    ) -> AppResult<bool> {
        self.maybe_delay().await;
        if self.fail_writes {
            return Err(AppError::Database("connection reset by peer".into()));
        }

        let mut businesses = self.businesses.lock().unwrap();
        let Some(record) = businesses.get_mut(business_id) else {
            return Ok(false);
        };

        let mut applied = self.applied.lock().unwrap();
        let key = (patch.provider, patch.last_payment_id.clone());

        if self.concurrent_writer {
            applied.insert(key.clone());
            patch.apply_to(&mut record.subscription);
        }

        if !applied.insert(key) {
            return Ok(false);
        }

        patch.apply_to(&mut record.subscription);
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

// ============================================================================
// InMemoryPaymentEventLog
// ============================================================================

#[derive(Default)]
pub struct InMemoryPaymentEventLog {
    pub entries: Mutex<Vec<PaymentEventLogEntry>>,
}

impl InMemoryPaymentEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<PaymentEventLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentEventLogRepo for InMemoryPaymentEventLog {
    async fn record(&self, entry: &PaymentEventLogEntry) -> AppResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
