use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{payment_provider::PaymentProvider, plan::Plan};

/// Identifier of a business in the directory. Owned by the directory, opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(pub String);

impl BusinessId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BusinessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PaymentStatus {
    #[default]
    Inactive,
    Active,
}

/// Subscription state stored on a business record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSubscription {
    pub business_id: BusinessId,
    pub payment_status: PaymentStatus,
    pub plan: Option<Plan>,
    pub start_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub last_payment_id: Option<String>,
}

impl BusinessSubscription {
    /// State of a freshly created business record.
    pub fn inactive(business_id: BusinessId) -> Self {
        Self {
            business_id,
            payment_status: PaymentStatus::Inactive,
            plan: None,
            start_date: None,
            expiration_date: None,
            last_payment_id: None,
        }
    }

    /// Read-time expiration check. Stored `ACTIVE` rows past their
    /// expiration are not active; nothing rewrites them.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.payment_status == PaymentStatus::Active
            && self.plan.is_some()
            && self.expiration_date.is_some_and(|exp| exp > now)
    }

    /// Whether `payment_id` is the payment that last activated this subscription
    pub fn was_activated_by(&self, payment_id: &str) -> bool {
        self.last_payment_id.as_deref() == Some(payment_id)
    }
}

/// Activation written by the reconciler in a single update.
///
/// `(provider, last_payment_id)` is the key of the applied-payments ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPatch {
    pub provider: PaymentProvider,
    pub plan: Plan,
    pub start_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub last_payment_id: String,
}

impl SubscriptionPatch {
    pub fn apply_to(&self, subscription: &mut BusinessSubscription) {
        subscription.payment_status = PaymentStatus::Active;
        subscription.plan = Some(self.plan);
        subscription.start_date = Some(self.start_date);
        subscription.expiration_date = Some(self.expiration_date);
        subscription.last_payment_id = Some(self.last_payment_id.clone());
    }
}
