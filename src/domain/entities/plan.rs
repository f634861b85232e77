use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Listing tier a business buys to appear in the Guia Comercial.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Plan {
    #[serde(rename = "FREE")]
    #[strum(to_string = "FREE")]
    Free,
    #[serde(rename = "INTERMEDIARIO", alias = "INTERMEDIATE")]
    #[strum(to_string = "INTERMEDIARIO", serialize = "INTERMEDIATE")]
    Intermediate,
    #[serde(rename = "PREMIUM")]
    #[strum(to_string = "PREMIUM")]
    Premium,
}

impl Plan {
    /// Validity of a paid plan in calendar months. `None` for the free tier.
    pub fn duration_months(&self) -> Option<u32> {
        match self {
            Plan::Free => None,
            Plan::Intermediate => Some(6),
            Plan::Premium => Some(12),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.duration_months().is_some()
    }

    /// Name shown to the payer and written into provider descriptions.
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Free => "Plano Gratuito",
            Plan::Intermediate => "Plano Intermediário",
            Plan::Premium => "Plano Premium",
        }
    }

    /// Expiration for a plan starting at `start`, using calendar-month arithmetic.
    ///
    /// Month ends clamp: 2024-08-31 + 6 months is 2025-02-28.
    pub fn expiration_from(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = self.duration_months()?;
        start.checked_add_months(Months::new(months))
    }

    /// Infer a paid plan from a free-text payment description.
    ///
    /// Case-insensitive substring match. Returns `None` when no plan name or
    /// more than one plan name appears.
    pub fn from_description(description: &str) -> Option<Plan> {
        let lowered = description.to_lowercase();
        let premium = lowered.contains("premium");
        let intermediate = lowered.contains("intermedi");
        match (premium, intermediate) {
            (true, false) => Some(Plan::Premium),
            (false, true) => Some(Plan::Intermediate),
            _ => None,
        }
    }
}
