pub mod business_subscription;
pub mod payment_event;
pub mod payment_provider;
pub mod plan;
