pub mod checkout;
pub mod plan_reconciler;
pub mod subscription;
pub mod webhook_ingest;
