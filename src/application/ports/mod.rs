pub mod business_directory;
pub mod payment_provider;
