//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory port implementations for mocking persistence and providers
//! - Signed webhook payload builders
//! - `TestAppStateBuilder` for HTTP-level tests

mod app_state_builder;
mod directory_mocks;
mod factories;
mod provider_mocks;
mod webhook_payloads;

pub use app_state_builder::*;
pub use directory_mocks::*;
pub use factories::*;
pub use provider_mocks::*;
pub use webhook_payloads::*;
