//! API Handlers

use std::sync::Arc;

use crate::domain::TaxCalculator;

pub mod calendar;
pub mod health;
pub mod tariff;
pub mod tax;

/// Shared state for all API routes.
#[derive(Clone)]
pub struct ApiState {
    pub calculator: Arc<TaxCalculator>,
}

pub use calendar::*;
pub use health::*;
pub use tariff::*;
pub use tax::*;
