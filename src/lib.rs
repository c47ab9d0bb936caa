//! # Congestion Tax Service
//!
//! Daily congestion tax calculation for the Gothenburg toll zone.
//!
//! ## Architecture
//!
//! - **domain**: the tax evaluator — fee schedule, toll-free calendar,
//!   vehicle categories and the single-charge interval grouper
//! - **api**: REST API with Swagger documentation
//! - **config**: TOML application configuration
//!
//! The domain is pure and synchronous; one [`TaxCalculator`] is shared
//! by reference across all concurrent requests.

pub mod api;
pub mod config;
pub mod domain;

pub use config::{default_config_path, AppConfig};
pub use domain::{TaxCalculator, TaxPolicy, VehicleCategory};

// Re-export API router
pub use api::create_api_router;
