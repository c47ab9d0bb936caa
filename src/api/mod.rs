//! REST API module for the congestion tax service
//!
//! Provides HTTP endpoints for calculating the daily tax and inspecting
//! the active tariff and toll-free calendar.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ApiState;
pub use router::create_api_router;
