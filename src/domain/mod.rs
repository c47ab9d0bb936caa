pub mod calculator;
pub mod calendar;
pub mod error;
pub mod tariff;
pub mod vehicle;

// Re-export commonly used types
pub use calculator::{ChargeGroup, TaxBreakdown, TaxCalculator, TaxPolicy};
pub use calendar::TollCalendar;
pub use error::{DomainError, DomainResult};
pub use tariff::{FeeInterval, FeeSchedule};
pub use vehicle::{UnknownCategory, VehicleCategory, TOLL_FREE_CATEGORIES};
