//! Bill-breakdown calculator for a residential solar + battery customer on a
//! seasonal time-of-use rate plan with demand charges.
//!
//! The whole calculation is one pure pass: a [`types::BillRequest`] plus the
//! static [`tables::RateTables`] produce twelve [`types::MonthRecord`]s and an
//! [`types::AnnualSummary`]. No state outlives a call.

pub mod engine;
pub mod error;
pub mod tables;
pub mod types;

pub use engine::calculate;
pub use error::BillingError;
