use thiserror::Error;

use crate::types::Season;

/// Failures a bill calculation can hit. Both are terminal for the run and
/// propagate straight to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    /// The requested battery capacity has no column in the demand matrix.
    #[error("invalid battery capacity {0} kWh; choose from 5, 10, 15, 20, 25, 30, 35, 40, 45")]
    InvalidBatteryCapacity(u32),

    /// Annual consumption exceeds every row threshold in the season's matrix.
    #[error("no demand data for total consumption of {consumption} kWh in {season} season")]
    DemandLookupExhausted { consumption: f64, season: Season },
}
