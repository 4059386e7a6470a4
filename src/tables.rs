//! Static tariff reference data.
//!
//! Everything here is normalized once inside [`RateTables::standard`] and
//! read-only afterwards; lookups never sort or mutate, so the shared
//! [`STANDARD`] instance is safe to use from any number of calculations.

use std::sync::LazyLock;

use crate::types::{Month, Season};

/// Battery capacities (kWh) with a column in the demand matrix. Position in
/// this list is the column index.
pub const BATTERY_CAPACITIES: [u32; 9] = [5, 10, 15, 20, 25, 30, 35, 40, 45];

/// Assumed battery cycling days per billing month.
pub const DAYS_PER_MONTH: f64 = 22.0;

/// A pair of per-season values.
#[derive(Debug, Clone, PartialEq)]
pub struct PerSeason<T> {
    pub winter: T,
    pub summer: T,
}

impl<T> PerSeason<T> {
    pub fn get(&self, season: Season) -> &T {
        match season {
            Season::Winter => &self.winter,
            Season::Summer => &self.summer,
        }
    }
}

/// Time-of-use energy rates in $/kWh. On-peak is the 4pm-7pm window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRate {
    pub on_peak: f64,
    pub off_peak: f64,
}

/// Fraction of a month's consumption attributed to each pricing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakSplit {
    pub on_peak: f64,
    pub off_peak: f64,
}

/// One demand-charge tier: `limit` kW billed at `rate` $/kW. `None` marks
/// the unbounded tail tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandTier {
    pub limit: Option<f64>,
    pub rate: f64,
}

/// One demand-matrix row: billed demand (kW) per battery column, applying to
/// annual consumption up to `yearly` kWh.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandRow {
    pub yearly: f64,
    pub values: [f64; 9],
}

/// Flat monthly service charge, stepped on panel amperage at 200 A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceCharges {
    pub up_to_200a: f64,
    pub over_200a: f64,
}

/// The full normalized tariff.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    winter_months: [Month; 6],
    summer_months: [Month; 6],
    peak_solar_factors: [f64; 12],
    pub energy_rates: PerSeason<EnergyRate>,
    pub peak_split: PerSeason<PeakSplit>,
    pub solar_credit_rate: f64,
    pub demand_tiers: PerSeason<Vec<DemandTier>>,
    pub demand_matrix: PerSeason<Vec<DemandRow>>,
    pub service_charges: ServiceCharges,
}

impl RateTables {
    /// The standard residential solar/battery tariff.
    pub fn standard() -> Self {
        let mut tables = Self {
            winter_months: [
                Month::January,
                Month::February,
                Month::March,
                Month::April,
                Month::November,
                Month::December,
            ],
            summer_months: [
                Month::May,
                Month::June,
                Month::July,
                Month::August,
                Month::September,
                Month::October,
            ],
            // Share of monthly solar generation falling in the 4pm-7pm
            // window, January through December.
            peak_solar_factors: [
                0.0443, 0.0679, 0.0988, 0.1315, 0.3555, 0.3636, 0.3654, 0.3609, 0.3311, 0.2982,
                0.0656, 0.0511,
            ],
            energy_rates: PerSeason {
                winter: EnergyRate {
                    on_peak: 0.09932,
                    off_peak: 0.05938,
                },
                summer: EnergyRate {
                    on_peak: 0.14227,
                    off_peak: 0.05943,
                },
            },
            peak_split: PerSeason {
                winter: PeakSplit {
                    on_peak: 0.20,
                    off_peak: 0.80,
                },
                summer: PeakSplit {
                    on_peak: 0.25,
                    off_peak: 0.75,
                },
            },
            solar_credit_rate: 0.06857,
            demand_tiers: PerSeason {
                winter: vec![DemandTier {
                    limit: None,
                    rate: 13.747,
                }],
                summer: vec![DemandTier {
                    limit: None,
                    rate: 19.585,
                }],
            },
            demand_matrix: PerSeason {
                winter: winter_demand_matrix(),
                summer: summer_demand_matrix(),
            },
            service_charges: ServiceCharges {
                up_to_200a: 32.44,
                over_200a: 45.44,
            },
        };
        tables.normalize();
        tables
    }

    /// Sort the demand matrices ascending by yearly threshold. Done once at
    /// construction so lookups stay read-only.
    fn normalize(&mut self) {
        for rows in [
            &mut self.demand_matrix.winter,
            &mut self.demand_matrix.summer,
        ] {
            rows.sort_by(|a, b| a.yearly.total_cmp(&b.yearly));
        }
    }

    /// Classify a month into its billing season. Membership is checked
    /// against the winter list first; a month in neither list (impossible
    /// for the standard tariff, where the two lists cover the calendar)
    /// falls back to winter.
    pub fn season_for_month(&self, month: Month) -> Season {
        if self.winter_months.contains(&month) {
            Season::Winter
        } else if self.summer_months.contains(&month) {
            Season::Summer
        } else {
            Season::Winter
        }
    }

    pub fn peak_solar_factor(&self, month: Month) -> f64 {
        self.peak_solar_factors[month.index()]
    }
}

fn winter_demand_matrix() -> Vec<DemandRow> {
    [
        (15000.0, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (18000.0, [2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (21000.0, [3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (24000.0, [4.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (27000.0, [5.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (30000.0, [6.0, 4.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (33000.0, [7.0, 5.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        (36000.0, [8.0, 6.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0]),
        (39000.0, [9.0, 7.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0]),
        (42000.0, [10.0, 8.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]),
        (45000.0, [11.0, 9.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]),
        (48000.0, [12.0, 10.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0]),
        (51000.0, [13.0, 11.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0]),
    ]
    .into_iter()
    .map(|(yearly, values)| DemandRow { yearly, values })
    .collect()
}

fn summer_demand_matrix() -> Vec<DemandRow> {
    [
        (15000.0, [3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (18000.0, [4.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (21000.0, [5.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (24000.0, [6.0, 4.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (27000.0, [7.0, 5.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        (30000.0, [8.0, 6.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0]),
        (33000.0, [9.0, 7.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0]),
        (36000.0, [10.0, 8.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]),
        (39000.0, [11.0, 9.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]),
        (42000.0, [12.0, 10.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0]),
        (45000.0, [13.0, 11.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0]),
        (48000.0, [14.0, 12.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0]),
        (51000.0, [15.0, 13.0, 11.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0]),
    ]
    .into_iter()
    .map(|(yearly, values)| DemandRow { yearly, values })
    .collect()
}

/// The standard tariff, built once per process.
pub static STANDARD: LazyLock<RateTables> = LazyLock::new(RateTables::standard);
