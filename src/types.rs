use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar months, in billing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order; the engine iterates this so every
    /// run yields exactly one record per month, January first.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based calendar index (January = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Billing season. Every month belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Winter,
    Summer,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Season::Winter => "WINTER",
            Season::Summer => "SUMMER",
        })
    }
}

/// A full year of per-month figures (kWh). All twelve keys are required;
/// a missing month is a deserialization error, not a NaN downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValues {
    #[serde(rename = "January")]
    pub january: f64,
    #[serde(rename = "February")]
    pub february: f64,
    #[serde(rename = "March")]
    pub march: f64,
    #[serde(rename = "April")]
    pub april: f64,
    #[serde(rename = "May")]
    pub may: f64,
    #[serde(rename = "June")]
    pub june: f64,
    #[serde(rename = "July")]
    pub july: f64,
    #[serde(rename = "August")]
    pub august: f64,
    #[serde(rename = "September")]
    pub september: f64,
    #[serde(rename = "October")]
    pub october: f64,
    #[serde(rename = "November")]
    pub november: f64,
    #[serde(rename = "December")]
    pub december: f64,
}

impl MonthlyValues {
    pub fn get(&self, month: Month) -> f64 {
        match month {
            Month::January => self.january,
            Month::February => self.february,
            Month::March => self.march,
            Month::April => self.april,
            Month::May => self.may,
            Month::June => self.june,
            Month::July => self.july,
            Month::August => self.august,
            Month::September => self.september,
            Month::October => self.october,
            Month::November => self.november,
            Month::December => self.december,
        }
    }

    /// Fill every month with the same value. Handy for tests and flat-usage
    /// estimates.
    pub fn uniform(value: f64) -> Self {
        Self {
            january: value,
            february: value,
            march: value,
            april: value,
            may: value,
            june: value,
            july: value,
            august: value,
            september: value,
            october: value,
            november: value,
            december: value,
        }
    }

    pub fn total(&self) -> f64 {
        Month::ALL.iter().map(|&m| self.get(m)).sum()
    }
}

/// One bill calculation request, as supplied by the caller. Field names match
/// the JSON wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRequest {
    /// Installed battery capacity in kWh; must be one of 5, 10, ..., 45.
    pub battery_capacity: u32,
    /// Service panel amperage.
    pub amp_service: f64,
    pub monthly_consumption: MonthlyValues,
    pub monthly_solar_generation: MonthlyValues,
    /// Annual consumption used as the demand-matrix row key. Supplied by the
    /// caller and never reconciled against the monthly figures.
    pub total_consumption: f64,
}

/// Every intermediate quantity behind one month's bill line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    pub month: Month,
    pub season: Season,
    pub month_consumption: f64,
    pub month_solar: f64,
    pub on_peak_consumption: f64,
    pub on_peak_solar: f64,
    pub off_peak_consumption: f64,
    pub off_peak_solar: f64,
    /// Monthly battery throughput assumed against the bill (capacity x 22).
    pub battery_used: f64,
    pub on_peak_net: f64,
    pub off_peak_net: f64,
    pub on_peak_rate: f64,
    pub off_peak_rate: f64,
    pub on_peak_cost: f64,
    pub off_peak_cost: f64,
    pub on_peak_credit: f64,
    pub off_peak_credit: f64,
    pub demand_charge: f64,
    pub service_charge: f64,
    pub solar_credits: f64,
    pub final_month_cost: f64,
}

/// Year-end rollup of the twelve month records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSummary {
    /// Straight sum of the monthly consumption figures (not the caller's
    /// `totalConsumption`).
    pub annual_consumption: f64,
    pub solar_generation: f64,
    pub battery_capacity: u32,
    pub amp_service: f64,
    pub total_service_charge: f64,
    pub total_on_peak_cost: f64,
    pub total_off_peak_cost: f64,
    pub total_demand_cost: f64,
    /// On/off-peak credits only; solar credits are already netted into each
    /// month's `finalMonthCost`.
    pub total_credits: f64,
    pub grand_total: f64,
    pub grand_total_monthly: f64,
}

/// Full engine output: twelve records in calendar order plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillBreakdown {
    pub breakdown: Vec<MonthRecord>,
    pub summary: AnnualSummary,
}
