//! The billing calculation: demand lookups, tiered demand charges, the
//! per-month energy loop, and the annual rollup.

use crate::error::BillingError;
use crate::tables::{
    BATTERY_CAPACITIES, DAYS_PER_MONTH, DemandTier, EnergyRate, PeakSplit, RateTables,
    ServiceCharges,
};
use crate::types::{AnnualSummary, BillBreakdown, BillRequest, Month, MonthRecord, Season};

/// Demand-matrix column index for a battery capacity.
fn battery_slot(capacity: u32) -> Result<usize, BillingError> {
    BATTERY_CAPACITIES
        .iter()
        .position(|&c| c == capacity)
        .ok_or(BillingError::InvalidBatteryCapacity(capacity))
}

/// Billed demand (kW) for a season: the matrix row with the nearest yearly
/// threshold at or above `total_consumption`, read at the battery's column.
/// Constant across all months sharing the season.
pub fn demand_value(
    tables: &RateTables,
    total_consumption: f64,
    battery_capacity: u32,
    season: Season,
) -> Result<f64, BillingError> {
    let slot = battery_slot(battery_capacity)?;
    let row = tables
        .demand_matrix
        .get(season)
        .iter()
        .find(|row| row.yearly >= total_consumption)
        .ok_or(BillingError::DemandLookupExhausted {
            consumption: total_consumption,
            season,
        })?;
    Ok(row.values[slot])
}

/// Walk the season's tiers in order, charging each finite tier up to its
/// limit and the unbounded tail tier for whatever demand remains.
pub fn demand_charge(tiers: &[DemandTier], demand_kw: f64) -> f64 {
    let mut charge = 0.0;
    let mut remaining = demand_kw;
    for tier in tiers {
        match tier.limit {
            Some(limit) if remaining > limit => {
                charge += limit * tier.rate;
                remaining -= limit;
            }
            _ => {
                charge += remaining * tier.rate;
                break;
            }
        }
    }
    charge
}

/// Flat monthly service charge: two-step function on panel amperage.
pub fn service_charge(charges: &ServiceCharges, amp_service: f64) -> f64 {
    if amp_service > 200.0 {
        charges.over_200a
    } else {
        charges.up_to_200a
    }
}

/// One month's time-of-use energy figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthEnergy {
    pub on_peak_consumption: f64,
    pub on_peak_solar: f64,
    pub off_peak_consumption: f64,
    pub off_peak_solar: f64,
    pub on_peak_net: f64,
    pub off_peak_net: f64,
    pub on_peak_cost: f64,
    pub off_peak_cost: f64,
    pub on_peak_credit: f64,
    pub off_peak_credit: f64,
}

/// Split a month's consumption and solar into the two pricing windows and
/// price the nets.
///
/// The battery offset is asymmetric on purpose: the battery discharges
/// on-peak (reducing on-peak net) and recharges off-peak (increasing
/// off-peak net). On-peak net is clamped at zero with the overshoot booked
/// as a credit; off-peak net keeps its sign, which selects cost versus
/// credit. Cost and credit are mutually exclusive per window.
pub fn month_energy(
    split: &PeakSplit,
    rates: &EnergyRate,
    peak_solar_factor: f64,
    consumption: f64,
    solar: f64,
    battery_offset: f64,
) -> MonthEnergy {
    let on_peak_consumption = consumption * split.on_peak;
    let on_peak_solar = solar * peak_solar_factor;
    let on_peak_raw = on_peak_consumption - on_peak_solar - battery_offset;
    let on_peak_net = on_peak_raw.max(0.0);
    let on_peak_cost = if on_peak_net > 0.0 {
        on_peak_net * rates.on_peak
    } else {
        0.0
    };
    let on_peak_credit = if on_peak_raw < 0.0 {
        on_peak_raw.abs() * rates.on_peak
    } else {
        0.0
    };

    let off_peak_consumption = consumption * split.off_peak;
    let off_peak_solar = solar - on_peak_solar;
    let off_peak_net = off_peak_consumption - off_peak_solar + battery_offset;
    let off_peak_cost = if off_peak_net > 0.0 {
        off_peak_net * rates.off_peak
    } else {
        0.0
    };
    let off_peak_credit = if off_peak_net < 0.0 {
        off_peak_net.abs() * rates.off_peak
    } else {
        0.0
    };

    MonthEnergy {
        on_peak_consumption,
        on_peak_solar,
        off_peak_consumption,
        off_peak_solar,
        on_peak_net,
        off_peak_net,
        on_peak_cost,
        off_peak_cost,
        on_peak_credit,
        off_peak_credit,
    }
}

/// Run the full bill calculation: twelve month records in calendar order
/// plus the annual summary. Pure; neither the tables nor the request are
/// touched.
pub fn calculate(
    tables: &RateTables,
    request: &BillRequest,
) -> Result<BillBreakdown, BillingError> {
    let battery_monthly = f64::from(request.battery_capacity) * DAYS_PER_MONTH;

    let mut breakdown = Vec::with_capacity(12);
    let mut total_service_charge = 0.0;
    let mut total_on_peak = 0.0;
    let mut total_off_peak = 0.0;
    let mut total_demand = 0.0;
    let mut total_credits = 0.0;
    let mut annual_consumption = 0.0;
    let mut solar_generation = 0.0;

    for month in Month::ALL {
        let month_consumption = request.monthly_consumption.get(month);
        let month_solar = request.monthly_solar_generation.get(month);
        annual_consumption += month_consumption;
        solar_generation += month_solar;

        let season = tables.season_for_month(month);
        let demand_kw = demand_value(
            tables,
            request.total_consumption,
            request.battery_capacity,
            season,
        )?;

        let rates = tables.energy_rates.get(season);
        let split = tables.peak_split.get(season);
        let energy = month_energy(
            split,
            rates,
            tables.peak_solar_factor(month),
            month_consumption,
            month_solar,
            battery_monthly,
        );

        let demand = demand_charge(tables.demand_tiers.get(season), demand_kw);
        let service = service_charge(&tables.service_charges, request.amp_service);

        // Net-metering credit, recomputed from whole-month figures rather
        // than the window nets; signed, so a post-battery deficit raises the
        // bill. Matches the published tariff example.
        let solar_credits =
            (month_consumption - month_solar - battery_monthly) * tables.solar_credit_rate;

        let final_month_cost =
            service + energy.on_peak_cost + energy.off_peak_cost + demand - solar_credits;

        total_service_charge += service;
        total_on_peak += energy.on_peak_cost;
        total_off_peak += energy.off_peak_cost;
        total_demand += demand;
        total_credits += energy.on_peak_credit + energy.off_peak_credit;

        breakdown.push(MonthRecord {
            month,
            season,
            month_consumption,
            month_solar,
            on_peak_consumption: energy.on_peak_consumption,
            on_peak_solar: energy.on_peak_solar,
            off_peak_consumption: energy.off_peak_consumption,
            off_peak_solar: energy.off_peak_solar,
            battery_used: battery_monthly,
            on_peak_net: energy.on_peak_net,
            off_peak_net: energy.off_peak_net,
            on_peak_rate: rates.on_peak,
            off_peak_rate: rates.off_peak,
            on_peak_cost: energy.on_peak_cost,
            off_peak_cost: energy.off_peak_cost,
            on_peak_credit: energy.on_peak_credit,
            off_peak_credit: energy.off_peak_credit,
            demand_charge: demand,
            service_charge: service,
            solar_credits,
            final_month_cost,
        });
    }

    let grand_total =
        total_service_charge + total_on_peak + total_off_peak + total_demand - total_credits;

    let summary = AnnualSummary {
        annual_consumption,
        solar_generation,
        battery_capacity: request.battery_capacity,
        amp_service: request.amp_service,
        total_service_charge,
        total_on_peak_cost: total_on_peak,
        total_off_peak_cost: total_off_peak,
        total_demand_cost: total_demand,
        total_credits,
        grand_total,
        grand_total_monthly: grand_total / 12.0,
    };

    Ok(BillBreakdown { breakdown, summary })
}
