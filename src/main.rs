use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process;

use solar_rateplan::tables;
use solar_rateplan::types::BillRequest;

fn main() -> Result<(), Box<dyn Error>> {
    let mut path: Option<String> = None;
    let mut as_json = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            other if path.is_none() => path = Some(other.to_string()),
            other => {
                eprintln!("Unexpected argument: {}", other);
                eprintln!("Usage: solar_rateplan [REQUEST.json] [--json]");
                process::exit(2);
            }
        }
    }
    let path = path.unwrap_or_else(|| "request.json".to_string());

    let file = File::open(&path)?;
    let request: BillRequest = serde_json::from_reader(BufReader::new(file))?;

    let bill = solar_rateplan::calculate(&tables::STANDARD, &request)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&bill)?);
        return Ok(());
    }

    println!("Solar Rate Plan Bill Breakdown:\n");
    println!(
        "Battery Capacity: {} kWh   Service: {} A   Annual Consumption (matrix key): {:.0} kWh\n",
        request.battery_capacity, request.amp_service, request.total_consumption
    );

    println!("Monthly Breakdown:");
    for record in &bill.breakdown {
        println!("  {} ({}):", record.month, record.season);
        println!(
            "    Consumption: {:.2} kWh   Solar: {:.2} kWh   Battery Used: {:.2} kWh",
            record.month_consumption, record.month_solar, record.battery_used
        );
        println!(
            "    On-Peak Net: {:.2} kWh @ ${:.5}/kWh = ${:.2}",
            record.on_peak_net, record.on_peak_rate, record.on_peak_cost
        );
        println!(
            "    Off-Peak Net: {:.2} kWh @ ${:.5}/kWh = ${:.2}",
            record.off_peak_net, record.off_peak_rate, record.off_peak_cost
        );
        if record.on_peak_credit > 0.0 || record.off_peak_credit > 0.0 {
            println!(
                "    TOU Credits: on-peak ${:.2}, off-peak ${:.2}",
                record.on_peak_credit, record.off_peak_credit
            );
        }
        println!("    Demand Charge: ${:.2}", record.demand_charge);
        println!("    Service Charge: ${:.2}", record.service_charge);
        println!("    Solar Credits: ${:.2}", record.solar_credits);
        println!("    Month Total: ${:.2}\n", record.final_month_cost);
    }

    let summary = &bill.summary;
    println!("Annual Summary:");
    println!(
        "   Consumption: {:.2} kWh   Solar Generation: {:.2} kWh",
        summary.annual_consumption, summary.solar_generation
    );
    println!("   Service Charges: ${:.2}", summary.total_service_charge);
    println!("   On-Peak Energy:  ${:.2}", summary.total_on_peak_cost);
    println!("   Off-Peak Energy: ${:.2}", summary.total_off_peak_cost);
    println!("   Demand Charges:  ${:.2}", summary.total_demand_cost);
    println!("   TOU Credits:     ${:.2}", summary.total_credits);
    println!("   Grand Total:     ${:.2}", summary.grand_total);
    println!("   Monthly Average: ${:.2}", summary.grand_total_monthly);

    Ok(())
}
