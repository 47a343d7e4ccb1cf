mod census;
mod event_log;
mod patient_queue;
mod sim;
mod types;

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::event_log::EventLog;
use crate::sim::SimConfig;

struct StartupInput {
    patients: u32,
    output_file: String,
}

/// Two recognized forms: `<patients> <output-file>`, or `-i <input-file>`
/// where the file holds the patient count and the output file name.
fn parse_startup(args: &[String]) -> Option<StartupInput> {
    if args.len() != 2 {
        return None;
    }
    if args[0] == "-i" {
        let contents = fs::read_to_string(&args[1]).ok()?;
        let mut fields = contents.split_whitespace();
        let patients = fields.next()?.parse().ok()?;
        let output_file = fields.next()?.to_string();
        Some(StartupInput {
            patients,
            output_file,
        })
    } else {
        let patients = args[0].parse().ok()?;
        Some(StartupInput {
            patients,
            output_file: args[1].clone(),
        })
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(input) = parse_startup(&args) else {
        // Startup problems never fail the process: report and run nothing.
        println!("Incorrect input format");
        return;
    };

    let log = match EventLog::create(Path::new(&input.output_file)) {
        Ok(log) => Arc::new(log),
        Err(err) => {
            eprintln!("failed to open output file {}: {err}", input.output_file);
            return;
        }
    };

    let config = SimConfig::new(input.patients);
    let report = sim::run_hospital(&config, &log);

    println!("HOSPITAL SUMMARY");
    println!("patients={} departed={}", report.patients, report.departed);
    println!("elapsed_ms={:.2}", report.elapsed_ms);
    let cpu_user = report
        .cpu_user_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());
    let cpu_sys = report
        .cpu_sys_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());
    println!("cpu_user_s={cpu_user} cpu_sys_s={cpu_sys}");
}
