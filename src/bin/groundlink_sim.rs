use clap::{App, Arg};
use colored::*;

use cubesat_groundlink::sim::config::SimulationConfig;
use cubesat_groundlink::sim::scenarios::{detumble, eclipse, ground_pass, nominal, safe_mode};
use cubesat_groundlink::sim::time::Epoch;

const DEFAULT_DT_S: &str = "1.0";
const DEFAULT_SCENARIO: &str = "nominal";

fn main() {
    tracing_subscriber::fmt::init();

    let matches = App::new("groundlink-sim")
        .version("0.1.0")
        .author("Space Systems Engineering Team")
        .about("🛰️  Deterministic CubeSat flight-software simulation core")
        .arg(
            Arg::with_name("duration")
                .long("duration")
                .value_name("SECONDS")
                .help("Simulation duration in seconds (overrides the scenario default)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dt")
                .long("dt")
                .value_name("SECONDS")
                .help("Fixed integration step in seconds")
                .takes_value(true)
                .default_value(DEFAULT_DT_S),
        )
        .arg(
            Arg::with_name("scenario")
                .long("scenario")
                .value_name("NAME")
                .help("Scenario to run")
                .takes_value(true)
                .possible_values(&["nominal", "detumble", "eclipse", "safe-mode", "ground-pass"])
                .default_value(DEFAULT_SCENARIO),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("RNG seed for randomised scenarios (detumble)")
                .takes_value(true)
                .default_value("1"),
        )
        .get_matches();

    let scenario = matches.value_of("scenario").unwrap_or(DEFAULT_SCENARIO);
    let seed: u64 = match matches.value_of("seed").unwrap_or("1").parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("{}", "error: --seed must be an integer".red());
            std::process::exit(1);
        }
    };

    let start_epoch = Epoch::from_unix_seconds(1_700_000_000.0);

    let mut config = match scenario {
        "nominal" => SimulationConfig::nominal(),
        "detumble" => SimulationConfig::detumble(),
        "eclipse" => SimulationConfig::eclipse(),
        "safe-mode" => SimulationConfig::safe_mode(),
        "ground-pass" => SimulationConfig::ground_pass(),
        other => {
            eprintln!("{}", format!("error: unknown scenario '{other}'").red());
            std::process::exit(1);
        }
    };

    if let Some(duration_str) = matches.value_of("duration") {
        match duration_str.parse::<f64>() {
            Ok(duration_s) => config.duration_s = duration_s,
            Err(_) => {
                eprintln!("{}", "error: --duration must be a number".red());
                std::process::exit(1);
            }
        }
    }
    match matches.value_of("dt").unwrap_or(DEFAULT_DT_S).parse::<f64>() {
        Ok(dt_s) => config.dt_s = dt_s,
        Err(_) => {
            eprintln!("{}", "error: --dt must be a number".red());
            std::process::exit(1);
        }
    }

    let (success, summary) = match scenario {
        "nominal" => {
            let outcome = nominal::run(start_epoch, config);
            (outcome.success, outcome.summary)
        }
        "detumble" => {
            let outcome = detumble::run(start_epoch, seed, config);
            (outcome.success, outcome.summary)
        }
        "eclipse" => {
            let report = eclipse::run(start_epoch, config);
            (report.outcome.success, report.outcome.summary)
        }
        "safe-mode" => {
            let outcome = safe_mode::run(start_epoch, config);
            (outcome.success, outcome.summary)
        }
        "ground-pass" => {
            let report = ground_pass::run(start_epoch, config);
            (report.outcome.success, report.outcome.summary)
        }
        _ => unreachable!("scenario already validated above"),
    };

    if success {
        println!("{} {}", "ok".green().bold(), summary);
        std::process::exit(0);
    } else {
        println!("{} {}", "fail".red().bold(), summary);
        std::process::exit(2);
    }
}
