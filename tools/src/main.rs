//! swing-runner: headless driver for the SwingViz dashboard core.
//!
//! Usage:
//!   swing-runner --seed 12345 --pattern hybrid --amplitude 3.5
//!   swing-runner --csv prices.csv --json
//!   swing-runner --seed 12345 --ipc-mode

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use swingviz_core::{
    command::ControlCommand,
    config::{DashboardConfig, SimulationParams},
    pattern::SwingPattern,
    session::DashboardSession,
    source::{CsvSource, MarketDataSource, SyntheticSource},
    view::DashboardView,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_out = args.iter().any(|a| a == "--json");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let csv_path = flag_value(&args, "--csv");

    let config = DashboardConfig::load_or_default(data_dir)?;
    let seed = flag_value(&args, "--seed")
        .map(str::parse::<u64>)
        .transpose()?
        .or(config.seed);
    let params = params_from_args(&args, config.params)?;

    let source: Box<dyn MarketDataSource> = match csv_path {
        Some(path) => Box::new(CsvSource::new(path)),
        None => Box::new(SyntheticSource::new(config.generator.clone())),
    };

    if !ipc_mode && !json_out {
        println!("SwingViz — swing-runner");
        println!("  data_dir:  {data_dir}");
        println!("  source:    {}", csv_path.unwrap_or("synthetic"));
        println!();
    }

    let mut session = DashboardSession::new(source, params, seed)?;

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else if json_out {
        println!("{}", serde_json::to_string_pretty(&session.view()?)?);
    } else {
        print_summary(&session.view()?);
    }

    Ok(())
}

fn run_ipc_loop(session: &mut DashboardSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: serde_json::Value = match serde_json::from_str(&buffer) {
            Ok(v) => v,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match request["cmd"].as_str().unwrap_or_default() {
            "quit" => break,
            "get_state" => write_view(&mut stdout, session)?,
            other => match serde_json::from_value::<ControlCommand>(request.clone()) {
                Ok(command) => match session.apply_command(command) {
                    Ok(()) => write_view(&mut stdout, session)?,
                    Err(e) => write_error(&mut stdout, &e.to_string())?,
                },
                Err(e) if ControlCommand::is_known(other) => {
                    log::warn!("Malformed {other} command: {e}");
                    write_error(&mut stdout, &format!("malformed '{other}' command: {e}"))?;
                }
                Err(_) => {
                    log::warn!("Unknown command: {other}");
                    write_error(&mut stdout, &format!("unknown command '{other}'"))?;
                }
            },
        }
    }
    Ok(())
}

fn write_view(out: &mut impl Write, session: &DashboardSession) -> Result<()> {
    let view = session.view()?;
    writeln!(out, "{}", serde_json::to_string(&view)?)?;
    out.flush()?;
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_summary(view: &DashboardView) {
    let prices = &view.price_chart.series[0].values;
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    println!("=== SESSION ===");
    println!("  session_id:  {}", view.session_id);
    println!("  seed:        {}", view.seed);
    println!("  pattern:     {}", view.pattern_label);
    println!("  frequency:   {}", view.params.frequency);
    if let (Some(first), Some(last)) = (view.price_chart.x.first(), view.price_chart.x.last()) {
        println!("  dates:       {first} .. {last}");
    }

    println!();
    println!("=== METRICS ===");
    for metric in [&view.metrics.avg_drift, &view.metrics.volatility_index, &view.metrics.sample_size] {
        println!("  {:<17} {}", format!("{}:", metric.label), metric.value);
    }

    println!();
    println!("=== {} ===", view.price_chart.title);
    if let (Some(first), Some(last)) = (prices.first(), prices.last()) {
        println!("  first: ${first:.2} | last: ${last:.2} | min: ${min:.2} | max: ${max:.2}");
    }
    for chart in [&view.range_chart, &view.volume_chart] {
        let names: Vec<&str> = chart.series.iter().map(|s| s.name).collect();
        println!("  {}: {}", chart.title, names.join(", "));
    }
}

fn params_from_args(args: &[String], defaults: SimulationParams) -> Result<SimulationParams> {
    let pattern = match flag_value(args, "--pattern") {
        Some(p) => SwingPattern::parse(p)?,
        None => defaults.pattern,
    };
    let params = SimulationParams {
        pattern,
        amplitude: parse_arg(args, "--amplitude", defaults.amplitude)?,
        frequency: parse_arg(args, "--frequency", defaults.frequency)?,
        drift:     parse_arg(args, "--drift", defaults.drift)?,
    };
    params.validate()?;
    Ok(params)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match flag_value(args, flag) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(default),
    }
}
