//! GX Input - replay and inspection tool
//!
//! Replays recorded raw controller traces through the input driver and
//! prints what the frontend would see each cycle.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod trace;

use gx_input::input::{describe, generate_defaults, ScriptedSource};
use gx_input::{
    AxisCode, DeviceKind, InputConfig, InputDriver, InputSnapshot, PhysicalCode, PollOutcome,
    Port,
};
use trace::Trace;

/// GX Input - replay raw controller traces through the input layer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["trace", "bindings", "describe"])))]
struct Args {
    /// Replay a YAML trace of raw samples
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Print replay cycles as JSON lines
    #[arg(long)]
    json: bool,

    /// Print the default binding table for a device family
    #[arg(long, value_name = "KIND")]
    bindings: Option<String>,

    /// Describe a physical code: button bit, "none", or axis like "2+"
    #[arg(long, value_name = "CODE")]
    describe: Option<String>,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.log_json)?;

    if let Some(kind) = &args.bindings {
        let kind: DeviceKind = kind.parse().map_err(anyhow::Error::msg)?;
        print_bindings(kind);
        return Ok(());
    }

    if let Some(code) = &args.describe {
        let code = parse_code(code)?;
        println!("{}", describe(code));
        return Ok(());
    }

    if let Some(path) = &args.trace {
        let config = match &args.config {
            Some(path) => {
                info!("Configuration file: {}", path.display());
                InputConfig::load(path)?
            }
            None => InputConfig::default(),
        };
        replay(path, &config, args.json)?;
    }

    Ok(())
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {}", level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

/// Parse `--describe` input: `none`, a button bit, or `<axis><+|->`
fn parse_code(input: &str) -> Result<PhysicalCode> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("none") || input.eq_ignore_ascii_case("unbound") {
        return Ok(PhysicalCode::Unbound);
    }

    if let Some(index) = input.strip_suffix('+') {
        let index: u8 = index.parse().with_context(|| format!("Bad axis index: {}", input))?;
        return Ok(PhysicalCode::Axis(AxisCode::positive(index)));
    }
    if let Some(index) = input.strip_suffix('-') {
        let index: u8 = index.parse().with_context(|| format!("Bad axis index: {}", input))?;
        return Ok(PhysicalCode::Axis(AxisCode::negative(index)));
    }

    let raw: u16 = input
        .parse()
        .with_context(|| format!("Expected a button bit, \"none\" or an axis like 0+: {}", input))?;
    Ok(PhysicalCode::from_raw(raw))
}

fn print_bindings(kind: DeviceKind) {
    println!("\n{}", format!("=== {} ===", kind.display_name()).bold().cyan());
    for entry in generate_defaults(kind).entries() {
        let label = describe(entry.code);
        let label = if entry.code.is_bound() {
            label.green()
        } else {
            label.dimmed()
        };
        println!("  {:<14} {}", entry.function.to_string(), label);
    }
}

#[derive(Serialize)]
struct CycleRecord<'a> {
    cycle: u64,
    outcome: &'a PollOutcome,
    snapshot: &'a InputSnapshot,
}

fn replay(path: &Path, config: &InputConfig, json: bool) -> Result<()> {
    let trace = Trace::load(path)?;
    info!("Replaying {} cycle(s) from {}", trace.cycles(), path.display());

    let mut driver = InputDriver::new(ScriptedSource::new(), config)?;
    let reset = driver.reset_handle();
    let power_down = driver.power_down_handle();

    let mut cycle = 0u64;
    for frame in &trace.frames {
        frame.stage(driver.source_mut())?;
        for _ in 0..frame.repeat {
            if frame.reset {
                reset.raise();
            }
            if frame.power_down {
                power_down.raise();
            }

            let outcome = driver.poll();
            let snapshot = driver.snapshot();
            cycle += 1;

            if json {
                let record = CycleRecord {
                    cycle,
                    outcome: &outcome,
                    snapshot: &snapshot,
                };
                println!("{}", serde_json::to_string(&record)?);
            } else {
                print_cycle(&driver, cycle, &outcome, &snapshot);
            }
        }
    }

    Ok(())
}

fn print_cycle(
    driver: &InputDriver<ScriptedSource>,
    cycle: u64,
    outcome: &PollOutcome,
    snapshot: &InputSnapshot,
) {
    let mut header = format!("cycle {}", cycle).bold().to_string();
    if outcome.menu_toggle {
        header.push_str(&format!(" {}", "MENU".yellow().bold()));
    }
    if outcome.reset_requested {
        header.push_str(&format!(" {}", "RESET".red()));
    }
    if outcome.power_down_requested {
        header.push_str(&format!(" {}", "POWER".red()));
    }
    println!("{}", header);

    for port in Port::all() {
        let state = snapshot.port(port);
        if !state.is_connected() {
            continue;
        }
        let [left, right] = state.analog;
        println!(
            "  {} {} [{}] L({}, {}) R({}, {})",
            port.to_string().cyan(),
            state.kind,
            driver
                .device_name(u8::from(port))
                .unwrap_or_default()
                .dimmed(),
            left.x,
            left.y,
            right.x,
            right.y
        );
        println!("    {}", state.mask.to_string().green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gx_input::LogicalButton;

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code("none").unwrap(), PhysicalCode::Unbound);
        assert_eq!(parse_code("0").unwrap(), LogicalButton::GcA.into());
        assert_eq!(parse_code("65535").unwrap(), PhysicalCode::Unbound);
        assert_eq!(
            parse_code("2+").unwrap(),
            PhysicalCode::Axis(AxisCode::positive(2))
        );
        assert_eq!(
            parse_code("1-").unwrap(),
            PhysicalCode::Axis(AxisCode::negative(1))
        );
        assert!(parse_code("left").is_err());
    }
}
