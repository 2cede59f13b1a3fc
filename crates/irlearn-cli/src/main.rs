//! irlearn CLI entry point.

mod args;
mod capture;
mod output;
mod prompt;
mod wizard;

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use irlearn_core::{
    build, CaptureError, Catalog, DeviceInfo, DeviceProfile, DocumentError, FanMode, LearnError,
    Learner, ModeSelection, OperationMode, PresetMode, ProfileError, SwingMode,
};
use tracing::{error, info};

use crate::args::{CaptureArgs, Cli, Commands, DeviceArgs, LearnArgs, SkeletonArgs};
use crate::capture::{CaptureBackend, CommandCapture, ReplayCapture};
use crate::output::{Destination, TracingAudit};
use crate::prompt::Terminal;
use crate::wizard::{ask_device_info, ask_profile};

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    // Logs go to stderr so stdout stays clean for the document.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        if let Some(hint) = hint_for(&e) {
            eprintln!("hint: {}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Learn(args) => run_learn(args),
        Commands::Skeleton(args) => run_skeleton(args),
        Commands::Catalog => {
            print_catalog::<OperationMode>();
            print_catalog::<PresetMode>();
            print_catalog::<FanMode>();
            print_catalog::<SwingMode>();
            Ok(())
        }
        Commands::Examples => {
            println!("{}", args::EXAMPLES_TEXT);
            Ok(())
        }
    }
}

fn run_learn(args: LearnArgs) -> Result<()> {
    learn(args, &mut Terminal::stdio())
}

/// The learn flow over any terminal.
fn learn<R: BufRead, W: Write>(args: LearnArgs, terminal: &mut Terminal<R, W>) -> Result<()> {
    // Fail on a bad destination or capture setup before the operator
    // spends time on the wizard.
    let destination = Destination::prepare(args.output.output, args.output.force)?;
    let mut backend = capture_backend(
        args.capture,
        Duration::from_secs(args.capture_timeout),
        args.token_pattern.as_deref(),
    )?;

    let (manufacturer, models) = ask_device_info(terminal, args.manufacturer, args.device.models)?;
    let info = DeviceInfo {
        manufacturer,
        supported_models: models,
        controller: args.device.controller,
        encoding: args.device.encoding,
    };
    let profile = ask_profile(terminal, info)?;
    let mut document = build(&profile);
    info!(
        "Learning {} commands for {}",
        document.leaf_count(),
        document.manufacturer()
    );

    terminal.say("")?;
    terminal.say("You will now be prompted to press the corresponding button on the remote for each command")?;

    let mut learner = Learner::new(&mut backend, &mut *terminal, TracingAudit);
    let summary = learner.learn(&mut document)?;
    info!(
        learned = summary.learned,
        rejected = summary.rejected,
        failed = summary.failed,
        "Learning complete"
    );

    destination.write(&document)?;
    if let Destination::File(path) = &destination {
        terminal.say(format_args!(
            "Done. {} commands written to {}",
            summary.learned,
            path.display()
        ))?;
    }
    Ok(())
}

fn run_skeleton(args: SkeletonArgs) -> Result<()> {
    let destination = Destination::prepare(args.output.output, args.output.force)?;
    let profile = DeviceProfile::new(
        device_info(args.manufacturer, args.device),
        ModeSelection {
            operation_modes: args.operation_modes,
            preset_modes: args.preset_modes,
            fan_modes: args.fan_modes,
            swing_modes: args.swing_modes,
        },
        args.min_temperature,
        args.max_temperature,
        args.precision,
    )?;

    let document = build(&profile);
    info!("Built skeleton with {} empty commands", document.leaf_count());
    destination.write(&document)
}

fn device_info(manufacturer: String, device: DeviceArgs) -> DeviceInfo {
    DeviceInfo {
        manufacturer,
        supported_models: device.models,
        controller: device.controller,
        encoding: device.encoding,
    }
}

fn capture_backend(
    args: CaptureArgs,
    timeout: Duration,
    token_pattern: Option<&str>,
) -> Result<CaptureBackend> {
    match (args.capture_command, args.replay) {
        (Some(command), _) => Ok(CaptureBackend::Command(CommandCapture::new(
            command,
            timeout,
            token_pattern,
        )?)),
        (None, Some(path)) => Ok(CaptureBackend::Replay(ReplayCapture::from_path(&path)?)),
        (None, None) => anyhow::bail!("Either --capture-command or --replay is required"),
    }
}

fn print_catalog<T: Catalog>() {
    let names: Vec<String> = T::choices().iter().map(ToString::to_string).collect();
    println!("{}s: {}", T::NAME, names.join(", "));
}

/// Find an operator hint anywhere in the error chain.
fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<LearnError>() {
            Some(e.hint())
        } else if let Some(e) = cause.downcast_ref::<ProfileError>() {
            Some(e.hint())
        } else if let Some(e) = cause.downcast_ref::<DocumentError>() {
            Some(e.hint())
        } else {
            cause.downcast_ref::<CaptureError>().map(CaptureError::hint)
        }
    })
}
