//! CLI argument parsing with clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use irlearn_core::profile::{DEFAULT_CONTROLLER, DEFAULT_ENCODING};
use irlearn_core::{FanMode, OperationMode, Precision, PresetMode, SwingMode, Temperature};

/// Learn infrared codes for an air conditioner.
///
/// Walks through every combination of operation, preset, fan and swing mode
/// and temperature, captures the matching remote button press, and writes a
/// SmartIR climate code file.
#[derive(Debug, Parser)]
#[command(name = "irlearn", version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactively learn every command and write the code file
    #[command(after_help = "\
Examples:
  irlearn learn --capture-command 'broadlink_cli --device @ac.device --learn' \\
      --token-pattern \"Base64: b'([^']+)'\" -o 1000.json
  irlearn learn --manufacturer Daikin --model FTXM20R --replay codes.txt
  IRLEARN_CAPTURE_COMMAND=./learn.sh irlearn learn -o 1000.json --force")]
    Learn(LearnArgs),

    /// Write the empty code file for a set of modes without learning anything
    #[command(after_help = "\
Examples:
  irlearn skeleton --manufacturer Daikin --operation-modes cool,heat \\
      --preset-modes none --fan-modes auto,level1,level2 --swing-modes off \\
      --min-temperature 16 --max-temperature 30
  irlearn skeleton --manufacturer Gree --operation-modes cool --precision 0.5 -o gree.json")]
    Skeleton(SkeletonArgs),

    /// List the selectable modes
    Catalog,

    /// Show an end-to-end usage example
    Examples,
}

/// Device identity shared by `learn` and `skeleton`.
#[derive(Debug, clap::Args)]
pub struct DeviceArgs {
    /// Controller written to supportedController
    #[arg(long, default_value = DEFAULT_CONTROLLER)]
    pub controller: String,

    /// Encoding written to commandsEncoding
    #[arg(long, default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    /// Supported model identifier (repeatable)
    #[arg(long = "model", value_name = "MODEL")]
    pub models: Vec<String>,
}

/// Where the document is written.
#[derive(Debug, clap::Args)]
pub struct OutputArgs {
    /// Write the document to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, clap::Args)]
pub struct LearnArgs {
    /// Manufacturer name (prompted when omitted)
    #[arg(long)]
    pub manufacturer: Option<String>,

    #[command(flatten)]
    pub device: DeviceArgs,

    #[command(flatten)]
    pub capture: CaptureArgs,

    /// Seconds to wait for each capture command
    #[arg(
        long,
        env = "IRLEARN_CAPTURE_TIMEOUT",
        default_value_t = 30,
        value_name = "SECS"
    )]
    pub capture_timeout: u64,

    /// Regex extracting the code from the capture command output
    /// (first group, or the whole match; default: last non-empty line)
    #[arg(long, env = "IRLEARN_TOKEN_PATTERN", value_name = "REGEX")]
    pub token_pattern: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Exactly one capture backend.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct CaptureArgs {
    /// Shell command that learns one code and prints it
    #[arg(long, env = "IRLEARN_CAPTURE_COMMAND", value_name = "CMD")]
    pub capture_command: Option<String>,

    /// Read codes from a file, one per line, in learning order
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct SkeletonArgs {
    /// Manufacturer name
    #[arg(long)]
    pub manufacturer: String,

    #[command(flatten)]
    pub device: DeviceArgs,

    /// Operation modes, in order (off is always included separately)
    #[arg(long, value_delimiter = ',', value_name = "MODES")]
    pub operation_modes: Vec<OperationMode>,

    /// Preset modes, in order
    #[arg(long, value_delimiter = ',', value_name = "MODES")]
    pub preset_modes: Vec<PresetMode>,

    /// Fan modes, in order
    #[arg(long, value_delimiter = ',', value_name = "MODES")]
    pub fan_modes: Vec<FanMode>,

    /// Swing modes, in order
    #[arg(long, value_delimiter = ',', value_name = "MODES")]
    pub swing_modes: Vec<SwingMode>,

    /// Lowest setpoint
    #[arg(long, allow_hyphen_values = true)]
    pub min_temperature: Temperature,

    /// Highest setpoint
    #[arg(long, allow_hyphen_values = true)]
    pub max_temperature: Temperature,

    /// Temperature step: 1.0 or 0.5
    #[arg(long, default_value = "1.0")]
    pub precision: Precision,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// End-to-end example text for the `examples` command.
pub const EXAMPLES_TEXT: &str = r#"End-to-end example: learn a Broadlink-controlled air conditioner

# 1. Make sure python-broadlink can learn a single code
broadlink_cli --device @living.device --learn

# 2. Start the wizard, pointing it at that command
irlearn learn \
    --manufacturer Daikin --model FTXM20R \
    --capture-command 'broadlink_cli --device @living.device --learn' \
    --token-pattern "Base64: b'([^']+)'" \
    -o 1000.json

# 3. Answer the prompts
#    Select Operation Modes:        cool, heat
#    Select Preset Modes:           none
#    Select Fan Modes:              auto, level1, level2
#    Select Fan Swing Modes:        off
#    Minimum / Maximum Temperature: 16 / 30
#    Precision:                     1.0

# 4. For each announced combination, set the remote to it and press the
#    button. Press Enter to keep the code, or N to learn it again.
#    The slot being learned is exported to the command as $IRLEARN_LEAF.

# 5. Copy 1000.json into custom_components/smartir/codes/climate/

Run with -vv to log the document after every accepted code.
"#;

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;
    use irlearn_core::{FanMode, OperationMode, Precision, Temperature};

    #[test]
    fn skeleton_parses_mode_lists_in_order() {
        let cli = Cli::parse_from([
            "irlearn",
            "skeleton",
            "--manufacturer",
            "Daikin",
            "--operation-modes",
            "heat,cool",
            "--fan-modes",
            "level2,auto",
            "--min-temperature",
            "16",
            "--max-temperature",
            "30",
            "--precision",
            "0.5",
        ]);

        match cli.command {
            Commands::Skeleton(args) => {
                assert_eq!(args.operation_modes, vec![OperationMode::Heat, OperationMode::Cool]);
                assert_eq!(args.fan_modes, vec![FanMode::Level2, FanMode::Auto]);
                assert!(args.preset_modes.is_empty());
                assert_eq!(args.min_temperature, Temperature::new(16.0));
                assert_eq!(args.precision, Precision::Half);
                assert_eq!(args.device.controller, "Broadlink");
            }
            _ => panic!("Expected skeleton command"),
        }
    }

    #[test]
    fn skeleton_rejects_unknown_mode() {
        let result = Cli::try_parse_from([
            "irlearn",
            "skeleton",
            "--manufacturer",
            "Daikin",
            "--fan-modes",
            "turbo",
            "--min-temperature",
            "16",
            "--max-temperature",
            "30",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn learn_requires_one_capture_backend() {
        assert!(Cli::try_parse_from(["irlearn", "learn", "--replay", "codes.txt"]).is_ok());
        assert!(Cli::try_parse_from([
            "irlearn",
            "learn",
            "--replay",
            "codes.txt",
            "--capture-command",
            "learn.sh",
        ])
        .is_err());
    }

    #[test]
    fn learn_collects_repeated_models() {
        let cli = Cli::parse_from([
            "irlearn",
            "-vv",
            "learn",
            "--model",
            "A",
            "--model",
            "B",
            "--capture-command",
            "learn.sh",
            "--capture-timeout",
            "5",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Learn(args) => {
                assert_eq!(args.device.models, vec!["A", "B"]);
                assert_eq!(args.capture.capture_command.as_deref(), Some("learn.sh"));
                assert_eq!(args.capture_timeout, 5);
                assert!(args.output.output.is_none());
            }
            _ => panic!("Expected learn command"),
        }
    }
}
