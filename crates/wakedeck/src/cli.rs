//! Clap derive structures for the `wakedeck` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use wakedeck_config::{ConfigError, Defaults};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wakedeck -- wake, ping and track devices on your LAN
#[derive(Debug, Parser)]
#[command(
    name = "wakedeck",
    version,
    about = "Wake, ping and track LAN devices from the command line",
    long_about = "Command-line front-end for a LAN device dashboard backend.\n\n\
        Lists tracked devices, runs status scans and discovery sweeps,\n\
        sends Wake-on-LAN packets and keeps a live view with `watch`.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "WAKEDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'u', env = "WAKEDECK_URL", global = true)]
    pub url: Option<String>,

    /// Output format [default: table, or `defaults.output` from the config]
    #[arg(id = "output", long = "output", short = 'o', env = "WAKEDECK_OUTPUT", global = true)]
    pub output_flag: Option<OutputFormat>,

    /// When to use color output [default: auto, or `defaults.color` from the config]
    #[arg(id = "color", long = "color", global = true)]
    pub color_flag: Option<ColorMode>,

    /// Effective output format, set by [`GlobalOpts::apply_defaults`].
    #[arg(skip = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Effective color mode, set by [`GlobalOpts::apply_defaults`].
    #[arg(skip = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "WAKEDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Seconds between reloads in watch mode (0 disables)
    #[arg(long, env = "WAKEDECK_INTERVAL", global = true)]
    pub interval: Option<u64>,
}

impl GlobalOpts {
    /// Resolve output and color: flag or env first, then the config file.
    pub fn apply_defaults(&mut self, defaults: &Defaults) -> Result<(), ConfigError> {
        self.output = match self.output_flag.clone() {
            Some(format) => format,
            None => config_choice("defaults.output", &defaults.output)?,
        };
        self.color = match self.color_flag.clone() {
            Some(mode) => mode,
            None => config_choice("defaults.color", &defaults.color)?,
        };
        Ok(())
    }
}

fn config_choice<T: ValueEnum>(field: &str, raw: &str) -> Result<T, ConfigError> {
    T::from_str(raw, true).map_err(|reason| ConfigError::Validation {
        field: field.into(),
        reason,
    })
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and inspect tracked devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Reload the device list and print status counts
    Refresh,

    /// Run a status sweep over all tracked devices
    Scan,

    /// Look for hosts on the LAN that are not tracked yet
    Discover(DiscoverArgs),

    /// Send a Wake-on-LAN packet to a tracked device
    Wake {
        /// Device id, IP or MAC address
        device: String,
    },

    /// Check whether a device or address answers
    Ping {
        /// Device id, IP or MAC address of a tracked device, or any IPv4 address
        target: String,
    },

    /// Start tracking a device
    Add(AddArgs),

    /// Change a tracked device
    Update(UpdateArgs),

    /// Stop tracking a device
    #[command(alias = "rm")]
    Delete {
        /// Device id, IP or MAC address
        device: String,
    },

    /// Live inventory view, reloaded periodically until Ctrl-C
    Watch,

    /// Check that the backend is up
    Health,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List tracked devices
    #[command(alias = "ls")]
    List,

    /// Show one device
    Get {
        /// Device id, IP or MAC address
        device: String,
    },
}

// ── Discovery ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Offer to add each discovered host
    #[arg(long)]
    pub add: bool,
}

// ── Mutations ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Display name
    #[arg(long, short = 'n')]
    pub name: String,

    /// IPv4 address
    #[arg(long)]
    pub ip: String,

    /// Hardware address (AA:BB:CC:DD:EE:FF), needed for Wake-on-LAN
    #[arg(long, short = 'm')]
    pub mac: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Device id, IP or MAC address
    pub device: String,

    /// New display name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New IPv4 address
    #[arg(long)]
    pub ip: Option<String>,

    /// New hardware address (pass "" to clear)
    #[arg(long, short = 'm')]
    pub mac: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
