//! Clap derive structures for the `enoman` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// enoman -- manage the EnOcean device registry of a Home Assistant add-on
#[derive(Debug, Parser)]
#[command(
    name = "enoman",
    version,
    about = "Manage EnOcean devices from the command line",
    long_about = "Edit the EnOcean device registry kept by the Home Assistant add-on.\n\n\
        Devices are created, edited and deleted through the add-on's HTTP API,\n\
        which also writes the generated YAML packages on export.",
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
    /// Add-on profile to use
    #[arg(long, short = 'p', env = "ENOMAN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Add-on URL (overrides profile)
    #[arg(long, short = 'u', env = "ENOMAN_URL", global = true)]
    pub url: Option<String>,

    /// Bearer token for proxied access
    #[arg(long, env = "ENOMAN_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ENOMAN_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ENOMAN_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ENOMAN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Manage registered devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Browse EEP profiles and channel suggestions
    #[command(alias = "eep")]
    Profiles(ProfilesArgs),

    /// Show where the add-on writes its YAML files
    Paths,

    /// Write the registry out as Home Assistant YAML
    Export,

    /// Rebuild the registry from the add-on's YAML files
    Import,

    /// Manage CLI configuration and profiles
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
    /// List registered devices
    #[command(alias = "ls")]
    List,

    /// Show one device
    Get {
        /// Device key (id_hex, or LIGHT::<label> for sender-only lights)
        key: String,
    },

    /// Print a device as editor fields (`key.path = value`)
    Fields {
        /// Device key
        key: String,
    },

    /// Create or overwrite a device
    Save(SaveArgs),

    /// Delete a device
    #[command(alias = "rm")]
    Delete {
        /// Device key
        key: String,
    },
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Start from an existing device
    #[arg(long, value_name = "KEY")]
    pub edit: Option<String>,

    /// Set a field, e.g. `--field label=Kitchen --field channels.0.emitter.id=FFC43886`
    #[arg(long = "field", short = 'f', value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Read fields from a JSON object of `key: value` pairs
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Replace channel rows with the ones suggested by the device's EEP
    #[arg(long)]
    pub suggest_channels: bool,

    /// Prompt for the main fields
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

// ── Profiles ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    pub command: ProfilesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfilesCommand {
    /// List EEP profiles known to the add-on
    #[command(alias = "ls")]
    List,

    /// Suggest channels for an EEP profile
    Suggest {
        /// EEP code, e.g. F6-02-01
        eep: String,

        /// Ask the add-on instead of computing locally
        #[arg(long)]
        remote: bool,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (tokens masked)
    Show,

    /// Print the config file location
    Path,

    /// Store a bearer token in the system keyring
    SetToken {
        /// Read the token from this argument instead of prompting
        #[arg(long)]
        value: Option<String>,
    },

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
