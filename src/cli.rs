//! CLI argument definitions for hostparam.

use clap::{Parser, Subcommand};

/// Hostparam - converge a single host parameter in a Foreman-compatible store.
///
/// Declares a parameter present with a value (`set`) or absent (`unset`),
/// applies the minimal change, and reports whether anything changed.
#[derive(Parser, Debug)]
#[command(name = "hostparam")]
#[command(
    author,
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("HOSTPARAM_GIT_COMMIT"),
        " ",
        env!("HOSTPARAM_BUILD_TIMESTAMP"),
        ")"
    ),
    about = "Converge a single host parameter in a Foreman-compatible store",
    long_about = None
)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Base URL of the parameter store (e.g. https://foreman.example.com).
    /// Can also be set via HOSTPARAM_URL environment variable.
    #[arg(long, global = true, env = "HOSTPARAM_URL")]
    pub url: Option<String>,

    /// Login username. Can also be set via HOSTPARAM_USER.
    #[arg(long, global = true, env = "HOSTPARAM_USER")]
    pub user: Option<String>,

    /// Login password. Can also be set via HOSTPARAM_PASSWORD.
    #[arg(long, global = true, env = "HOSTPARAM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Connect/read timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Declare a parameter present with the given value
    Set {
        /// Host (FQDN) carrying the parameter
        host: String,

        /// Parameter name
        param: String,

        /// Desired value
        value: String,

        /// Report what would change without writing anything
        #[arg(long)]
        check: bool,
    },

    /// Declare a parameter absent
    Unset {
        /// Host (FQDN) carrying the parameter
        host: String,

        /// Parameter name
        param: String,

        /// Report what would change without writing anything
        #[arg(long)]
        check: bool,
    },

    /// Show the observed state of a parameter without converging it
    Get {
        /// Host (FQDN) carrying the parameter
        host: String,

        /// Parameter name
        param: String,
    },
}
