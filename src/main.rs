//! Hostparam CLI - idempotent convergence of a single host parameter.

use std::process;
use std::time::Duration;

use clap::Parser;

use hostparam::cli::{Cli, Commands};
use hostparam::commands::{self, Output};
use hostparam::models::{DesiredState, Intent, Report};
use hostparam::store::StoreConfig;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let human = cli.human_readable;

    let config = resolve_config(&cli, human);

    if let Err(e) = run_command(cli.command, &config, human) {
        // The structured result is the caller-facing surface even on
        // failure: never claim a change the store did not accept.
        output(&Report::failure(e.to_string()), human);
        process::exit(1);
    }
}

/// Build the store configuration from flags and environment variables,
/// exiting with a usage error when a required setting is missing.
fn resolve_config(cli: &Cli, human: bool) -> StoreConfig {
    let base_url = require(cli.url.clone(), "--url (or HOSTPARAM_URL)", human);
    let user = require(cli.user.clone(), "--user (or HOSTPARAM_USER)", human);
    let password = require(
        cli.password.clone(),
        "--password (or HOSTPARAM_PASSWORD)",
        human,
    );

    StoreConfig {
        base_url,
        user,
        password,
        verify_tls: !cli.insecure,
        timeout: Duration::from_secs(cli.timeout),
    }
}

fn require(value: Option<String>, flag: &str, human: bool) -> String {
    match value {
        Some(v) => v,
        None => {
            output(&Report::failure(format!("missing {}", flag)), human);
            process::exit(1);
        }
    }
}

fn run_command(command: Commands, config: &StoreConfig, human: bool) -> hostparam::Result<()> {
    match command {
        Commands::Set {
            host,
            param,
            value,
            check,
        } => {
            let desired = DesiredState {
                host,
                param,
                value: Some(value),
                intent: Intent::Present,
            };
            let report = commands::converge(config, &desired, check)?;
            output(&report, human);
        }

        Commands::Unset { host, param, check } => {
            let desired = DesiredState {
                host,
                param,
                value: None,
                intent: Intent::Absent,
            };
            let report = commands::converge(config, &desired, check)?;
            output(&report, human);
        }

        Commands::Get { host, param } => {
            let observed = commands::observe(config, &host, &param)?;
            output(&observed, human);
        }
    }

    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
