mod api;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod forms;
mod logging;
mod models;
mod session;
mod ui;
mod view;
mod workers;

use crate::api::{Backend, BackendClient};
use crate::commands::CustomerFields;
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::workers::WorkerConfig;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Environment variable that overrides the configured backend URL.
const API_URL_ENV: &str = "COLLECTIONS_API_URL";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Debt-collection customer dashboard
struct Args {
    /// Backend base URL (`local` or an http(s) URL). Overrides the config file.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive dashboard
    Start {
        /// Seconds between customer list refreshes
        #[arg(long, value_name = "SECS")]
        poll_interval: Option<u64>,

        /// Paint a dark background behind the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,

        /// Print events to the console instead of drawing the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,
    },
    /// Print the agent roster
    Agents,
    /// Fetch the customer list once and print it with totals
    Customers,
    /// Write a static HTML snapshot of the customer table
    Snapshot {
        /// File to write; stdout when omitted
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Ask the backend to call a customer
    Call {
        /// Customer id
        customer_id: String,

        /// Agent to place the call; defaults to the customer's assigned agent
        #[arg(long, value_name = "AGENT_ID")]
        agent_id: Option<String>,
    },
    /// Create a customer
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update a customer; omitted fields keep their current values
    Edit {
        /// Customer id
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a customer after confirming its id
    Delete {
        /// Customer id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, action = clap::ArgAction::SetTrue)]
        yes: bool,
    },
    /// Save the backend URL to the config file
    SetApiUrl {
        /// `local` or an http(s) URL
        url: String,
    },
    /// Delete the config file
    ResetConfig,
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Amount owed, e.g. 1234.50
    #[arg(long = "amount", value_name = "AMOUNT")]
    debt_amount: Option<String>,

    /// YYYY-MM-DD; pass an empty string to clear
    #[arg(long, value_name = "DATE")]
    due_date: Option<String>,

    /// active, promised_to_pay, refused, callback_requested, voicemail or wrong_number
    #[arg(long)]
    status: Option<String>,

    /// low, medium or high
    #[arg(long = "risk", value_name = "LEVEL")]
    risk_level: Option<String>,
}

impl From<FieldArgs> for CustomerFields {
    fn from(args: FieldArgs) -> Self {
        CustomerFields {
            name: args.name,
            phone: args.phone,
            debt_amount: args.debt_amount,
            due_date: args.due_date,
            status: args.status,
            risk_level: args.risk_level,
        }
    }
}

/// Pick the backend: `--api-url`, then the environment variable, then the config file.
fn resolve_environment(
    flag: Option<&str>,
    from_env: Option<&str>,
    config: &Config,
) -> Result<Environment, String> {
    if let Some(url) = flag {
        return url.parse();
    }
    if let Some(url) = from_env.filter(|u| !u.trim().is_empty()) {
        return url.parse();
    }
    config.api_url.parse()
}

fn backend(environment: Environment) -> Result<Box<dyn Backend>, Box<dyn Error>> {
    Ok(Box::new(BackendClient::new(environment)?))
}

/// Ask for the id again on stdin.
fn read_confirmation(id: &str) -> Result<String, Box<dyn Error>> {
    print!("Type the customer id ({}) to confirm deletion: ", id);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_max_level();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            crate::print_cmd_error!(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;

    let command = args.command.unwrap_or(Command::Start {
        poll_interval: None,
        with_background: false,
        headless: false,
    });

    // Config commands must work even when the current file is unreadable.
    match &command {
        Command::SetApiUrl { url } => {
            let environment: Environment = url.parse()?;
            let mut config = Config::load_or_default(&config_path).unwrap_or_default();
            config.api_url = environment.api_url();
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            crate::print_cmd_success!("Saved", "Backend set to {}", config.api_url);
            return Ok(());
        }
        Command::ResetConfig => {
            println!("Clearing dashboard configuration file...");
            return Config::clear(&config_path).map_err(Into::into);
        }
        _ => {}
    }

    let config = Config::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
    let env_url = std::env::var(API_URL_ENV).ok();
    let environment = resolve_environment(args.api_url.as_deref(), env_url.as_deref(), &config)?;

    match command {
        Command::Start {
            poll_interval,
            with_background,
            headless,
        } => {
            let mut worker_config = WorkerConfig::from_config(environment, &config);
            if let Some(secs) = poll_interval {
                worker_config.poll_interval = Duration::from_secs(secs.max(1));
            }
            let session = setup_session(worker_config).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background || config.with_background_color).await
            }
        }
        Command::Agents => commands::list_agents(backend(environment)?.as_ref()).await,
        Command::Customers => commands::list_customers(backend(environment)?.as_ref()).await,
        Command::Snapshot { output } => {
            commands::snapshot(backend(environment)?.as_ref(), output.as_deref()).await
        }
        Command::Call {
            customer_id,
            agent_id,
        } => {
            let client = backend(environment)?;
            commands::call(client.as_ref(), &customer_id, agent_id.as_deref())
                .await
                .map(|_| ())
        }
        Command::Add { fields } => {
            commands::add(backend(environment)?.as_ref(), &fields.into()).await
        }
        Command::Edit { id, fields } => {
            let fields = CustomerFields::from(fields);
            fields.check()?;
            commands::edit(backend(environment)?.as_ref(), &id, &fields).await
        }
        Command::Delete { id, yes } => {
            let confirmation = if yes { id.clone() } else { read_confirmation(&id)? };
            commands::delete(backend(environment)?.as_ref(), &id, &confirmation).await
        }
        Command::SetApiUrl { .. } | Command::ResetConfig => Ok(()),
    }
}
