mod config;
mod database;
mod models;
mod rules;
mod services;
mod utils;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::{
    config::{Config, IdTokenSettings},
    database::DriverConnector,
    models::{LoginEvent, LoginOutcome},
    rules::UserEnrichmentRule,
    services::{issue_id_token, verify_id_token, RulePipeline},
    utils::AppError,
};

#[derive(Parser, Debug)]
#[command(name = "login-rules", version, about = "Run login rules against a login event")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the rules for one login event and print the resulting context
    Run {
        /// JSON file with `{ "user": ..., "context": ... }`; stdin when omitted
        #[arg(long)]
        event: Option<PathBuf>,
        /// Also mint an id token from the enriched claims
        #[arg(long)]
        sign: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Check an id token minted by `run --sign` and print its claims
    Verify { token: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();

    match execute(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let AppError::Database(db_err) = &err {
                if let Some(driver) = db_err.driver_error() {
                    log::debug!("Driver error details for '{}': {:?}", db_err.message(), driver);
                }
            }
            log::error!("❌ {}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command) -> Result<(), AppError> {
    match command {
        Command::Run { event, sign, pretty } => {
            let config = Config::from_env()?;
            let event = read_event(event)?;

            log::info!("🔐 Login rules for {}", event.user.email);
            log::info!("📊 Database: {}", config.mongo.database);

            let pipeline = RulePipeline::new().with_rule(Arc::new(UserEnrichmentRule::new(
                config.mongo.clone(),
                Arc::new(DriverConnector::new()),
            )));
            log::info!("📋 Rules: {}", pipeline.rule_names().join(", "));

            let context = pipeline.run(&event.user, event.context).await?;

            let id_token = if sign {
                Some(issue_id_token(&event.user, &context, &config.id_token)?)
            } else {
                None
            };

            let outcome = LoginOutcome {
                user: event.user,
                context,
                id_token,
            };
            print_json(&outcome, pretty)
        }
        Command::Verify { token } => {
            let settings = IdTokenSettings::from_env()?;
            let claims = verify_id_token(&token, &settings)?;
            print_json(&claims, true)
        }
    }
}

fn read_event(path: Option<PathBuf>) -> Result<LoginEvent, AppError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    serde_json::from_str(&raw).map_err(|e| AppError::InvalidInput(format!("Invalid login event: {}", e)))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| AppError::InvalidInput(format!("Failed to serialize output: {}", e)))?;

    println!("{}", out);
    Ok(())
}
