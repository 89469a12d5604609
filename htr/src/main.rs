//! HitTheRoad - day-by-day travel itinerary planner
//!
//! CLI entry point for the schedule and auth service commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use hittheroad::api::types::{LoginRequest, RegisterRequest, SchedulePayload, ScheduleRecord};
use hittheroad::api::{ApiError, AuthClient, AuthMethod, ScheduleClient, StoredSession};
use hittheroad::cli::{Cli, Command, OutputFormat};
use hittheroad::config::Config;
use hittheroad::sync;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hittheroad")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("hittheroad.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("HitTheRoad loaded config: base-url={}", config.api.base_url);

    match cli.command {
        Command::Register {
            username,
            password,
            nickname,
            email,
        } => cmd_register(&config, username, password, nickname, email).await,
        Command::Login { username, password } => cmd_login(&config, username, password).await,
        Command::Logout => cmd_logout(&config),
        Command::List { finished, format } => cmd_list(&config, finished, format).await,
        Command::Show { id, format } => cmd_show(&config, id, format).await,
        Command::Delete { id } => cmd_delete(&config, id).await,
        Command::Push { board, id } => cmd_push(&config, &board, id).await,
        Command::Pull { id, output } => cmd_pull(&config, id, &output).await,
    }
}

/// Report an API rejection as a notice instead of a hard failure
fn notice_or_fail(result: Result<(), ApiError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_rejection() => {
            println!("{} {}", "rejected:".yellow().bold(), e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn schedule_client(config: &Config) -> Result<ScheduleClient> {
    let session = StoredSession::load(&config.storage.data_dir)?.ok_or(ApiError::NotLoggedIn)?;
    Ok(ScheduleClient::from_config(&config.api, session.token)?)
}

async fn cmd_register(config: &Config, username: String, password: String, nickname: String, email: String) -> Result<()> {
    let client = AuthClient::from_config(&config.api)?;
    let request = RegisterRequest {
        username,
        password,
        nickname,
        email,
    };

    match client.register(AuthMethod::Common, &request).await {
        Ok(session) => {
            let username = session.user.username.clone();
            StoredSession::from(session).save(&config.storage.data_dir)?;
            println!("{} registered and logged in as {}", "ok:".green().bold(), username.bold());
            Ok(())
        }
        Err(e) if e.is_rejection() => {
            println!("{} {}", "rejected:".yellow().bold(), e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_login(config: &Config, username: String, password: String) -> Result<()> {
    let client = AuthClient::from_config(&config.api)?;
    let request = LoginRequest { username, password };

    match client.login(AuthMethod::Common, &request).await {
        Ok(session) => {
            let username = session.user.username.clone();
            StoredSession::from(session).save(&config.storage.data_dir)?;
            println!("{} logged in as {}", "ok:".green().bold(), username.bold());
            Ok(())
        }
        Err(e) if e.is_rejection() => {
            println!("{} {}", "rejected:".yellow().bold(), e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_logout(config: &Config) -> Result<()> {
    StoredSession::clear(&config.storage.data_dir)?;
    println!("{} logged out", "ok:".green().bold());
    Ok(())
}

async fn cmd_list(config: &Config, finished: Option<bool>, format: OutputFormat) -> Result<()> {
    let client = schedule_client(config)?;
    let records = client.list(finished).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records_summary(&records))?),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No schedules");
                return Ok(());
            }
            for record in &records {
                let flag = if record.payload.is_finished { "finished" } else { "planning" };
                println!(
                    "{:>4}  {}  {} ({} days, {})",
                    record.id,
                    record.payload.schedule_name.bold(),
                    record.payload.location,
                    record.payload.date_range.len(),
                    flag,
                );
            }
        }
    }
    Ok(())
}

fn records_summary(records: &[ScheduleRecord]) -> Vec<serde_json::Value> {
    records
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id,
                "scheduleName": r.payload.schedule_name,
                "location": r.payload.location,
                "days": r.payload.date_range.len(),
                "isFinished": r.payload.is_finished,
            })
        })
        .collect()
}

async fn cmd_show(config: &Config, id: i64, format: OutputFormat) -> Result<()> {
    let client = schedule_client(config)?;
    let record = client.get(id).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record.payload)?),
        OutputFormat::Text => print_schedule(&record),
    }
    Ok(())
}

fn print_schedule(record: &ScheduleRecord) {
    let payload = &record.payload;
    println!(
        "{}: {} ({})",
        payload.schedule_name.bold(),
        payload.location,
        if payload.is_finished { "finished" } else { "planning" },
    );

    let session = sync::session_from_record(record);
    for date in session.date_range() {
        let day = date
            .to_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| date.to_string());
        println!("\n{}", day.cyan().bold());

        let routines = session.routines().order_by_start(*date);
        if routines.is_empty() {
            println!("  (nothing planned)");
        }
        for routine in routines {
            println!("  {} [{}] {}", routine.location.bold(), routine.category, routine.memo);
        }
    }

    let unscheduled: Vec<_> = session.spots().available().collect();
    if !unscheduled.is_empty() {
        println!("\n{}", "Unscheduled spots".cyan().bold());
        for spot in unscheduled {
            println!("  {} [{}]", spot.location, spot.category);
        }
    }
}

async fn cmd_delete(config: &Config, id: i64) -> Result<()> {
    let client = schedule_client(config)?;
    match client.delete(id).await {
        Ok(()) => {
            println!("{} schedule {} deleted", "ok:".green().bold(), id);
            Ok(())
        }
        other => notice_or_fail(other),
    }
}

async fn cmd_push(config: &Config, board: &PathBuf, id: Option<i64>) -> Result<()> {
    let content = fs::read_to_string(board).context(format!("Failed to read board file {}", board.display()))?;
    let payload: SchedulePayload = serde_yaml::from_str(&content).context("Failed to parse board file")?;

    let client = Arc::new(schedule_client(config)?);
    let name = payload.schedule_name.clone();

    // Fire-and-forget from the board's perspective; the CLI still waits so
    // the verdict can be surfaced before the process exits.
    let handle = sync::spawn_push(client, id, payload);
    let verdict = handle.await.context("Push task panicked")?;

    match verdict {
        Ok(()) => {
            println!("{} pushed {}", "ok:".green().bold(), name.bold());
            Ok(())
        }
        other => notice_or_fail(other),
    }
}

async fn cmd_pull(config: &Config, id: i64, output: &PathBuf) -> Result<()> {
    let client = schedule_client(config)?;
    let record = client.get(id).await?;

    let content = serde_yaml::to_string(&record.payload).context("Failed to serialize board file")?;
    fs::write(output, content).context(format!("Failed to write board file {}", output.display()))?;

    println!(
        "{} pulled {} into {}",
        "ok:".green().bold(),
        record.payload.schedule_name.bold(),
        output.display(),
    );
    Ok(())
}
