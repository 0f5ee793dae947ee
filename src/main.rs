use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tfe_workspace_ids::config::Config;
use tfe_workspace_ids::tfe::{auth, client::TfeClient, http};
use tfe_workspace_ids::{LookupRequest, LookupResult};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Resolve TFE workspace names to external IDs and full names
#[derive(Parser, Debug)]
#[command(name = "tfe-workspace-ids", version, about, long_about = None)]
struct Args {
    /// Organization owning the workspaces
    #[arg(short, long)]
    organization: Option<String>,

    /// Workspace name to look up ("*" for all); repeatable
    #[arg(short, long = "name", value_name = "NAME", required = true, num_args = 1..)]
    names: Vec<String>,

    /// TFE hostname
    #[arg(long)]
    hostname: Option<String>,

    /// API token (defaults to TFE_TOKEN or the Terraform CLI credentials file)
    #[arg(long)]
    token: Option<String>,

    /// Workspaces requested per page (1-100)
    #[arg(long)]
    page_size: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Remember hostname and organization for later runs
    #[arg(long)]
    save_defaults: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", log_path.display(), e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("tfe-workspace-ids started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("tfe-workspace-ids")
            .join("tfe-workspace-ids.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tfe-workspace-ids").join("tfe-workspace-ids.log");
    }
    PathBuf::from("tfe-workspace-ids.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {}", http::format_tfe_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    let hostname = config.effective_hostname(args.hostname.as_deref());
    if !auth::validate_hostname(&hostname) {
        anyhow::bail!("Invalid TFE hostname: {}", hostname);
    }

    let organization = config
        .effective_organization(args.organization.as_deref())
        .unwrap_or_default();
    let request = LookupRequest::new(&organization, args.names)?;

    tracing::info!(
        "Looking up {} name(s) in {} on {}",
        request.names.len(),
        request.organization,
        hostname
    );

    let token = auth::resolve_token(args.token.as_deref(), &hostname)?;
    let http = http::TfeHttpClient::with_timeout(args.timeout.map(Duration::from_secs))?;
    let client = TfeClient::new(&hostname, &token)?
        .with_http(http)
        .with_page_size(config.effective_page_size(args.page_size));
    tracing::debug!("Using TFE API at {}", client.hostname());

    let Some(result) = request
        .execute_or_interrupt(&client, tokio::signal::ctrl_c())
        .await?
    else {
        anyhow::bail!("Interrupted");
    };

    if args.save_defaults {
        config.set_defaults(&hostname, &request.organization)?;
        tracing::info!("Saved defaults to {:?}", Config::config_path());
    }

    print_result(&result, args.format)
}

fn print_result(result: &LookupResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            for (name, external_id) in &result.result.external_ids {
                let full_name = result
                    .result
                    .full_names
                    .get(name)
                    .map(String::as_str)
                    .unwrap_or("-");
                println!("{}\t{}\t{}", name, external_id, full_name);
            }
        }
    }
    Ok(())
}
