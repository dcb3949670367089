mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use netwatch_client::config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS};
use netwatch_client::net::api::ApiClient;
use netwatch_client::net::error::ApiError;
use netwatch_client::net::types::{
    AlertQuery, AlertStatus, CaptureProtocol, CaptureRequest, Credentials, DeviceUpdate, HistoryQuery, NewDevice,
    PacketQuery, RecordId, Registration, WindowQuery,
};
use netwatch_client::router::{RouteError, Router};
use netwatch_client::state::session::{FileStorage, Session, StorageError};
use netwatch_client::util::format::{Locale, local_offset};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use render::{humanize, print_json};

/// Headroom added on top of a capture's own duration.
const CAPTURE_TIMEOUT_SLACK_SECS: u64 = 5;
/// The backend's speed test runs a full download + upload measurement.
const SPEED_TEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("nothing to update; pass at least one of --name, --ip-address, --device-type, --status")]
    EmptyUpdate,
}

#[derive(Parser, Debug)]
#[command(name = "netwatch", about = "Network monitoring dashboard CLI")]
struct Cli {
    #[arg(long, env = "NETWATCH_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    #[arg(long, env = "NETWATCH_API_TIMEOUT_SECS", default_value_t = DEFAULT_API_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, env = "NETWATCH_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Add readable `_human` / `_local` siblings to byte and time fields.
    #[arg(long, global = true)]
    human: bool,

    #[arg(long, env = "NETWATCH_LOCALE", default_value = "zh-CN")]
    locale: Locale,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is up.
    Ping,
    /// Show where the route guard sends a navigation, given the stored session.
    Route { path: String },
    Auth(AuthCommand),
    Devices(DevicesCommand),
    Monitoring(MonitoringCommand),
    Analysis(AnalysisCommand),
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "NETWATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and store the token in the session file.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "NETWATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Me,
    /// Forget the stored token and user.
    Logout,
    /// Print the stored session without contacting the backend.
    Status,
}

#[derive(Args, Debug)]
struct DevicesCommand {
    #[command(subcommand)]
    command: DevicesSubcommand,
}

#[derive(Subcommand, Debug)]
enum DevicesSubcommand {
    List,
    Get {
        id: RecordId,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        ip_address: String,
        #[arg(long)]
        device_type: Option<String>,
    },
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        ip_address: Option<String>,
        #[arg(long)]
        device_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    Delete {
        id: RecordId,
    },
}

#[derive(Args, Debug)]
struct MonitoringCommand {
    #[command(subcommand)]
    command: MonitoringSubcommand,
}

#[derive(Subcommand, Debug)]
enum MonitoringSubcommand {
    Traffic,
    System,
    SpeedTest,
    History {
        #[arg(long)]
        hours: Option<u32>,
        #[arg(long)]
        device_id: Option<RecordId>,
    },
    SystemHistory {
        #[arg(long)]
        hours: Option<u32>,
    },
    Alerts {
        #[arg(long, help = "active (backend default) or resolved")]
        status: Option<AlertStatus>,
    },
    Resolve {
        id: RecordId,
    },
}

#[derive(Args, Debug)]
struct AnalysisCommand {
    #[command(subcommand)]
    command: AnalysisSubcommand,
}

#[derive(Subcommand, Debug)]
enum AnalysisSubcommand {
    /// Run a capture on the backend and wait for the packets.
    Capture {
        #[arg(long, help = "all, tcp, udp or ip")]
        protocol: Option<CaptureProtocol>,
        #[arg(long)]
        count: Option<u32>,
        #[arg(long, help = "Capture duration in seconds")]
        timeout: Option<u32>,
    },
    Packets {
        #[arg(long)]
        hours: Option<u32>,
        #[arg(long)]
        protocol: Option<String>,
    },
    Stats {
        #[arg(long)]
        hours: Option<u32>,
    },
    Protocols,
}

#[derive(Debug, Clone, Copy)]
struct Output {
    human: bool,
    locale: Locale,
}

impl Output {
    fn emit(self, mut value: Value) -> Result<(), CliError> {
        if self.human {
            humanize(&mut value, self.locale, local_offset());
        }
        print_json(&value)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let CliError::Api(api) = &e {
                if api.is_unauthorized() {
                    eprintln!("session cleared; run `netwatch auth login` to sign in again");
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()
        .with_base_url(&cli.base_url)
        .with_timeout(request_timeout(Duration::from_secs(cli.timeout_secs), &cli.command));
    if let Some(path) = cli.session_file {
        config = config.with_session_file(path);
    }
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "client config");

    let session = Session::new(Arc::new(FileStorage::new(config.session_file.clone())));
    let router = Arc::new(Router::new(session.clone()));
    let api = ApiClient::new(&config, session.clone(), router.clone())?;
    let out = Output { human: cli.human, locale: cli.locale };

    match cli.command {
        Command::Ping => out.emit(api.health().await?),
        Command::Route { path } => run_route(&router, &path, out),
        Command::Auth(auth) => run_auth(&api, &config, auth, out).await,
        Command::Devices(devices) => run_devices(&api, devices, out).await,
        Command::Monitoring(monitoring) => run_monitoring(&api, monitoring, out).await,
        Command::Analysis(analysis) => run_analysis(&api, analysis, out).await,
    }
}

/// Stretch the request timeout for operations the backend holds open.
fn request_timeout(base: Duration, command: &Command) -> Duration {
    let needed = match command {
        Command::Analysis(AnalysisCommand {
            command: AnalysisSubcommand::Capture { timeout: Some(secs), .. },
        }) => Duration::from_secs(u64::from(*secs) + CAPTURE_TIMEOUT_SLACK_SECS),
        Command::Monitoring(MonitoringCommand { command: MonitoringSubcommand::SpeedTest }) => {
            Duration::from_secs(SPEED_TEST_TIMEOUT_SECS)
        }
        _ => Duration::ZERO,
    };
    base.max(needed)
}

fn run_route(router: &Router, path: &str, out: Output) -> Result<(), CliError> {
    let route = router.navigate(path)?;
    out.emit(json!({
        "requested": path,
        "location": router.location(),
        "name": route.name,
        "requires_auth": route.requires_auth,
    }))
}

async fn run_auth(api: &ApiClient, config: &ClientConfig, auth: AuthCommand, out: Output) -> Result<(), CliError> {
    let session = api.session();
    match auth.command {
        AuthSubcommand::Register { username, email, password } => {
            out.emit(api.auth().register(&Registration { username, email, password }).await?)
        }
        AuthSubcommand::Login { username, password } => {
            let login = api.auth().login(&Credentials { username, password }).await?;
            session.sign_in(&login)?;
            tracing::info!(user = %login.user.username, "signed in");
            out.emit(json!({
                "user": serde_json::to_value(&login.user)?,
                "session_file": config.session_file.display().to_string(),
            }))
        }
        AuthSubcommand::Me => out.emit(api.auth().current_user().await?),
        AuthSubcommand::Logout => {
            session.clear()?;
            out.emit(json!({ "authenticated": false }))
        }
        AuthSubcommand::Status => out.emit(json!({
            "authenticated": session.is_authenticated(),
            "user": serde_json::to_value(session.user())?,
        })),
    }
}

async fn run_devices(api: &ApiClient, devices: DevicesCommand, out: Output) -> Result<(), CliError> {
    let devices_api = api.devices();
    let value = match devices.command {
        DevicesSubcommand::List => devices_api.list().await?,
        DevicesSubcommand::Get { id } => devices_api.get(id).await?,
        DevicesSubcommand::Add { name, ip_address, device_type } => {
            devices_api.add(&NewDevice { name, ip_address, device_type }).await?
        }
        DevicesSubcommand::Update { id, name, ip_address, device_type, status } => {
            let update = DeviceUpdate { name, ip_address, device_type, status };
            if update.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            devices_api.update(id, &update).await?
        }
        DevicesSubcommand::Delete { id } => devices_api.delete(id).await?,
    };
    out.emit(value)
}

async fn run_monitoring(api: &ApiClient, monitoring: MonitoringCommand, out: Output) -> Result<(), CliError> {
    let monitoring_api = api.monitoring();
    let value = match monitoring.command {
        MonitoringSubcommand::Traffic => monitoring_api.traffic().await?,
        MonitoringSubcommand::System => monitoring_api.system().await?,
        MonitoringSubcommand::SpeedTest => monitoring_api.speed_test().await?,
        MonitoringSubcommand::History { hours, device_id } => {
            monitoring_api.history(&HistoryQuery { hours, device_id }).await?
        }
        MonitoringSubcommand::SystemHistory { hours } => monitoring_api.system_history(&WindowQuery { hours }).await?,
        MonitoringSubcommand::Alerts { status } => monitoring_api.alerts(&AlertQuery { status }).await?,
        MonitoringSubcommand::Resolve { id } => monitoring_api.resolve_alert(id).await?,
    };
    out.emit(value)
}

async fn run_analysis(api: &ApiClient, analysis: AnalysisCommand, out: Output) -> Result<(), CliError> {
    let analysis_api = api.analysis();
    let value = match analysis.command {
        AnalysisSubcommand::Capture { protocol, count, timeout } => {
            analysis_api.capture(&CaptureRequest { protocol, count, timeout }).await?
        }
        AnalysisSubcommand::Packets { hours, protocol } => analysis_api.packets(&PacketQuery { hours, protocol }).await?,
        AnalysisSubcommand::Stats { hours } => analysis_api.stats(&WindowQuery { hours }).await?,
        AnalysisSubcommand::Protocols => analysis_api.protocols().await?,
    };
    out.emit(value)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
