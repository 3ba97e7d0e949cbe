//! mapon - Command-line tool for the Mapon fleet-telematics API
//!
//! One subcommand per API endpoint. Records are printed one per line as
//! JSON by default, or flattened into a table or CSV.

mod auth;
mod commands;
mod config;
mod output;
mod time_arg;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use mapon_client::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::auth::CredentialStore;
use crate::commands::data;
use crate::config::{ArgOverrides, Config, MergedConfig};
use crate::output::{OutputContext, OutputFormat};
use crate::time_arg::parse_time_arg;

#[derive(Parser)]
#[command(name = "mapon")]
#[command(author, version, about = "Mapon fleet telematics CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "MAPON_BASE_URL")]
    base_url: Option<String>,

    /// API key (overrides the stored one)
    #[arg(long, global = true, env = "MAPON_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MAPON_CONFIG")]
    config: Option<PathBuf>,

    /// Output format [default: json]
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log full response bodies
    #[arg(long, global = true)]
    debug: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Retries after a failed attempt
    #[arg(long, global = true)]
    retries: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

/// Time range shared by the series commands
#[derive(Args, Debug, Clone)]
struct TimeRange {
    /// Start time (RFC3339 or 'YYYY-MM-DD HH:MM:SS' UTC)
    #[arg(long, value_parser = parse_time_arg)]
    from: DateTime<Utc>,

    /// End time (RFC3339 or 'YYYY-MM-DD HH:MM:SS' UTC)
    #[arg(long, value_parser = parse_time_arg)]
    till: DateTime<Utc>,
}

/// Units and time range shared by the sensor and event feeds
#[derive(Args, Debug, Clone)]
struct SeriesArgs {
    /// Unit ID (repeatable)
    #[arg(long = "unit-id", required = true)]
    unit_ids: Vec<i64>,

    #[command(flatten)]
    range: TimeRange,
}

impl From<SeriesArgs> for UnitSeriesRequest {
    fn from(args: SeriesArgs) -> Self {
        UnitSeriesRequest::new(args.unit_ids, args.range.from, args.range.till)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List units
    Units {
        /// Unit ID (repeatable)
        #[arg(long = "id")]
        ids: Vec<i64>,

        /// Extra data: fuel, drivers, location, routes... (repeatable)
        #[arg(long)]
        include: Vec<String>,
    },

    /// List drivers
    Drivers {
        /// Driver ID
        #[arg(long)]
        id: Option<i64>,
    },

    /// List routes
    Routes {
        #[command(flatten)]
        range: TimeRange,

        /// Unit ID (repeatable)
        #[arg(long = "unit-id")]
        unit_ids: Vec<i64>,

        /// Extra data, e.g. polyline (repeatable)
        #[arg(long)]
        include: Vec<String>,
    },

    /// List objects (points of interest)
    Objects,

    /// List triggered alerts
    Alerts {
        #[command(flatten)]
        range: TimeRange,

        /// Unit ID (repeatable)
        #[arg(long = "unit-id")]
        unit_ids: Vec<i64>,

        /// Driver ID
        #[arg(long)]
        driver_id: Option<i64>,
    },

    /// List unit groups
    Groups {
        /// Only groups containing this unit
        #[arg(long)]
        unit_id: Option<i64>,
    },

    /// List the units of a group
    GroupUnits {
        /// Group ID
        #[arg(long)]
        id: i64,
    },

    /// Dashboard tell-tale history of a unit
    TellTales {
        /// Unit ID
        #[arg(long)]
        unit_id: i64,

        #[command(flatten)]
        range: TimeRange,
    },

    /// Unit data feeds
    Data {
        #[command(subcommand)]
        feed: DataFeed,
    },

    /// Manage stored credentials
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
}

#[derive(Subcommand)]
enum DataFeed {
    /// CAN metrics at one instant
    CanPoint {
        #[arg(long)]
        unit_id: i64,

        /// Instant (RFC3339 or 'YYYY-MM-DD HH:MM:SS' UTC)
        #[arg(long, value_parser = parse_time_arg)]
        datetime: DateTime<Utc>,
    },

    /// CAN metric series over a time range
    CanPeriod {
        #[arg(long)]
        unit_id: i64,

        #[command(flatten)]
        range: TimeRange,

        /// Extra series (repeatable)
        #[arg(long)]
        include: Vec<String>,
    },

    /// Device diagnostics
    DebugInfo {
        /// Unit ID (repeatable)
        #[arg(long = "unit-id", required = true)]
        unit_ids: Vec<i64>,
    },

    /// Digital input on/off intervals
    DigitalInputs {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Digital input intervals with labels, locations and drivers
    DigitalInputsExtended {
        #[command(flatten)]
        series: SeriesArgs,

        /// Input ID (repeatable)
        #[arg(long = "input-id")]
        input_ids: Vec<i64>,
    },

    /// Tachograph driving and rest time
    DrivingTime {
        #[arg(long)]
        unit_id: i64,
    },

    /// Custom field values
    Fields {
        #[arg(long)]
        unit_id: i64,
    },

    /// Odometer and position at one instant
    HistoryPoint {
        #[arg(long)]
        unit_id: i64,

        /// Instant (RFC3339 or 'YYYY-MM-DD HH:MM:SS' UTC)
        #[arg(long, value_parser = parse_time_arg)]
        datetime: DateTime<Utc>,

        /// can_total_distance, mileage, position (repeatable)
        #[arg(long)]
        include: Vec<String>,
    },

    /// Humidity sensor readings
    Humidity {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// iButton attach events
    Ibuttons {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Ignition on/off events
    Ignitions {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Temperature sensor readings
    Temperatures {
        #[command(flatten)]
        series: SeriesArgs,
    },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Store an API key (uses --api-key or prompts for one)
    Login,
    /// Remove the stored API key
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose || cli.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load config file
    let config = match &cli.config {
        Some(config_path) => Config::load_from(config_path)?,
        None => Config::load().unwrap_or_default(),
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(&ArgOverrides {
        base_url: cli.base_url.clone(),
        output: cli.output,
        no_color: cli.no_color,
        timeout_secs: cli.timeout,
        retries: cli.retries,
    });

    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);
    let store = CredentialStore::default_location()?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthCommand::Login => commands::login(&store, cli.api_key.as_deref(), &ctx),
            AuthCommand::Logout => commands::logout(&store, &ctx),
        },
        command => {
            let client = create_client(&merged, &store, cli.api_key.as_deref(), cli.debug)?;
            execute(&client, command, &ctx).await
        }
    }
}

/// Create a Mapon client from the merged settings and resolved key
fn create_client(
    merged: &MergedConfig,
    store: &CredentialStore,
    api_key: Option<&str>,
    debug: bool,
) -> Result<MaponClient> {
    let api_key = store.resolve(api_key)?;
    let config = ClientConfig::new()
        .with_base_url(merged.base_url.clone())
        .with_api_key(api_key)
        .with_timeout(merged.timeout)
        .with_retry_count(merged.retries)
        .with_debug(debug);

    MaponClient::with_config(config).context("Failed to create Mapon client")
}

async fn execute(client: &MaponClient, command: Commands, ctx: &OutputContext) -> Result<()> {
    match command {
        Commands::Units { ids, include } => {
            let request = ListUnitsRequest {
                unit_ids: ids,
                include,
            };
            commands::units(client, &request, ctx).await
        }

        Commands::Drivers { id } => {
            commands::drivers(client, &ListDriversRequest { driver_id: id }, ctx).await
        }

        Commands::Routes {
            range,
            unit_ids,
            include,
        } => {
            let request = ListRoutesRequest {
                from: range.from,
                till: range.till,
                unit_ids,
                include,
            };
            commands::routes(client, &request, ctx).await
        }

        Commands::Objects => commands::objects(client, ctx).await,

        Commands::Alerts {
            range,
            unit_ids,
            driver_id,
        } => {
            let request = ListAlertsRequest {
                from: range.from,
                till: range.till,
                unit_ids,
                driver_id,
            };
            commands::alerts(client, &request, ctx).await
        }

        Commands::Groups { unit_id } => {
            commands::groups(client, &ListUnitGroupsRequest { unit_id }, ctx).await
        }

        Commands::GroupUnits { id } => {
            commands::group_units(client, &ListUnitsInGroupRequest { group_id: id }, ctx).await
        }

        Commands::TellTales { unit_id, range } => {
            let request = ListTellTaleValuesRequest {
                unit_id,
                from: range.from,
                till: range.till,
            };
            commands::tell_tales(client, &request, ctx).await
        }

        Commands::Data { feed } => execute_feed(client, feed, ctx).await,

        Commands::Auth { .. } => anyhow::bail!("auth commands do not use the API client"),
    }
}

async fn execute_feed(client: &MaponClient, feed: DataFeed, ctx: &OutputContext) -> Result<()> {
    match feed {
        DataFeed::CanPoint { unit_id, datetime } => {
            let request = GetCanPointDataRequest { unit_id, datetime };
            data::can_point(client, &request, ctx).await
        }

        DataFeed::CanPeriod {
            unit_id,
            range,
            include,
        } => {
            let request = ListCanPeriodDataRequest {
                unit_id,
                from: range.from,
                till: range.till,
                include,
            };
            data::can_period(client, &request, ctx).await
        }

        DataFeed::DebugInfo { unit_ids } => {
            data::debug_info(client, &GetUnitDebugInfoRequest { unit_ids }, ctx).await
        }

        DataFeed::DigitalInputs { series } => {
            let request = ListDigitalInputsRequest(series.into());
            data::digital_inputs(client, &request, ctx).await
        }

        DataFeed::DigitalInputsExtended { series, input_ids } => {
            let request = ListDigitalInputsExtendedRequest {
                unit_ids: series.unit_ids,
                input_ids,
                from: series.range.from,
                till: series.range.till,
            };
            data::digital_inputs_extended(client, &request, ctx).await
        }

        DataFeed::DrivingTime { unit_id } => {
            let request = GetDrivingTimeExtendedRequest { unit_id };
            data::driving_time(client, &request, ctx).await
        }

        DataFeed::Fields { unit_id } => {
            data::fields(client, &GetUnitFieldsRequest { unit_id }, ctx).await
        }

        DataFeed::HistoryPoint {
            unit_id,
            datetime,
            include,
        } => {
            let request = GetHistoryPointDataRequest {
                unit_id,
                datetime,
                include,
            };
            data::history_point(client, &request, ctx).await
        }

        DataFeed::Humidity { series } => {
            data::humidity(client, &ListHumidityRequest(series.into()), ctx).await
        }

        DataFeed::Ibuttons { series } => {
            data::ibuttons(client, &ListIbuttonsRequest(series.into()), ctx).await
        }

        DataFeed::Ignitions { series } => {
            data::ignitions(client, &ListIgnitionsRequest(series.into()), ctx).await
        }

        DataFeed::Temperatures { series } => {
            data::temperatures(client, &ListTemperaturesRequest(series.into()), ctx).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_series_feed() {
        let cli = Cli::try_parse_from([
            "mapon",
            "data",
            "ignitions",
            "--unit-id",
            "1",
            "--unit-id",
            "2",
            "--from",
            "2021-01-01 00:00:00",
            "--till",
            "2021-01-02T00:00:00Z",
            "-o",
            "table",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Table));
        match cli.command {
            Commands::Data {
                feed: DataFeed::Ignitions { series },
            } => {
                let request = UnitSeriesRequest::from(series);
                assert_eq!(request.unit_ids, vec![1, 2]);
                assert_eq!(request.till - request.from, chrono::Duration::days(1));
            }
            _ => panic!("expected ignitions feed"),
        }
    }

    #[test]
    fn test_bad_time_is_rejected() {
        let result = Cli::try_parse_from([
            "mapon", "routes", "--from", "yesterday", "--till", "today",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_routes_require_range() {
        assert!(Cli::try_parse_from(["mapon", "routes"]).is_err());
    }
}
