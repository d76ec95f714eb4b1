use crate::cli::main_types::{
    AlertCommands, ConfigCommands, DashboardCommands, DataSourceCommands, OutputFormat,
    QueryCommands, RefreshArgs, UserCommands,
};
use serde_json::{Map, Value};
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use venomics_core::api::client::VenomicsClient;
use venomics_core::api::models::Row;
use venomics_core::api::transport::ClientConfig;
use venomics_core::core::jobs::{PollOptions, fresh_query_result};
use venomics_core::core::pagination::paginate;
use venomics_core::core::services::config_service::ConfigService;
use venomics_core::core::services::export_service::QueryExporter;
use venomics_core::core::services::scan_service::{ScanPhase, SensitiveDataScanner};
use venomics_core::display::{
    OperationStatus, ProgressSpinner, TableDisplay, display_status, show_progress_bar,
};
use venomics_core::error::{AppError, CliError, DisplayError};
use venomics_core::storage::config::Config;
use venomics_core::storage::credentials::has_api_key;
use venomics_core::utils::error_helpers::convert_io_to_display_error;
use venomics_core::utils::logging::print_verbose;
use venomics_core::utils::validation::{parse_parameter, validate_positive, validate_url};

const PROGRESS_BAR_WIDTH: usize = 30;

fn emit(text: &str) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text).map_err(|e| convert_io_to_display_error(e, "write output"))?;
    Ok(())
}

fn emit_rows_json(rows: &[Row]) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(rows)
        .map_err(|e| DisplayError::Serialization(e.to_string()))?;
    emit(&text)
}

/// Collect repeated `--param key=value` flags.
pub fn parse_parameters(raw: &[String]) -> Result<Map<String, Value>, AppError> {
    let mut parameters = Map::new();
    for item in raw {
        let (key, value) = parse_parameter(item)?;
        parameters.insert(key, Value::String(value));
    }
    Ok(parameters)
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    /// `connect` is only awaited by `validate`.
    pub async fn handle<F, Fut>(
        &self,
        command: ConfigCommands,
        service: &mut ConfigService,
        config_path: Option<PathBuf>,
        verbose: bool,
        connect: F,
    ) -> Result<(), AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<VenomicsClient, AppError>>,
    {
        match command {
            ConfigCommands::Show => {
                let location = match &config_path {
                    Some(path) => path.display().to_string(),
                    None => Config::config_file_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "(unknown)".to_string()),
                };
                let url = service.get_url().unwrap_or_else(|| "(not set)".to_string());
                let api_key = if has_api_key() {
                    "set via VENOMICS_API_KEY"
                } else {
                    "not set (will prompt)"
                };

                emit(&format!(
                    "Config file:    {}\nURL:            {}\nAPI key:        {}\n\
                     Timeout:        {}s\nPoll interval:  {}s\nPage size:      {}",
                    location,
                    url,
                    api_key,
                    service.timeout().as_secs(),
                    service.poll_interval().as_secs(),
                    service.page_size()
                ))
            }
            ConfigCommands::Set {
                url,
                timeout,
                poll_interval,
                page_size,
            } => {
                if url.is_none() && timeout.is_none() && poll_interval.is_none() && page_size.is_none()
                {
                    return Err(CliError::InvalidArguments(
                        "Nothing to set. Use --url, --timeout, --poll-interval or --page-size"
                            .to_string(),
                    )
                    .into());
                }

                if let Some(url) = url {
                    validate_url(&url)?;
                    service.set_url(url);
                }
                if let Some(secs) = timeout {
                    validate_positive("timeout", secs)?;
                    service.set_timeout_secs(secs);
                }
                if let Some(secs) = poll_interval {
                    validate_positive("poll-interval", secs)?;
                    service.set_poll_interval_secs(secs);
                }
                if let Some(size) = page_size {
                    validate_positive("page-size", u64::from(size))?;
                    service.set_page_size(size);
                }

                print_verbose(verbose, "Saving configuration");
                service.save_config(config_path)?;
                display_status("Configuration saved", OperationStatus::Success);
                Ok(())
            }
            ConfigCommands::Validate => {
                service.validate()?;
                let client = connect().await?;
                display_status(
                    &format!("API key accepted by {}", client.host()),
                    OperationStatus::Success,
                );
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct LookupHandler;

impl LookupHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        client: &VenomicsClient,
        targets: &[String],
        verbose: bool,
    ) -> Result<(), AppError> {
        let scanner = SensitiveDataScanner::new(client, targets);
        if scanner.targets().is_empty() {
            return Err(CliError::InvalidArguments("No non-empty lookup values given".to_string()).into());
        }
        print_verbose(
            verbose,
            &format!("Looking for {} value(s)", scanner.targets().len()),
        );

        let mut progress = |phase: ScanPhase, done: usize, total: usize| {
            show_progress_bar(phase.label(), done, total, PROGRESS_BAR_WIDTH);
        };
        let report = scanner.scan(Some(&mut progress)).await?;

        if report.is_empty() {
            display_status("No matches found", OperationStatus::Success);
            return Ok(());
        }
        for url in report.urls() {
            emit(url)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ExportHandler;

impl ExportHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, client: &VenomicsClient, output_dir: PathBuf) -> Result<(), AppError> {
        let exporter = QueryExporter::new(output_dir);

        let mut spinner = ProgressSpinner::new("Exporting queries...");
        spinner.start();
        let result = exporter.export(client).await;
        spinner.stop(None);

        let written = result?;
        display_status(
            &format!(
                "Exported {} queries to {}",
                written.len(),
                exporter.output_dir().display()
            ),
            OperationStatus::Success,
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct RefreshHandler;

impl RefreshHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        args: RefreshArgs,
        config: &ClientConfig,
        options: &PollOptions,
        verbose: bool,
    ) -> Result<(), AppError> {
        let parameters = parse_parameters(&args.param)?;
        print_verbose(
            verbose,
            &format!("Refreshing query {} with {} parameter(s)", args.id, parameters.len()),
        );

        let mut spinner = ProgressSpinner::new(format!("Running query {}...", args.id));
        spinner.start();
        let result = fresh_query_result(config, args.id, &parameters, options).await;
        spinner.stop(None);

        let rows = result?;
        match args.format {
            OutputFormat::Json => emit_rows_json(&rows),
            OutputFormat::Table => emit(&TableDisplay::new().render_rows(&rows)),
        }
    }
}

#[derive(Default)]
pub struct QueryHandler;

impl QueryHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, command: QueryCommands, client: &VenomicsClient) -> Result<(), AppError> {
        let display = TableDisplay::new();
        match command {
            QueryCommands::List {
                favorites,
                scheduled,
            } => {
                let queries = if scheduled {
                    client.scheduled_queries().await?
                } else if favorites {
                    paginate(
                        move |page| client.queries(page, true),
                        client.first_page(),
                    )
                    .await?
                } else {
                    client.all_queries().await?
                };
                emit(&display.render_query_list(&queries))
            }
            QueryCommands::Show { id } => {
                let query = client.query(id).await?;
                emit(&display.render_query_detail(&query))
            }
            QueryCommands::Duplicate { id, name } => {
                let copy = client.duplicate_query(id, name.as_deref()).await?;
                display_status(
                    &format!("Created query #{} \"{}\"", copy.id, copy.name),
                    OperationStatus::Success,
                );
                emit(&client.query_url(copy.id))
            }
            QueryCommands::Favorite { id } => {
                client.favorite_query(id).await?;
                display_status(&format!("Query #{} marked as favorite", id), OperationStatus::Success);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct DashboardHandler;

impl DashboardHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: DashboardCommands,
        client: &VenomicsClient,
    ) -> Result<(), AppError> {
        match command {
            DashboardCommands::List { favorites } => {
                let dashboards = if favorites {
                    paginate(
                        move |page| client.dashboards(page, true),
                        client.first_page(),
                    )
                    .await?
                } else {
                    client.all_dashboards().await?
                };
                emit(&TableDisplay::new().render_dashboard_list(&dashboards))
            }
            DashboardCommands::Duplicate { slug, name } => {
                let copy = client.duplicate_dashboard(&slug, name.as_deref()).await?;
                display_status(
                    &format!(
                        "Created dashboard \"{}\" with {} widgets",
                        copy.name,
                        copy.widgets.len()
                    ),
                    OperationStatus::Success,
                );
                emit(&client.dashboard_url(&copy.slug))
            }
            DashboardCommands::Favorite { slug } => {
                client.favorite_dashboard(&slug).await?;
                display_status(
                    &format!("Dashboard {} marked as favorite", slug),
                    OperationStatus::Success,
                );
                Ok(())
            }
        }
    }
}

/// Read-only listings without paging of their own.
#[derive(Default)]
pub struct ListHandler;

impl ListHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn alerts(&self, command: AlertCommands, client: &VenomicsClient) -> Result<(), AppError> {
        match command {
            AlertCommands::List => {
                let alerts = client.alerts().await?;
                emit(&TableDisplay::new().render_alert_list(&alerts))
            }
        }
    }

    pub async fn users(&self, command: UserCommands, client: &VenomicsClient) -> Result<(), AppError> {
        match command {
            UserCommands::List { disabled } => {
                let users = client.all_users(disabled).await?;
                emit(&TableDisplay::new().render_user_list(&users))
            }
        }
    }

    pub async fn data_sources(
        &self,
        command: DataSourceCommands,
        client: &VenomicsClient,
    ) -> Result<(), AppError> {
        match command {
            DataSourceCommands::List => {
                let sources = client.data_sources().await?;
                emit(&TableDisplay::new().render_data_source_list(&sources))
            }
        }
    }
}
