use crate::cli::command_handlers::{
    ConfigHandler, DashboardHandler, ExportHandler, ListHandler, LookupHandler, QueryHandler,
    RefreshHandler,
};
use crate::cli::main_types::Commands;
use std::path::PathBuf;
use venomics_core::api::client::VenomicsClient;
use venomics_core::api::transport::ClientConfig;
use venomics_core::core::services::config_service::ConfigService;
use venomics_core::display::ProgressSpinner;
use venomics_core::error::AppError;
use venomics_core::storage::config::Config;
use venomics_core::storage::credentials::resolve_api_key;
use venomics_core::utils::logging::print_verbose;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
    url: Option<String>,
    api_key: Option<String>,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
        url: Option<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            verbose,
            url,
            api_key,
        }
    }

    fn create_config_service(&self) -> ConfigService {
        ConfigService::new(self.config.clone())
    }

    // URL: --url > config file > VENOMICS_URL; key: --api-key/VENOMICS_API_KEY > prompt
    fn client_config(&self) -> Result<ClientConfig, AppError> {
        let service = self.create_config_service();
        let api_key = resolve_api_key(self.api_key.clone())?;
        let config = service.client_config(self.url.as_deref(), api_key)?;
        self.log_verbose(&format!("Using Venomics at {}", config.host));
        Ok(config)
    }

    async fn create_client(&self) -> Result<VenomicsClient, AppError> {
        let config = self.client_config()?;

        let mut spinner = ProgressSpinner::new("Connecting...");
        spinner.start();
        let client = VenomicsClient::connect(config).await;
        spinner.stop(None);

        client
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config { command } => {
                let mut service = self.create_config_service();
                ConfigHandler::new()
                    .handle(
                        command,
                        &mut service,
                        self.config_path.clone(),
                        self.verbose,
                        || self.create_client(),
                    )
                    .await
            }
            Commands::Lookup { targets } => {
                let client = self.create_client().await?;
                LookupHandler::new().handle(&client, &targets, self.verbose).await
            }
            Commands::Export { output_dir } => {
                let client = self.create_client().await?;
                ExportHandler::new().handle(&client, output_dir).await
            }
            Commands::Refresh(args) => {
                // One-off refresh runs on its own connection without a session check
                let config = self.client_config()?;
                let options = self
                    .create_config_service()
                    .poll_options(args.timeout.map(std::time::Duration::from_secs));
                RefreshHandler::new().handle(args, &config, &options, self.verbose).await
            }
            Commands::Query { command } => {
                let client = self.create_client().await?;
                QueryHandler::new().handle(command, &client).await
            }
            Commands::Dashboard { command } => {
                let client = self.create_client().await?;
                DashboardHandler::new().handle(command, &client).await
            }
            Commands::Alert { command } => {
                let client = self.create_client().await?;
                ListHandler::new().alerts(command, &client).await
            }
            Commands::User { command } => {
                let client = self.create_client().await?;
                ListHandler::new().users(command, &client).await
            }
            Commands::DataSource { command } => {
                let client = self.create_client().await?;
                ListHandler::new().data_sources(command, &client).await
            }
        }
    }
}
