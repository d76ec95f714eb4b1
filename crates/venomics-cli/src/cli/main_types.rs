use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "venomics")]
#[command(about = "Command line automations for the Venomics BI REST API")]
#[command(version)]
#[command(after_help = "Examples:
  venomics config set --url https://bi.example.com
  venomics lookup jane@example.com john@example.com   # Find personal data
  venomics export --output-dir ./queries              # Dump every query to .sql files
  venomics refresh 42 --param country=NL              # Run a query, print rows
  venomics query list --scheduled                     # List scheduled queries
  venomics dashboard duplicate sales --name 'Sales v2'

Environment Variables:
  VENOMICS_API_KEY   User API key (prompted for when missing)
  VENOMICS_URL       Venomics server URL (used when no URL is configured)")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Venomics server URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// User API key
    #[arg(long, global = true, env = "VENOMICS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management (show, set, validate)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Find queries and dashboards that mention any of the given values
    Lookup {
        /// Values to look for (e.g. email addresses), matched case-insensitively
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Write every query to query_<id>.sql
    Export {
        /// Directory for the exported files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Execute a query with fresh results and print its rows
    Refresh(RefreshArgs),
    /// Manage queries
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },
    /// Manage dashboards
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },
    /// Manage alerts
    Alert {
        #[command(subcommand)]
        command: AlertCommands,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage data sources
    DataSource {
        #[command(subcommand)]
        command: DataSourceCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    #[command(after_help = "Examples:
  venomics config set --url https://bi.example.com
  venomics config set --timeout 60 --poll-interval 2 --page-size 250")]
    Set {
        /// Venomics server URL
        #[arg(long)]
        url: Option<String>,
        /// HTTP request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Seconds between two job status checks
        #[arg(long)]
        poll_interval: Option<u64>,
        /// Page size for list endpoints
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Validate the API key and test the connection
    Validate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Arguments for a one-off query refresh
#[derive(Args, Debug)]
#[command(after_help = "Examples:
  venomics refresh 42
  venomics refresh 42 --param country=NL --param year=2024
  venomics refresh 42 --timeout 300 --format table")]
pub struct RefreshArgs {
    /// Query ID to execute
    pub id: u64,

    /// Query parameters in key=value format (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub param: Vec<String>,

    /// Give up after this many seconds (waits indefinitely by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// List queries
    List {
        /// Only favorite queries
        #[arg(long, conflicts_with = "scheduled")]
        favorites: bool,
        /// Only queries with a refresh schedule
        #[arg(long)]
        scheduled: bool,
    },
    /// Show one query with its text
    Show { id: u64 },
    /// Fork a query, optionally renaming the copy
    Duplicate {
        id: u64,
        /// Name for the copy
        #[arg(long)]
        name: Option<String>,
    },
    /// Mark a query as favorite
    Favorite { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum DashboardCommands {
    /// List dashboards
    List {
        /// Only favorite dashboards
        #[arg(long)]
        favorites: bool,
    },
    /// Copy a dashboard with its tags and widgets
    Duplicate {
        slug: String,
        /// Name for the copy (default: "Copy of: <name>")
        #[arg(long)]
        name: Option<String>,
    },
    /// Mark a dashboard as favorite
    Favorite { slug: String },
}

#[derive(Subcommand, Debug)]
pub enum AlertCommands {
    /// List alerts
    List,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        /// Only disabled users
        #[arg(long)]
        disabled: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataSourceCommands {
    /// List data sources
    List,
}
