//! CLI entry point for reportdesk

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reportdesk::commands;
use reportdesk::commands::list::parse_category;

#[derive(Parser)]
#[command(name = "reportdesk")]
#[command(version)]
#[command(about = "Markdown reports, models and slide decks for a research site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site with sample content
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new report or model
    New {
        /// Content type (report, model)
        r#type: String,

        /// Title of the new document
        title: String,

        /// Id to use instead of the next free number
        #[arg(long)]
        id: Option<String>,
    },

    /// List reports or models
    #[command(alias = "ls")]
    List {
        /// Content type (reports, models)
        #[arg(default_value = "reports")]
        r#type: String,
    },

    /// Show a single report or model
    Show {
        /// Content type (report, model)
        r#type: String,

        /// Document id
        id: String,

        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Walk through a report's slide deck
    Slides {
        /// Report id
        id: String,
    },

    /// Count documents per category
    Status,

    /// Export every record as JSON to the public folder
    Export,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "reportdesk=debug,info"
    } else {
        "reportdesk=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized research site in {:?}", target_dir);
        }

        Commands::New { r#type, title, id } => {
            let site = reportdesk::Site::new(&base_dir)?;
            let category = parse_category(&r#type)?;
            let path =
                commands::new::create_document(&site, category, &title, id.as_deref()).await?;
            println!("Created: {:?}", path);
        }

        Commands::List { r#type } => {
            let site = reportdesk::Site::new(&base_dir)?;
            commands::list::run(&site, &r#type).await?;
        }

        Commands::Show { r#type, id, json } => {
            let site = reportdesk::Site::new(&base_dir)?;
            if !commands::show::run(&site, &r#type, &id, json).await? {
                std::process::exit(1);
            }
        }

        Commands::Slides { id } => {
            let site = reportdesk::Site::new(&base_dir)?;
            if !commands::slides::run(&site, &id).await? {
                std::process::exit(1);
            }
        }

        Commands::Status => {
            let site = reportdesk::Site::new(&base_dir)?;
            commands::status::run(&site).await?;
        }

        Commands::Export => {
            let site = reportdesk::Site::new(&base_dir)?;
            tracing::info!("Exporting content to {:?}", site.public_dir);
            site.export().await?;
            println!("Exported successfully!");
        }

        Commands::Clean => {
            let site = reportdesk::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("reportdesk version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
