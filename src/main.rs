//! CLI entry point for portfolio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_rs::commands::new::{NewEntry, NewKind};
use portfolio_rs::helpers::local_base_url;

#[derive(Parser)]
#[command(name = "portfolio-rs")]
#[command(version)]
#[command(about = "A personal portfolio and blog server", long_about = None)]
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
    /// Initialize a new portfolio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Add a new writing or project
    New {
        /// Kind of entry (writing, project)
        #[arg(short, long, default_value = "writing")]
        layout: NewKind,

        /// Title of the new entry
        title: String,

        /// Short description
        #[arg(long, default_value = "")]
        desc: String,

        /// Repository link (projects only)
        #[arg(long)]
        github: Option<String>,
    },

    /// Start the site server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List site content
    List {
        /// Type of content to list (projects, writings)
        #[arg(default_value = "projects")]
        r#type: String,
    },

    /// Send a message through a running site's contact form
    Contact {
        /// Message body
        #[arg(short, long)]
        message: String,

        /// Sender name
        #[arg(short, long)]
        name: Option<String>,

        /// Sender email
        #[arg(short, long)]
        email: Option<String>,

        /// Site URL (defaults to the configured base URL)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "portfolio_rs=debug,info"
    } else {
        "portfolio_rs=info"
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
            tracing::info!("Initializing portfolio site in {:?}", target_dir);
            portfolio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized portfolio site in {:?}", target_dir);
        }

        Commands::New {
            layout,
            title,
            desc,
            github,
        } => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            tracing::info!("Creating new {:?} with title: {}", layout, title);
            let entry = NewEntry {
                title: &title,
                desc: &desc,
                github: github.as_deref(),
            };
            portfolio_rs::commands::new::create(&portfolio, layout, &entry)?;
        }

        Commands::Server { port, ip } => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| portfolio.config.server.ip.clone());
            let port = port.unwrap_or(portfolio.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            portfolio_rs::server::start(&portfolio, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            portfolio_rs::commands::list::run(&portfolio, &r#type).await?;
        }

        Commands::Contact {
            message,
            name,
            email,
            url,
        } => {
            let portfolio = portfolio_rs::Portfolio::new(&base_dir)?;
            let base_url = url.unwrap_or_else(|| {
                if portfolio.config.base_url.is_empty() {
                    let server = &portfolio.config.server;
                    local_base_url(&server.ip, server.port)
                } else {
                    portfolio.config.base_url.clone()
                }
            });
            portfolio_rs::commands::contact::run(&base_url, name, email, message).await?;
        }

        Commands::Version => {
            println!("portfolio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
