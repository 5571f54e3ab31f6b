//! CLI entry point for dicedocs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dicedocs::Site;

#[derive(Parser)]
#[command(name = "dicedocs")]
#[command(author = "DiceDB contributors")]
#[command(version)]
#[command(about = "Static site generator for the DiceDB docs, blog and command reference", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (docs, blog, commands, versions, routes)
        #[arg(default_value = "docs")]
        r#type: String,
    },

    /// Add frontmatter to command markdown files from DiceDB command metadata
    Frontmatter {
        /// Path to the DiceDB source root
        #[arg(long)]
        dicedb_root: PathBuf,

        /// Markdown files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate the index of commands inherited from Valkey
    ValkeyIndex {
        /// Path to the DiceDB source root
        #[arg(long)]
        dicedb_root: PathBuf,

        /// Output MDX file path
        #[arg(long)]
        output: PathBuf,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "dicedocs=debug,info"
    } else {
        "dicedocs=info"
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
            dicedocs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Generate { watch } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                dicedocs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = Site::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            dicedocs::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            dicedocs::commands::list::run(&site, &r#type)?;
        }

        Commands::Frontmatter { dicedb_root, files } => {
            let site = Site::new(&base_dir)?;
            dicedocs::commands::frontmatter::run(&site, &dicedb_root, &files)?;
        }

        Commands::ValkeyIndex {
            dicedb_root,
            output,
        } => {
            let site = Site::new(&base_dir)?;
            dicedocs::commands::valkey_index::run(&site, &dicedb_root, &output)?;
        }

        Commands::Version => {
            println!("dicedocs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
