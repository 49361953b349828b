use clap::{Parser, Subcommand};
use shrtn::admin::{self, AdminCommands};
use shrtn::config::Config;
use shrtn::error::AppResult;
use shrtn::server;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// shrtn - A minimal URL shortener
#[derive(Parser, Debug)]
#[command(name = "shrtn")]
#[command(version)]
#[command(about = "A minimal URL shortener", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,

        /// Run migrations on startup
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        migrate: bool,
    },

    /// Administrative commands
    Admin {
        #[command(subcommand)]
        admin_command: AdminCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    if let Err(e) = run(cli.command).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    let mut config = Config::from_env()?;

    match command {
        Commands::Server {
            host,
            port,
            migrate,
        } => {
            // CLI args take precedence over the environment
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            server::run_server(config, migrate).await
        }
        Commands::Admin { admin_command } => admin::run(config, admin_command).await,
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
