//! Wallet session front-end (terminal edition).
//!
//! ```text
//!   config (TOML + PROJECT_ID)
//!        │
//!        ▼
//!   ConnectionConfig ──▶ SessionController ──▶ TerminalModal
//!        │                    │   ▲                 │
//!        │                    │   └── visibility ◀──┘
//!        │                    ▼
//!        │              AccountProber ──▶ RPC (injected / transport)
//!        ▼
//!   TokenSymbolReader ──▶ RPC (default chain)
//! ```
//!
//! Runs on a single-threaded runtime: every handler awaits its calls in
//! order and nothing is cancelled.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::AsyncWriteExt;

use wallet_session::config::{load_or_default, schema::PROJECT_ID_ENV_VAR};
use wallet_session::modal::PromptSource;
use wallet_session::observability::{logging, metrics};
use wallet_session::{ToggleAction, WalletApp};

#[derive(Parser)]
#[command(name = "wallet-session")]
#[command(about = "Connect a wallet, read a token symbol and probe the account", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the config file.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Interactive session (default)
    Run,
    /// Read the token symbol once and exit
    Symbol,
    /// Print the session status after restore and exit
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.observability.log_level);
    logging::init_logging(level);

    tracing::info!(
        chains = config.effective_chains().len(),
        token = %config.reader.token_address,
        "Configuration loaded"
    );
    if config.project.id.is_empty() {
        tracing::warn!(
            env = PROJECT_ID_ENV_VAR,
            "No project id configured; interactive pairing will be rejected by the relay"
        );
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let prompt = Arc::new(PromptSource::stdin());
    let app = WalletApp::new(&config, Arc::clone(&prompt))?;
    app.initialize().await?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_interactive(&app, &prompt).await?,
        Commands::Symbol => {
            app.read_token_symbol().await;
            println!("{}", display_symbol(&app));
        }
        Commands::Status => println!("{}", serde_json::to_string_pretty(&app.status())?),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn display_symbol(app: &WalletApp) -> String {
    app.symbol().map_or_else(|| "-".to_string(), |s| s.as_ref().clone())
}

async fn run_interactive(
    app: &WalletApp,
    prompt: &PromptSource,
) -> Result<(), Box<dyn std::error::Error>> {
    print_help();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = prompt.next_line().await? else {
            break;
        };

        match line.as_str() {
            "" => continue,
            "toggle" | "t" => match app.toggle_connection().await {
                Ok(ToggleAction::Disconnected) => println!("Disconnected"),
                Ok(ToggleAction::OpenedModal) => {}
                Err(e) => tracing::error!(error = %e, "Toggle failed"),
            },
            "symbol" | "s" => {
                app.read_token_symbol().await;
                println!("Symbol: {}", display_symbol(app));
            }
            "status" => println!("{}", serde_json::to_string_pretty(&app.status())?),
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            other => println!("Unknown command '{}', try 'help'", other),
        }
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  toggle (t)   connect via the modal, or disconnect");
    println!("  symbol (s)   read the token symbol");
    println!("  status       show the session status");
    println!("  quit (q)     exit");
}
