// Main entry point
use clap::Parser;
use colored::Colorize;
use nlq::application::submit::ResponseOrdering;
use nlq::infrastructure::config::{self, load_config, Config, Logging};
use nlq::interfaces::cli::Cli;
use nlq::state::AppState;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn signal handler task
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = load_config()?;
    apply_overrides(&mut config, &cli);

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    let state = AppState::new(config)?;

    if cli.status {
        print_status(&state);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.interactive {
        run_interactive(state, shutdown_rx).await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Blank input still goes through the submitter so it renders the validation message
    let query = cli.query.join(" ");
    let submission = tokio::select! {
        submission = state.submitter.submit_query(&query, state.region.as_ref()) => submission,
        _ = shutdown_rx => {
            eprintln!("Query interrupted");
            return Ok(ExitCode::from(130));
        }
    };

    Ok(ExitCode::from(submission.outcome.exit_status()))
}

/// Command-line flags take precedence over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if cli.latest_only {
        config.latest_only = true;
    }
}

/// Submit every stdin line as its own concurrent query
async fn run_interactive(
    state: AppState,
    mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown_rx => {
                in_flight.abort_all();
                return Ok(());
            }
        };

        let Some(line) = line else { break };
        if matches!(line.trim(), ":quit" | ":q") {
            break;
        }

        let state = state.clone();
        in_flight.spawn(async move {
            state
                .submitter
                .submit_query(&line, state.region.as_ref())
                .await
        });

        // Reap finished submissions so the set does not grow unbounded
        while in_flight.try_join_next().is_some() {}
    }

    // Let queries already sent finish rendering
    while in_flight.join_next().await.is_some() {}
    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = logging.path.as_deref().filter(|p| !p.is_empty()) {
        // Log to file
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
        return Ok(());
    }

    // Log to stderr so logs never land in the output region
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(state: &AppState) {
    let config = &state.config;

    println!("{}", "nlq Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Endpoint: {}", config.endpoint);
    println!(
        "Timeout: {}",
        config
            .timeout_secs
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "Proxy: {}",
        config.http_proxy.as_deref().unwrap_or("none")
    );
    println!("Format: {:?}", config.format);
    println!("Theme: {}", config.theme);
    println!(
        "Ordering: {}",
        match state.submitter.ordering() {
            ResponseOrdering::LastArrival => "last arrival wins",
            ResponseOrdering::LatestOnly => "latest query only",
        }
    );
    println!(
        "Config: {}",
        nlq::infrastructure::config::get_config_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
}
