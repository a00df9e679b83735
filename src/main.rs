use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use contentdesk::{
    api::{ApiClient, ContentBackend},
    cli::{Cli, Commands},
    config::Config,
    console::App,
    models::{Chapter, Resource, Topic},
    report,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; the flag wins over the environment
    let config = Config::from_env()?.with_api_url(cli.api_url.clone());
    config.validate()?;
    let command = cli.command.unwrap_or(Commands::Tui);
    init_logging(&config.log_dir, command != Commands::Tui);

    info!("Using content backend at {}", config.api_url);
    let client = ApiClient::new(&config).context("Failed to build HTTP client")?;

    match command {
        Commands::Tui => run_console(config, Arc::new(client)).await,
        Commands::List { resource } => {
            let resource = Commands::parse_resource(&resource)?;
            println!("{}", report::resource_table(&client, resource).await?);
            Ok(())
        }
        Commands::Show { resource, id } => {
            let resource = Commands::parse_resource(&resource)?;
            let value: serde_json::Value = client
                .get(resource, id)
                .await
                .with_context(|| format!("Failed to fetch {} {}", resource.singular(), id))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Commands::Topic { id } => {
            let (topic, chapters) = tokio::try_join!(
                client.get::<Topic>(Resource::Topics, id),
                client.list_filtered::<Chapter>(Resource::Chapters, "topic", id),
            )
            .context("Failed to fetch topic details")?;
            println!("{}", report::topic_summary(&topic, &chapters));
            Ok(())
        }
    }
}

/// Log to `contentdesk.log`, and to stderr as well outside the console
fn init_logging(log_dir: &Path, to_stderr: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Set default log level to INFO if not specified
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contentdesk=info"))
    };

    let file_appender = tracing_appender::rolling::never(log_dir, "contentdesk.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(filter());

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

async fn run_console(config: Config, backend: Arc<dyn ContentBackend>) -> Result<()> {
    info!("Starting contentdesk console");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(config, backend);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => info!("contentdesk exited successfully"),
        Err(e) => error!("contentdesk encountered an error: {:#}", e),
    }
    result
}
