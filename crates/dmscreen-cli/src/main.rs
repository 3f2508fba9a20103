//! DM Screen operator console entry point.

use std::sync::Arc;

use dmscreen_cli::app::{App, Flow};
use dmscreen_cli::console::{self, HELP};
use dmscreen_cli::error::AppError;
use dmscreen_core::clock::SystemClock;
use dmscreen_http::{HttpCampaignService, ServiceConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Logs go to stderr so they never interleave with the console.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let config = ServiceConfig::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        history_limit = config.history_limit,
        "Starting DM Screen console"
    );
    let service = HttpCampaignService::new(&config)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let printer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let app = App::new(Arc::new(service), Arc::new(SystemClock), tx);
    app.say(HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match console::parse(&line) {
            Ok(input) => input,
            Err(error) => {
                app.say(format!("! {error}"));
                continue;
            }
        };
        if let (Flow::Quit, _) = app.dispatch(input).await {
            break;
        }
    }

    tracing::info!("DM Screen console closed");
    // Dropping the app closes the channel once background tasks finish.
    drop(app);
    match printer.await {
        Ok(result) => result?,
        Err(error) => tracing::warn!(%error, "output task ended abnormally"),
    }
    Ok(())
}
