// ==========================================
// Voltway Industrial OS - Service entry point
// ==========================================
// Usage: voltway-ios [db_path] [--watch] [--ask "<prompt>"]
// Prints the dashboard as JSON; --watch keeps polling until Ctrl-C
// ==========================================

use anyhow::{anyhow, Result};
use voltway_ios::app::{get_default_db_path, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("VOLTWAY_LOG_FORMAT").as_deref() == Ok("json") {
        voltway_ios::logging::init_json();
    } else {
        voltway_ios::logging::init();
    }

    tracing::info!("{} {}", voltway_ios::APP_NAME, voltway_ios::VERSION);

    let mut args = std::env::args().skip(1);
    let mut db_path = None;
    let mut watch = false;
    let mut prompt = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--watch" => watch = true,
            "--ask" => prompt = args.next(),
            other => db_path = Some(other.to_string()),
        }
    }
    let db_path = db_path.unwrap_or_else(get_default_db_path);
    tracing::info!(db_path = %db_path, "using database");

    let state = AppState::new(&db_path).await.map_err(|e| anyhow!(e))?;
    state.refresh().await.map_err(|e| anyhow!(e))?;

    let dashboard = state.dashboard_api.get_dashboard().await?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    if let Some(prompt) = prompt {
        let reply = state.chat_api.ask(&prompt).await?;
        println!("\n{}", reply.text);
    }

    if watch {
        let polling = state.start_polling();
        tokio::signal::ctrl_c().await?;
        tracing::info!("shutting down");
        polling.shutdown().await;
    }
    Ok(())
}
