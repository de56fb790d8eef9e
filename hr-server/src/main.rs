use hr_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv is optional; real env vars win)
    let _ = dotenv::dotenv();

    // 2. Load configuration, then logging into the work dir
    let config = Config::from_env();
    let log_dir = std::path::Path::new(&config.work_dir).join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    hr_server::init_logger_with_file(None, log_dir.to_str());

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "HR server starting"
    );

    // 3. Open storage and wire up services
    let state = ServerState::initialize(&config)?;

    // 4. Serve
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}
