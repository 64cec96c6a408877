//! LexiLearn Server - HTTP REST API for the reading tutor
//!
//! This binary serves the reading-tutor backend: lesson management,
//! transcript scoring, and parent progress, behind bearer-token auth.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env in development
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
