use anyhow::{Context, Result};
use clap::Args;
use flakeview_client::ChangesClient;
use flakeview_common::FlakeviewConfig;
use flakeview_dashboard::{server, ProjectFlakyTestsState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Args)]
pub struct ServeArgs {
    /// Server bind address, overrides `dashboard.bind`
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

pub async fn handle_command(args: ServeArgs, config: &FlakeviewConfig) -> Result<()> {
    let bind = match args.bind {
        Some(bind) => bind,
        None => config
            .dashboard
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", config.dashboard.bind))?,
    };

    let client = ChangesClient::new(&config.api).context("Failed to create API client")?;
    info!("Proxying flaky test data from {}", client.base_url());

    let state = Arc::new(ProjectFlakyTestsState::new(client, &config.dashboard));
    server::serve(bind, state).await?;
    Ok(())
}
