// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use retag_application::{CatalogSession, Pipeline};
use retag_catalog::CatalogClient;
use retag_config::{load as load_config, CatalogConfig, LibraryConfig};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(None)?;
    init_tracing(&config.telemetry.log_level);

    let dir = target_directory(std::env::args().nth(1), &config.library);
    let (client_id, client_secret) = credentials(&config.catalog)?;

    let client = CatalogClient::builder()
        .api_base_url(config.catalog.api_base_url.as_str())
        .auth_base_url(config.catalog.auth_base_url.as_str())
        .search_limit(config.catalog.search_limit)
        .build()
        .context("building catalog client")?;

    info!(target: "cli", "authenticating with catalog");
    let session = client
        .authenticate(&client_id, &client_secret)
        .await
        .context("catalog authentication")?;

    let pipeline = Pipeline::new(CatalogSession::new(client, session));
    let count = pipeline
        .run(&dir, &config.library.extension)
        .await
        .context("pipeline run")?;

    info!(target: "cli", count, dir = %dir.display(), "all files rewritten");
    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer().with_target(true).with_level(true);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// The directory to process: first positional argument, else the configured
/// library path.
fn target_directory(arg: Option<String>, library: &LibraryConfig) -> PathBuf {
    match arg {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(&library.path),
    }
}

fn credentials(catalog: &CatalogConfig) -> Result<(String, String)> {
    match (&catalog.client_id, &catalog.client_secret) {
        (Some(id), Some(secret)) => Ok((id.clone(), secret.clone())),
        _ => bail!(
            "catalog credentials missing: set RETAG_CATALOG__CLIENT_ID and \
             RETAG_CATALOG__CLIENT_SECRET (or the [catalog] section of the config file)"
        ),
    }
}
