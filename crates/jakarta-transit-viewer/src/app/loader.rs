//! Asynchronous route data loaders
//!
//! One loader per route: the three local networks are read from GeoJSON
//! asset files, the KRL network is fetched from the Rupabumi Indonesia
//! query service and cut down to the Jakarta bounds. All loaders run
//! concurrently and every failure is contained at the loader boundary:
//! a route that cannot be loaded is logged as a warning and simply left
//! absent from the registry, it never fails its siblings or the startup
//! sequence.

use crate::app::settings::Settings;
use jakarta_transit_lib::{
    JAKARTA, LayerRegistry, Region, RouteKind, RouteLayer, filter_features, parse_collection,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Registry shared between the loaders, the render plugin and the UI
pub type SharedRegistry = Arc<RwLock<LayerRegistry>>;

/// Errors contained at the loader boundary
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Parse(#[from] jakarta_transit_lib::DataError),

    #[error("no features within the Jakarta bounds")]
    EmptyAfterFilter,
}

/// Read and parse a local GeoJSON asset, pre-shaped for the map
async fn load_local(
    assets_dir: &Path,
    kind: RouteKind,
    file: &str,
) -> Result<RouteLayer, LoadError> {
    let path = assets_dir.join(file);
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
    let collection = parse_collection(&raw)?;
    Ok(RouteLayer::from_features(kind, &collection))
}

/// Fetch a feature collection from the remote query endpoint and keep
/// only the part inside the region
async fn load_remote(
    client: &reqwest::Client,
    url: &str,
    kind: RouteKind,
    region: &Region,
) -> Result<RouteLayer, LoadError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status));
    }
    let raw = response.text().await?;
    build_filtered_layer(&raw, kind, region)
}

/// Parse, bounds-filter and build a layer from a raw remote payload.
/// Split out of [`load_remote`] so it is testable without a server.
fn build_filtered_layer(
    raw: &str,
    kind: RouteKind,
    region: &Region,
) -> Result<RouteLayer, LoadError> {
    let collection = parse_collection(raw)?;
    let filtered = filter_features(&collection, region);
    if filtered.features.is_empty() {
        return Err(LoadError::EmptyAfterFilter);
    }
    Ok(RouteLayer::from_features(kind, &filtered))
}

async fn load_route(
    settings: &Settings,
    client: &reqwest::Client,
    kind: RouteKind,
) -> Result<RouteLayer, LoadError> {
    match kind.source_file() {
        Some(file) => load_local(&settings.assets_dir, kind, file).await,
        None => load_remote(client, &settings.krl_endpoint, kind, &JAKARTA).await,
    }
}

/// Load every route concurrently and register whatever succeeds.
///
/// This is a join-all-settle, not fail-fast: a slow or failing source
/// never blocks the others, and each loader writes its own registry key
/// so concurrent completion cannot collide. Afterwards the primary
/// route is pushed to the back in case completion order put it on top.
pub async fn load_all(settings: &Settings, registry: &SharedRegistry) {
    let client = reqwest::Client::new();

    let run = |kind: RouteKind| {
        let client = client.clone();
        async move {
            if kind.source_file().is_none() && settings.skip_remote {
                tracing::info!(route = kind.id(), "skipping remote fetch (--skip-remote)");
                return;
            }
            match load_route(settings, &client, kind).await {
                Ok(layer) => {
                    tracing::info!(
                        route = kind.id(),
                        features = layer.feature_count(),
                        "loaded route layer"
                    );
                    registry.write().unwrap().insert(layer);
                }
                Err(error) => {
                    tracing::warn!(
                        route = kind.id(),
                        %error,
                        "could not load route, layer will be absent"
                    );
                }
            }
        }
    };

    tokio::join!(
        run(RouteKind::Transjakarta),
        run(RouteKind::Mrt),
        run(RouteKind::Lrt),
        run(RouteKind::Krl),
    );

    registry.write().unwrap().send_to_back(RouteKind::Transjakarta);
}
