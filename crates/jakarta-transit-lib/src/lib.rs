//! Jakarta Transit Lib - Core Logic for the Jakarta Transit Map
//!
//! This library holds the UI-free parts of the transit map: static route
//! configuration, the Jakarta bounding region with its GeoJSON feature
//! filter, the layer registry with visibility/stacking state, and the
//! view fitter that picks an initial viewport from loaded data.
//!
//! # Architecture
//!
//! - **[`RouteKind`]**: Static descriptors for the four transit networks
//! - **[`Region`]**: Rectangular lat/lon window with a per-geometry inclusion test
//! - **[`RouteLayer`] / [`LayerRegistry`]**: Drawable layers and their stacking order
//! - **[`fit_viewport`]**: Viewport selection with scatter/zoom safeguards

mod bounds;
mod fit;
mod registry;
mod routes;

// Public API exports
pub use bounds::{JAKARTA, Region, filter_features};
pub use fit::{FitConfig, JAKARTA_CENTER, Viewport, fit_viewport};
pub use registry::{LayerRegistry, RouteLayer};
pub use routes::{RouteKind, RouteStyle};

use geojson::{FeatureCollection, GeoJson};

/// Error types for the data module
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("GeoJSON parsing error: {0}")]
    GeoJsonParse(#[from] geojson::Error),

    #[error("payload is not a feature collection")]
    NotAFeatureCollection,
}

pub type Result<T> = std::result::Result<T, DataError>;

/// Parse a raw GeoJSON document into a feature collection.
///
/// Both local asset files and the remote query endpoint return the same
/// interchange format, so this is the single parse boundary for loaders.
pub fn parse_collection(raw: &str) -> Result<FeatureCollection> {
    match raw.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(DataError::NotAFeatureCollection),
    }
}
