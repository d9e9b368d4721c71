use clap::Parser;
use jakarta_transit_lib::{FitConfig, JAKARTA_CENTER};
use std::path::PathBuf;

/// Rupabumi Indonesia query endpoint for the KRL rail network.
/// Always-true predicate, wildcard field selection, GeoJSON output.
pub const KRL_QUERY_URL: &str = "https://geoservices.big.go.id/rbi/rest/services/BASEMAP/Rupabumi_Indonesia/MapServer/340/query?where=1%3D1&f=geojson&outFields=*";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Jakarta Transit Map - interactive map of Jakarta's public transit routes
pub struct Settings {
    /// Directory holding the local route GeoJSON assets
    #[clap(long, value_name = "DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Query endpoint returning the KRL network as a GeoJSON feature collection
    #[clap(long, value_name = "URL", default_value = KRL_QUERY_URL)]
    pub krl_endpoint: String,

    /// Skip the remote KRL fetch entirely (offline use)
    #[clap(long, default_value = "false")]
    pub skip_remote: bool,

    /// Fallback zoom level when no data can be fitted
    #[clap(long, default_value = "11.0")]
    pub default_zoom: f64,

    /// Lower zoom clamp for the fitted view
    #[clap(long, default_value = "10.0")]
    pub min_zoom: f64,

    /// Upper zoom clamp for the fitted view
    #[clap(long, default_value = "14.0")]
    pub fit_max_zoom: f64,

    /// Combined bounds spanning more degrees than this fall back to the default view
    #[clap(long, default_value = "0.5")]
    pub scatter_threshold: f64,

    /// Fraction by which the fitted bounds are expanded on each side
    #[clap(long, default_value = "0.1")]
    pub fit_padding: f64,

    /// Ignore previously persisted state and start fresh
    #[clap(long, default_value = "false")]
    pub ignore_persisted: bool,
}

impl Settings {
    /// View-fitter configuration derived from the CLI flags
    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            default_center: JAKARTA_CENTER,
            default_zoom: self.default_zoom,
            min_zoom: self.min_zoom,
            fit_max_zoom: self.fit_max_zoom,
            scatter_threshold_deg: self.scatter_threshold,
            padding_fraction: self.fit_padding,
        }
    }
}
