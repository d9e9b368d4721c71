//! View fitter
//!
//! Picks the initial viewport from whatever layers actually loaded. Data
//! that is missing or implausibly scattered (a server answering with
//! country-wide geometry) falls back to the fixed Jakarta view instead of
//! zooming out absurdly.

use crate::registry::LayerRegistry;

/// Fixed map center of Jakarta (latitude, longitude)
pub const JAKARTA_CENTER: (f64, f64) = (-6.2088, 106.8456);

/// Thresholds and defaults for viewport selection.
///
/// These values are tuned empirically for Jakarta's scale and are plain
/// configuration, overridable from the CLI, not derived constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitConfig {
    /// Fallback center (latitude, longitude)
    pub default_center: (f64, f64),
    /// Fallback zoom level
    pub default_zoom: f64,
    /// Lower zoom clamp for the fitted view
    pub min_zoom: f64,
    /// Upper zoom clamp for the fitted view
    pub fit_max_zoom: f64,
    /// Combined bounds spanning more degrees than this are treated as bad data
    pub scatter_threshold_deg: f64,
    /// Fraction by which the fitted bounds are expanded on each side
    pub padding_fraction: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            default_center: JAKARTA_CENTER,
            default_zoom: 11.0,
            min_zoom: 10.0,
            fit_max_zoom: 14.0,
            scatter_threshold_deg: 0.5,
            padding_fraction: 0.1,
        }
    }
}

/// A map viewport: center position and zoom level
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Center as (latitude, longitude)
    pub center: (f64, f64),
    /// Zoom level in tile-pyramid units
    pub zoom: f64,
}

impl Viewport {
    fn default_view(config: &FitConfig) -> Self {
        Self {
            center: config.default_center,
            zoom: config.default_zoom,
        }
    }
}

/// Compute the viewport for the current registry contents.
///
/// - No registered layers: the fixed default view.
/// - Combined bounds wider than the scatter threshold in either axis:
///   the default view, the data is assumed bogus.
/// - Otherwise: center on the padded combined bounds with the zoom
///   clamped to `[min_zoom, fit_max_zoom]`.
pub fn fit_viewport(registry: &LayerRegistry, config: &FitConfig) -> Viewport {
    let Some(bounds) = registry.combined_bounds() else {
        tracing::debug!("no layers registered, using default view");
        return Viewport::default_view(config);
    };

    let lat_span = bounds.height();
    let lon_span = bounds.width();

    if lat_span > config.scatter_threshold_deg || lon_span > config.scatter_threshold_deg {
        tracing::warn!(
            lat_span,
            lon_span,
            threshold = config.scatter_threshold_deg,
            "combined bounds implausibly large, using default view"
        );
        return Viewport::default_view(config);
    }

    let padded_lat_span = lat_span * (1.0 + 2.0 * config.padding_fraction);
    let padded_lon_span = lon_span * (1.0 + 2.0 * config.padding_fraction);
    let max_span = padded_lat_span.max(padded_lon_span);

    let zoom = if max_span > 0.0 {
        // Zoom that fits max_span degrees into a few-tile-wide view.
        let estimate = (4.0 * 360.0 / max_span).log2() - 0.5;
        estimate.clamp(config.min_zoom, config.fit_max_zoom)
    } else {
        // Degenerate single-point bounds
        config.fit_max_zoom
    };

    let center = bounds.center();
    Viewport {
        center: (center.y, center.x),
        zoom,
    }
}
