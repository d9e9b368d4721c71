//! Route layers and the layer registry
//!
//! A [`RouteLayer`] is the drawable form of one route's feature collection:
//! polylines (including polygon outer rings) and standalone points, plus a
//! cached bounding box. The [`LayerRegistry`] owns every loaded layer and
//! tracks which ones are attached to the map and in what stacking order.
//! It is created empty at startup and populated incrementally as loaders
//! complete; a failed load simply leaves its entry absent.

use crate::routes::{RouteKind, RouteStyle};
use geo::{Coord, Rect};
use geojson::{FeatureCollection, Value};
use std::collections::HashMap;

/// Drawable layer for one transit route
#[derive(Clone, Debug)]
pub struct RouteLayer {
    kind: RouteKind,
    style: RouteStyle,
    /// Polylines in WGS84, `x` = longitude, `y` = latitude
    paths: Vec<Vec<Coord<f64>>>,
    /// Standalone point markers (stations etc.)
    points: Vec<Coord<f64>>,
    feature_count: usize,
    bounding_box: Option<Rect<f64>>,
}

fn position_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [lon, lat, ..] => Some(Coord { x: *lon, y: *lat }),
        _ => None,
    }
}

fn line_coords(line: &[Vec<f64>]) -> Vec<Coord<f64>> {
    line.iter().filter_map(|p| position_coord(p)).collect()
}

impl RouteLayer {
    /// Build a styled layer from a feature collection.
    ///
    /// Lines become polylines, polygons contribute their outer rings,
    /// points become markers. Unsupported geometry is skipped.
    pub fn from_features(kind: RouteKind, collection: &FeatureCollection) -> Self {
        let style = kind.style();
        let mut paths: Vec<Vec<Coord<f64>>> = Vec::new();
        let mut points: Vec<Coord<f64>> = Vec::new();

        for feature in &collection.features {
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            match &geometry.value {
                Value::Point(position) => points.extend(position_coord(position)),
                Value::MultiPoint(positions) => {
                    points.extend(positions.iter().filter_map(|p| position_coord(p)))
                }
                Value::LineString(line) => paths.push(line_coords(line)),
                Value::MultiLineString(lines) => {
                    paths.extend(lines.iter().map(|line| line_coords(line)))
                }
                Value::Polygon(rings) => {
                    paths.extend(rings.first().map(|outer| line_coords(outer)))
                }
                Value::MultiPolygon(polygons) => paths.extend(
                    polygons
                        .iter()
                        .filter_map(|rings| rings.first())
                        .map(|outer| line_coords(outer)),
                ),
                other => {
                    tracing::trace!(kind = kind.id(), geometry = other.type_name(), "skipping unsupported geometry");
                }
            }
        }
        paths.retain(|path| !path.is_empty());

        let bounding_box = bounding_box(paths.iter().flatten().chain(points.iter()));

        Self {
            kind,
            style,
            paths,
            points,
            feature_count: collection.features.len(),
            bounding_box,
        }
    }

    #[inline]
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    #[inline]
    pub fn style(&self) -> &RouteStyle {
        &self.style
    }

    #[inline]
    pub fn paths(&self) -> &[Vec<Coord<f64>>] {
        &self.paths
    }

    #[inline]
    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    /// Number of features in the source collection
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Bounding box in WGS84, `None` when the layer has no drawable geometry
    #[inline]
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        self.bounding_box
    }
}

fn bounding_box<'a>(coords: impl Iterator<Item = &'a Coord<f64>>) -> Option<Rect<f64>> {
    let mut result: Option<Rect<f64>> = None;
    for coord in coords {
        result = Some(match result {
            None => Rect::new(*coord, *coord),
            Some(rect) => Rect::new(
                Coord {
                    x: rect.min().x.min(coord.x),
                    y: rect.min().y.min(coord.y),
                },
                Coord {
                    x: rect.max().x.max(coord.x),
                    y: rect.max().y.max(coord.y),
                },
            ),
        });
    }
    result
}

/// Registry of loaded layers and their map attachment state
///
/// Loaders write disjoint keys, so concurrent population never collides.
/// Attach/detach on a kind that never loaded is a silent no-op, which is
/// exactly what the visibility toggles rely on.
#[derive(Clone, Debug, Default)]
pub struct LayerRegistry {
    layers: HashMap<RouteKind, RouteLayer>,
    /// Attached layers in back-to-front stacking order
    attached: Vec<RouteKind>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded layer and attach it on top of the stack
    pub fn insert(&mut self, layer: RouteLayer) {
        let kind = layer.kind();
        self.layers.insert(kind, layer);
        self.attach(kind);
    }

    #[inline]
    pub fn get(&self, kind: RouteKind) -> Option<&RouteLayer> {
        self.layers.get(&kind)
    }

    #[inline]
    pub fn is_registered(&self, kind: RouteKind) -> bool {
        self.layers.contains_key(&kind)
    }

    /// Attach a registered layer to the map, on top of the current stack.
    ///
    /// Re-attaching the primary route always pushes it back to the lowest
    /// stacking position. Unregistered kinds are ignored.
    pub fn attach(&mut self, kind: RouteKind) {
        if !self.layers.contains_key(&kind) {
            return;
        }
        if !self.attached.contains(&kind) {
            self.attached.push(kind);
        }
        if kind.is_primary() {
            self.send_to_back(kind);
        }
    }

    /// Detach a layer from the map; no-op if absent or not attached
    pub fn detach(&mut self, kind: RouteKind) {
        self.attached.retain(|attached| *attached != kind);
    }

    #[inline]
    pub fn is_attached(&self, kind: RouteKind) -> bool {
        self.attached.contains(&kind)
    }

    /// Move an attached layer to the lowest stacking position
    pub fn send_to_back(&mut self, kind: RouteKind) {
        if let Some(index) = self.attached.iter().position(|attached| *attached == kind) {
            self.attached.remove(index);
            self.attached.insert(0, kind);
        }
    }

    /// Attached layers in draw order (back to front)
    pub fn attached_layers(&self) -> impl Iterator<Item = &RouteLayer> {
        self.attached.iter().filter_map(|kind| self.layers.get(kind))
    }

    /// Stacking order of attached layers, back to front
    pub fn stacking_order(&self) -> &[RouteKind] {
        &self.attached
    }

    /// Number of registered layers (attached or not)
    #[inline]
    pub fn registered_count(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Union of all registered layers' bounding boxes, in WGS84
    pub fn combined_bounds(&self) -> Option<Rect<f64>> {
        let mut result: Option<Rect<f64>> = None;
        for layer in self.layers.values() {
            let Some(bbox) = layer.bounding_box() else {
                continue;
            };
            result = Some(match result {
                None => bbox,
                Some(rect) => Rect::new(
                    Coord {
                        x: rect.min().x.min(bbox.min().x),
                        y: rect.min().y.min(bbox.min().y),
                    },
                    Coord {
                        x: rect.max().x.max(bbox.max().x),
                        y: rect.max().y.max(bbox.max().y),
                    },
                ),
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Feature, Geometry};

    fn line_collection(coords: &[[f64; 2]]) -> FeatureCollection {
        let line = Value::LineString(coords.iter().map(|c| c.to_vec()).collect());
        FeatureCollection {
            bbox: None,
            features: vec![Feature::from(Geometry::new(line))],
            foreign_members: None,
        }
    }

    fn layer(kind: RouteKind, coords: &[[f64; 2]]) -> RouteLayer {
        RouteLayer::from_features(kind, &line_collection(coords))
    }

    #[test]
    fn layer_extracts_paths_and_bounds() {
        let layer = layer(RouteKind::Mrt, &[[106.80, -6.30], [106.85, -6.15]]);
        assert_eq!(layer.paths().len(), 1);
        assert_eq!(layer.feature_count(), 1);

        let bbox = layer.bounding_box().unwrap();
        assert_eq!(bbox.min(), Coord { x: 106.80, y: -6.30 });
        assert_eq!(bbox.max(), Coord { x: 106.85, y: -6.15 });
    }

    #[test]
    fn layer_uses_polygon_outer_ring_only() {
        let polygon = Value::Polygon(vec![
            vec![
                vec![106.80, -6.20],
                vec![106.82, -6.20],
                vec![106.82, -6.18],
                vec![106.80, -6.20],
            ],
            vec![vec![106.81, -6.19], vec![106.815, -6.19], vec![106.81, -6.19]],
        ]);
        let collection = FeatureCollection {
            bbox: None,
            features: vec![Feature::from(Geometry::new(polygon))],
            foreign_members: None,
        };
        let layer = RouteLayer::from_features(RouteKind::Lrt, &collection);
        assert_eq!(layer.paths().len(), 1);
        assert_eq!(layer.paths()[0].len(), 4);
    }

    #[test]
    fn empty_collection_yields_layer_without_geometry() {
        let collection = FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        };
        let layer = RouteLayer::from_features(RouteKind::Krl, &collection);
        assert!(layer.paths().is_empty());
        assert!(layer.bounding_box().is_none());
    }

    #[test]
    fn toggling_an_unregistered_kind_is_a_no_op() {
        let mut registry = LayerRegistry::new();
        registry.attach(RouteKind::Krl);
        registry.detach(RouteKind::Krl);
        registry.send_to_back(RouteKind::Krl);
        assert!(!registry.is_attached(RouteKind::Krl));
        assert!(registry.is_empty());
    }

    #[test]
    fn insert_attaches_on_top() {
        let mut registry = LayerRegistry::new();
        registry.insert(layer(RouteKind::Mrt, &[[106.8, -6.2]]));
        registry.insert(layer(RouteKind::Lrt, &[[106.8, -6.2]]));
        assert_eq!(
            registry.stacking_order(),
            &[RouteKind::Mrt, RouteKind::Lrt]
        );
    }

    #[test]
    fn primary_route_always_sinks_to_the_back() {
        let mut registry = LayerRegistry::new();
        registry.insert(layer(RouteKind::Mrt, &[[106.8, -6.2]]));
        registry.insert(layer(RouteKind::Transjakarta, &[[106.8, -6.2]]));
        // Even though Transjakarta was inserted last, it stacks below MRT.
        assert_eq!(
            registry.stacking_order(),
            &[RouteKind::Transjakarta, RouteKind::Mrt]
        );

        // Detach and re-attach: it sinks again rather than landing on top.
        registry.detach(RouteKind::Transjakarta);
        assert_eq!(registry.stacking_order(), &[RouteKind::Mrt]);
        registry.attach(RouteKind::Transjakarta);
        assert_eq!(
            registry.stacking_order(),
            &[RouteKind::Transjakarta, RouteKind::Mrt]
        );
    }

    #[test]
    fn detach_keeps_the_layer_registered() {
        let mut registry = LayerRegistry::new();
        registry.insert(layer(RouteKind::Mrt, &[[106.8, -6.2]]));
        registry.detach(RouteKind::Mrt);
        assert!(!registry.is_attached(RouteKind::Mrt));
        assert!(registry.is_registered(RouteKind::Mrt));
        registry.attach(RouteKind::Mrt);
        assert!(registry.is_attached(RouteKind::Mrt));
    }

    #[test]
    fn combined_bounds_spans_all_registered_layers() {
        let mut registry = LayerRegistry::new();
        assert!(registry.combined_bounds().is_none());

        registry.insert(layer(RouteKind::Mrt, &[[106.80, -6.20], [106.82, -6.18]]));
        registry.insert(layer(RouteKind::Lrt, &[[106.90, -6.30], [106.95, -6.25]]));
        // Detached layers still count; the fitter looks at registered data.
        registry.detach(RouteKind::Lrt);

        let bbox = registry.combined_bounds().unwrap();
        assert_eq!(bbox.min(), Coord { x: 106.80, y: -6.30 });
        assert_eq!(bbox.max(), Coord { x: 106.95, y: -6.18 });
    }
}
