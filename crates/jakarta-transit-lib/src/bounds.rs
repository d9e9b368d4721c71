//! Bounding region and GeoJSON bounds filtering
//!
//! The remote KRL service returns data for all of Indonesia, so its feature
//! collection is cut down to the DKI Jakarta window before a layer is built.
//! A feature is admitted when at least one of its tested coordinates falls
//! inside the region; lines count on partial overlap, polygons are judged by
//! their outer ring only.

use geojson::{Feature, FeatureCollection, Value};

/// Rectangular latitude/longitude window used to admit or reject features
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

/// Bounding box of DKI Jakarta
pub const JAKARTA: Region = Region {
    south: -6.3751,
    north: -6.0844,
    west: 106.6294,
    east: 106.9758,
};

impl Region {
    /// Whether a coordinate lies inside the region. All four edges are inclusive.
    #[inline]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }

    /// GeoJSON positions are `[lon, lat, ...]`; short positions are treated as outside.
    #[inline]
    fn contains_position(&self, position: &[f64]) -> bool {
        matches!(position, [lon, lat, ..] if self.contains(*lon, *lat))
    }

    #[inline]
    fn any_inside(&self, line: &[Vec<f64>]) -> bool {
        line.iter()
            .any(|position| self.contains_position(position))
    }

    /// Inclusion test for a whole feature.
    ///
    /// Polygon holes are intentionally not checked: a feature whose outer
    /// ring stays outside the region is rejected even if an inner ring dips
    /// inside.
    pub fn admits(&self, feature: &Feature) -> bool {
        let Some(geometry) = &feature.geometry else {
            return false;
        };

        match &geometry.value {
            Value::Point(position) => self.contains_position(position),
            Value::LineString(line) => self.any_inside(line),
            Value::MultiLineString(lines) => lines.iter().any(|line| self.any_inside(line)),
            Value::Polygon(rings) => rings.first().is_some_and(|outer| self.any_inside(outer)),
            Value::MultiPolygon(polygons) => polygons
                .first()
                .and_then(|rings| rings.first())
                .is_some_and(|outer| self.any_inside(outer)),
            _ => false,
        }
    }
}

/// Filter a feature collection down to the features touching the region.
///
/// The input is not mutated; retained features keep their order and
/// properties. An empty input yields an empty output, never an error.
pub fn filter_features(collection: &FeatureCollection, region: &Region) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: collection
            .features
            .iter()
            .filter(|feature| region.admits(feature))
            .cloned()
            .collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Geometry;

    fn feature(value: Value) -> Feature {
        Feature::from(Geometry::new(value))
    }

    // A coordinate well inside Jakarta (Monas)
    const INSIDE: [f64; 2] = [106.8272, -6.1754];
    // A coordinate well outside (Bandung)
    const OUTSIDE: [f64; 2] = [107.6098, -6.9147];

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let r = JAKARTA;
        assert!(r.contains(r.west, r.south));
        assert!(r.contains(r.east, r.south));
        assert!(r.contains(r.west, r.north));
        assert!(r.contains(r.east, r.north));
        assert!(r.contains(106.8456, -6.2088));
    }

    #[test]
    fn contains_rejects_coordinates_past_any_single_edge() {
        let r = JAKARTA;
        assert!(!r.contains(106.8, r.south - 1e-6));
        assert!(!r.contains(106.8, r.north + 1e-6));
        assert!(!r.contains(r.west - 1e-6, -6.2));
        assert!(!r.contains(r.east + 1e-6, -6.2));
    }

    #[test]
    fn filter_of_empty_collection_is_empty() {
        let empty = FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        };
        assert!(filter_features(&empty, &JAKARTA).features.is_empty());
    }

    #[test]
    fn feature_without_geometry_is_dropped() {
        let collection = FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: None,
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        };
        assert!(filter_features(&collection, &JAKARTA).features.is_empty());
    }

    #[test]
    fn point_inside_is_kept_point_outside_is_dropped() {
        assert!(JAKARTA.admits(&feature(Value::Point(INSIDE.to_vec()))));
        assert!(!JAKARTA.admits(&feature(Value::Point(OUTSIDE.to_vec()))));
    }

    #[test]
    fn line_with_a_single_inside_coordinate_is_kept() {
        let line = Value::LineString(vec![
            OUTSIDE.to_vec(),
            vec![108.0, -7.0],
            INSIDE.to_vec(),
            vec![109.0, -7.5],
        ]);
        assert!(JAKARTA.admits(&feature(line)));
    }

    #[test]
    fn line_entirely_outside_is_dropped() {
        let line = Value::LineString(vec![OUTSIDE.to_vec(), vec![108.0, -7.0]]);
        assert!(!JAKARTA.admits(&feature(line)));
    }

    #[test]
    fn multi_line_is_kept_when_any_constituent_line_enters() {
        let lines = Value::MultiLineString(vec![
            vec![OUTSIDE.to_vec(), vec![108.0, -7.0]],
            vec![vec![110.0, -7.0], INSIDE.to_vec()],
        ]);
        assert!(JAKARTA.admits(&feature(lines)));
    }

    #[test]
    fn polygon_is_judged_by_outer_ring_only() {
        // Outer ring fully outside, inner ring (hole) inside: dropped.
        let polygon = Value::Polygon(vec![
            vec![
                OUTSIDE.to_vec(),
                vec![108.0, -7.0],
                vec![108.0, -6.8],
                OUTSIDE.to_vec(),
            ],
            vec![INSIDE.to_vec(), INSIDE.to_vec(), INSIDE.to_vec()],
        ]);
        assert!(!JAKARTA.admits(&feature(polygon)));

        // Outer ring entering the region: kept.
        let polygon = Value::Polygon(vec![vec![
            OUTSIDE.to_vec(),
            INSIDE.to_vec(),
            vec![108.0, -6.8],
        ]]);
        assert!(JAKARTA.admits(&feature(polygon)));
    }

    #[test]
    fn unsupported_geometry_is_dropped() {
        let collection = Value::GeometryCollection(vec![Geometry::new(Value::Point(
            INSIDE.to_vec(),
        ))]);
        assert!(!JAKARTA.admits(&feature(collection)));
    }

    #[test]
    fn filter_preserves_order_and_properties() {
        let mut properties = serde_json::Map::new();
        properties.insert("name".to_string(), serde_json::json!("Lin Bogor"));

        let named = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(INSIDE.to_vec()))),
            id: None,
            properties: Some(properties.clone()),
            foreign_members: None,
        };
        let dropped = feature(Value::Point(OUTSIDE.to_vec()));
        let kept_last = feature(Value::Point(vec![106.7, -6.2]));

        let collection = FeatureCollection {
            bbox: None,
            features: vec![named, dropped, kept_last],
            foreign_members: None,
        };

        let filtered = filter_features(&collection, &JAKARTA);
        assert_eq!(filtered.features.len(), 2);
        assert_eq!(filtered.features[0].properties, Some(properties));
        assert_eq!(
            filtered.features[1].geometry.as_ref().map(|g| &g.value),
            Some(&Value::Point(vec![106.7, -6.2]))
        );
    }
}
