//! Static route configuration
//!
//! One descriptor per transit network: display color, human-readable name,
//! optional local source file, and stroke style. All of it is fixed at
//! compile time; runtime state lives in the [`crate::LayerRegistry`].

/// The four transit networks shown on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteKind {
    /// Transjakarta bus rapid transit (the primary, bottom-most layer)
    Transjakarta,
    /// MRT Jakarta metro
    Mrt,
    /// LRT Jakarta light rail
    Lrt,
    /// KRL Commuter Line heavy rail (fetched from the remote service)
    Krl,
}

/// Stroke style for one route's rendered layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteStyle {
    /// Display color as RGB
    pub color: (u8, u8, u8),
    /// Line weight in pixels
    pub weight: f32,
    /// Stroke opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Optional dash pattern as (dash length, gap length) in pixels
    pub dash: Option<(f32, f32)>,
}

impl RouteKind {
    /// All route kinds in canonical load/display order
    pub fn all() -> &'static [Self] {
        &[Self::Transjakarta, Self::Mrt, Self::Lrt, Self::Krl]
    }

    /// Short stable identifier, used for persisted settings
    pub fn id(&self) -> &'static str {
        match self {
            Self::Transjakarta => "tj",
            Self::Mrt => "mrt",
            Self::Lrt => "lrt",
            Self::Krl => "krl",
        }
    }

    /// Resolve a short identifier back to a route kind
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.id() == id)
    }

    /// Human-readable name shown in the routes list
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Transjakarta => "Transjakarta",
            Self::Mrt => "MRT Jakarta",
            Self::Lrt => "LRT Jakarta",
            Self::Krl => "KRL Commuter Line",
        }
    }

    /// Local GeoJSON asset file, or `None` for routes fetched remotely
    pub fn source_file(&self) -> Option<&'static str> {
        match self {
            Self::Transjakarta => Some("jalur_transjakarta.geojson"),
            Self::Mrt => Some("jalur_mrt.geojson"),
            Self::Lrt => Some("jalur_lrt_jakarta.geojson"),
            Self::Krl => None,
        }
    }

    /// Stroke style for this route
    pub fn style(&self) -> RouteStyle {
        match self {
            Self::Transjakarta => RouteStyle {
                color: (0x00, 0x66, 0xCC),
                weight: 4.0,
                opacity: 0.8,
                dash: None,
            },
            Self::Mrt => RouteStyle {
                color: (0xDC, 0x14, 0x3C),
                weight: 4.0,
                opacity: 0.8,
                dash: None,
            },
            Self::Lrt => RouteStyle {
                color: (0x22, 0x8B, 0x22),
                weight: 4.0,
                opacity: 0.8,
                dash: None,
            },
            Self::Krl => RouteStyle {
                color: (0x2E, 0x2E, 0x2E),
                weight: 4.0,
                opacity: 0.9,
                dash: Some((10.0, 5.0)),
            },
        }
    }

    /// The primary route is kept at the lowest stacking position so the
    /// other networks render above its dense line bundle.
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Transjakarta)
    }
}
