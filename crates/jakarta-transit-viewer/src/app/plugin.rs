//! Walkers plugin that paints the transit route layers on the map
//!
//! Layers are painted in the registry's stacking order (back to front),
//! which keeps the dense Transjakarta bundle below the rail networks.

use egui::{Color32, Stroke};
use jakarta_transit_lib::{LayerRegistry, RouteLayer};
use std::sync::{Arc, RwLock};
use walkers::{Plugin, Projector};

pub struct RouteLayersPlugin {
    registry: Arc<RwLock<LayerRegistry>>,
}

impl RouteLayersPlugin {
    pub fn new(registry: Arc<RwLock<LayerRegistry>>) -> Self {
        Self { registry }
    }

    fn stroke_color(layer: &RouteLayer) -> Color32 {
        let style = layer.style();
        let (r, g, b) = style.color;
        Color32::from_rgba_unmultiplied(r, g, b, (style.opacity * 255.0) as u8)
    }

    fn paint_layer(layer: &RouteLayer, projector: &Projector, painter: &egui::Painter) {
        let style = layer.style();
        let color = Self::stroke_color(layer);
        let stroke = Stroke::new(style.weight, color);

        for path in layer.paths() {
            // Convert WGS84 coordinates to screen space
            let screen_points: Vec<egui::Pos2> = path
                .iter()
                .map(|coord| {
                    let position = walkers::lat_lon(coord.y, coord.x);
                    let screen_vec = projector.project(position);
                    egui::Pos2::new(screen_vec.x, screen_vec.y)
                })
                .collect();

            if screen_points.len() < 2 {
                continue;
            }

            match style.dash {
                Some((dash, gap)) => {
                    painter.extend(egui::Shape::dashed_line(&screen_points, stroke, dash, gap));
                }
                None => {
                    painter.add(egui::Shape::line(screen_points, stroke));
                }
            }
        }

        for point in layer.points() {
            let position = walkers::lat_lon(point.y, point.x);
            let screen_vec = projector.project(position);
            painter.circle_filled(
                egui::Pos2::new(screen_vec.x, screen_vec.y),
                style.weight,
                color,
            );
        }
    }
}

impl Plugin for RouteLayersPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("RouteLayersPlugin::run");

        let painter = ui.painter();

        // Use try_read for non-blocking UI polling.
        let registry = match self.registry.try_read() {
            Ok(guard) => guard,
            Err(_) => return,
        };

        for layer in registry.attached_layers() {
            Self::paint_layer(layer, projector, painter);
        }
    }
}
