//! UI panels for the application
//!
//! Sidebar with the per-route visibility toggles plus small overlays on
//! top of the map (sidebar toggle button, attribution, loading badge).

use crate::app::loader::SharedRegistry;
use egui::{Color32, RichText, Ui};
use jakarta_transit_lib::RouteKind;

/// Render the sidebar toggle button (overlaid on top-right of map)
pub fn sidebar_toggle_button(ui: &mut Ui, sidebar_open: &mut bool) {
    let button_size = egui::vec2(40.0, 40.0);
    let margin = 10.0;

    let rect = ui.max_rect();
    let button_pos = rect.right_top() + egui::vec2(-button_size.x - margin, margin);
    let button_rect = egui::Rect::from_min_size(button_pos, button_size);

    let response = ui.allocate_rect(button_rect, egui::Sense::click());

    if response.clicked() {
        *sidebar_open = !*sidebar_open;
    }

    let bg_color = if response.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.inactive.bg_fill
    };

    ui.painter().rect_filled(button_rect, 5.0, bg_color);

    let icon = if *sidebar_open { "✕" } else { "☰" };

    ui.painter().text(
        button_rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(20.0),
        ui.visuals().text_color(),
    );
}

/// Render the routes sidebar
pub fn render_sidebar(
    ctx: &egui::Context,
    registry: &SharedRegistry,
    loading: bool,
    pending_fit: &mut bool,
) {
    egui::SidePanel::right("routes_sidebar")
        .default_width(260.0)
        .min_width(220.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.label(RichText::new("🚌 Routes").strong());
            ui.add_space(6.0);

            render_route_toggles(ui, registry, loading);

            ui.add_space(8.0);
            ui.separator();

            if loading {
                ui.label(
                    RichText::new("⏳ Loading route data…")
                        .strong()
                        .color(ui.visuals().warn_fg_color),
                );
            } else if ui.button("🎯 Fit view to routes").clicked() {
                *pending_fit = true;
            }

            ui.add_space(8.0);
            ui.separator();

            render_about_section(ui, registry, loading);
        });
}

/// One checkbox per route kind. Toggling a route whose layer never
/// loaded is a silent no-op: the registry ignores attach/detach for
/// unregistered kinds, so the checkbox simply snaps back.
fn render_route_toggles(ui: &mut Ui, registry: &SharedRegistry, loading: bool) {
    // Use try_write for non-blocking UI polling.
    let Ok(mut registry) = registry.try_write() else {
        return;
    };

    for kind in RouteKind::all() {
        let mut visible = registry.is_attached(*kind);
        let (r, g, b) = kind.style().color;

        ui.horizontal(|ui| {
            ui.label(RichText::new("⬤").color(Color32::from_rgb(r, g, b)));
            if ui.checkbox(&mut visible, kind.display_name()).changed() {
                if visible {
                    registry.attach(*kind);
                } else {
                    registry.detach(*kind);
                }
            }
            if !loading && !registry.is_registered(*kind) {
                ui.label(RichText::new("unavailable").small().weak());
            }
        });
    }
}

fn render_about_section(ui: &mut Ui, registry: &SharedRegistry, loading: bool) {
    ui.label(RichText::new("ℹ About").strong());
    ui.add_space(4.0);
    ui.label(RichText::new("Jakarta Transit Map").small());
    ui.label(
        RichText::new("Transjakarta, MRT, LRT and KRL lines on OpenStreetMap")
            .small()
            .weak(),
    );

    if !loading {
        if let Ok(registry) = registry.try_read() {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "{} of {} route layers loaded",
                    registry.registered_count(),
                    RouteKind::all().len()
                ))
                .small()
                .weak(),
            );
        }
    }
}

/// Attribution caption at the bottom of the map
pub fn attribution_caption(ui: &mut Ui, text: &str) {
    let painter = ui.painter();
    let screen_rect = ui.max_rect();
    painter.text(
        screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
        egui::Align2::CENTER_BOTTOM,
        text,
        egui::FontId::proportional(10.0),
        egui::Color32::from_black_alpha(180),
    );
}
