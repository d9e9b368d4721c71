//! Application module
//!
//! Wires everything together:
//! - Full-screen walkers map with the route-layers plugin
//! - Sidebar with per-route visibility toggles
//! - Startup orchestration: concurrent loads, stacking rule, view fit
//! - Lightweight settings persistence (hidden routes, sidebar state)

mod loader;
mod plugin;
mod settings;
mod ui_panels;

pub use settings::Settings;

use crate::app::loader::SharedRegistry;
use crate::app::plugin::RouteLayersPlugin;
use eframe::egui;
use jakarta_transit_lib::{FitConfig, LayerRegistry, RouteKind, Viewport, fit_viewport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use walkers::{HttpTiles, Map, MapMemory, sources::OpenStreetMap};

const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const PERSIST_KEY: &str = "persisted_settings";

/// Persisted settings (lightweight, no route data)
#[derive(serde::Serialize, serde::Deserialize)]
struct PersistedSettings {
    sidebar_open: bool,
    /// Route ids the user had toggled off
    hidden_routes: Vec<String>,
}

/// Main application structure
pub struct TransitMapApp {
    /// Layer registry shared with the loaders and the render plugin
    registry: SharedRegistry,

    /// Map tiles provider (OpenStreetMap)
    tiles: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// View-fitter thresholds from the CLI
    fit_config: FitConfig,

    /// Viewport computed by the orchestrator, applied on the next frame
    pending_viewport: Arc<RwLock<Option<Viewport>>>,

    /// Whether all loaders have settled
    loaders_done: Arc<AtomicBool>,

    /// Routes hidden in the previous session, re-applied once loads settle
    hidden_on_start: Vec<RouteKind>,
    restored_hidden: bool,

    /// Manual "fit view" request from the sidebar
    pending_fit: bool,

    sidebar_open: bool,
}

impl TransitMapApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let fit_config = settings.fit_config();

        let registry: SharedRegistry = Arc::new(RwLock::new(LayerRegistry::new()));
        let tiles = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());

        // Start from the fixed Jakarta view; the fitter refines it once
        // the loaders have settled.
        let mut map_memory = MapMemory::default();
        map_memory.center_at(walkers::lat_lon(
            fit_config.default_center.0,
            fit_config.default_center.1,
        ));
        let _ = map_memory.set_zoom(fit_config.default_zoom);

        let persisted = if settings.ignore_persisted {
            tracing::info!("ignoring persisted state (--ignore-persisted flag)");
            None
        } else {
            cc.storage.and_then(load_persisted)
        };
        let (sidebar_open, hidden_on_start) = match persisted {
            Some(state) => (
                state.sidebar_open,
                state
                    .hidden_routes
                    .iter()
                    .filter_map(|id| RouteKind::from_id(id))
                    .collect(),
            ),
            None => (true, Vec::new()),
        };

        let pending_viewport: Arc<RwLock<Option<Viewport>>> = Arc::new(RwLock::new(None));
        let loaders_done = Arc::new(AtomicBool::new(false));

        // Orchestrator: loads (internally concurrent) -> stacking -> fit.
        {
            let registry = registry.clone();
            let pending_viewport = pending_viewport.clone();
            let loaders_done = loaders_done.clone();
            let ctx = cc.egui_ctx.clone();
            tokio::spawn(async move {
                loader::load_all(&settings, &registry).await;

                let viewport = fit_viewport(&registry.read().unwrap(), &fit_config);
                *pending_viewport.write().unwrap() = Some(viewport);
                loaders_done.store(true, Ordering::SeqCst);

                tracing::info!(
                    zoom = viewport.zoom,
                    lat = viewport.center.0,
                    lon = viewport.center.1,
                    "initialization complete"
                );
                ctx.request_repaint();
            });
        }

        Self {
            registry,
            tiles,
            map_memory,
            fit_config,
            pending_viewport,
            loaders_done,
            hidden_on_start,
            restored_hidden: false,
            pending_fit: false,
            sidebar_open,
        }
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.map_memory
            .center_at(walkers::lat_lon(viewport.center.0, viewport.center.1));
        let _ = self.map_memory.set_zoom(viewport.zoom);
        tracing::debug!(
            lat = viewport.center.0,
            lon = viewport.center.1,
            zoom = viewport.zoom,
            "viewport applied"
        );
    }
}

impl eframe::App for TransitMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let loading = !self.loaders_done.load(Ordering::SeqCst);

        // Apply the viewport the orchestrator computed after the loads settled.
        // Use try_write for non-blocking UI polling.
        let fitted = self
            .pending_viewport
            .try_write()
            .ok()
            .and_then(|mut pending| pending.take());
        if let Some(viewport) = fitted {
            self.apply_viewport(viewport);
        }

        // Re-apply the visibility toggles from the previous session once
        // the layers actually exist.
        if !loading && !self.restored_hidden {
            self.restored_hidden = true;
            let mut registry = self.registry.write().unwrap();
            for kind in &self.hidden_on_start {
                registry.detach(*kind);
            }
        }

        // Manual fit request from the sidebar
        if self.pending_fit {
            self.pending_fit = false;
            let viewport = fit_viewport(&self.registry.read().unwrap(), &self.fit_config);
            self.apply_viewport(viewport);
        }

        if self.sidebar_open {
            ui_panels::render_sidebar(ctx, &self.registry, loading, &mut self.pending_fit);
        }

        // Central panel: Map view (full screen)
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("map_panel");

                let route_plugin = RouteLayersPlugin::new(self.registry.clone());

                let map = Map::new(
                    Some(&mut self.tiles),
                    &mut self.map_memory,
                    walkers::lat_lon(
                        self.fit_config.default_center.0,
                        self.fit_config.default_center.1,
                    ),
                )
                .with_plugin(route_plugin);

                ui.add(map);

                ui_panels::sidebar_toggle_button(ui, &mut self.sidebar_open);
                ui_panels::attribution_caption(ui, OSM_ATTRIBUTION);
            });

        if loading {
            // Keep polling until the orchestrator publishes the fitted view.
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Save settings only (no route data - fast)
        let hidden_routes = match self.registry.try_read() {
            Ok(registry) => RouteKind::all()
                .iter()
                .filter(|kind| registry.is_registered(**kind) && !registry.is_attached(**kind))
                .map(|kind| kind.id().to_string())
                .collect(),
            Err(_) => return,
        };

        let state = PersistedSettings {
            sidebar_open: self.sidebar_open,
            hidden_routes,
        };

        if let Ok(json) = serde_json::to_string(&state) {
            storage.set_string(PERSIST_KEY, json);
            tracing::debug!("saved settings on exit");
        }
    }
}

/// Load persisted settings from storage (fast, no route data)
fn load_persisted(storage: &dyn eframe::Storage) -> Option<PersistedSettings> {
    let json = storage.get_string(PERSIST_KEY)?;
    if json.is_empty() {
        return None;
    }
    match serde_json::from_str(&json) {
        Ok(state) => {
            tracing::info!("restored persisted settings");
            Some(state)
        }
        Err(error) => {
            tracing::warn!(%error, "discarding unreadable persisted settings");
            None
        }
    }
}
