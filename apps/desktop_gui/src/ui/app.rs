use atlas_core::{
    AtlasSettings, ControlGroup, ProjectCard, RenderOrchestrator, RenderSummary,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{Category, Dataset, Status};

use crate::controller::{
    events::{visible_summary, StatusLine, StatusSeverity, UiEvent},
    filters::{FilterControls, PersistedFilters},
    orchestration::dispatch_ui_event,
};
use crate::ui::map_surface::MapSurface;

pub const FILTERS_STORAGE_KEY: &str = "civic_atlas.filters";

pub struct AtlasApp {
    orchestrator: RenderOrchestrator<MapSurface>,
    map: MapSurface,
    controls: FilterControls,
    cards: Vec<ProjectCard>,
    cities: Vec<String>,
    ui_tx: Sender<UiEvent>,
    ui_rx: Receiver<UiEvent>,
    status: Option<StatusLine>,
    last_summary: Option<RenderSummary>,
}

impl AtlasApp {
    pub fn new(
        dataset: Dataset,
        settings: &AtlasSettings,
        controls: FilterControls,
        ui_tx: Sender<UiEvent>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let cities = dataset.cities().into_iter().map(str::to_string).collect();
        let map = MapSurface::new(
            settings.initial_center,
            settings.initial_zoom,
            settings.max_zoom,
        );
        let mut app = Self {
            orchestrator: RenderOrchestrator::new(dataset, settings.viewport_controller()),
            map,
            controls,
            cards: Vec::new(),
            cities,
            ui_tx,
            ui_rx,
            status: None,
            last_summary: None,
        };

        match app
            .orchestrator
            .start(&app.controls, &mut app.map, &mut app.cards)
        {
            Ok(summary) => app.last_summary = Some(summary),
            Err(err) => app.status = Some(StatusLine::from_render_error(&err)),
        }
        app
    }

    /// Shows `notice` unless the first render already reported a problem.
    pub fn with_notice(mut self, notice: Option<StatusLine>) -> Self {
        if self.status.is_none() {
            self.status = notice;
        }
        self
    }

    /// Restores the saved filter selection, falling back to "everything".
    pub fn restore_controls(storage: Option<&dyn eframe::Storage>, dataset: &Dataset) -> FilterControls {
        storage
            .and_then(|storage| storage.get_string(FILTERS_STORAGE_KEY))
            .and_then(|text| serde_json::from_str::<PersistedFilters>(&text).ok())
            .map(|saved| saved.restore(&dataset.cities()))
            .unwrap_or_default()
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let input = match event {
                UiEvent::Input(input) => input,
                UiEvent::ResetFilters => {
                    self.controls = FilterControls::default();
                    atlas_core::InputEvent::FilterChanged(ControlGroup::City)
                }
            };

            match self.orchestrator.handle_event(
                &input,
                &self.controls,
                &mut self.map,
                &mut self.cards,
            ) {
                Ok(Some(summary)) => {
                    self.status = None;
                    self.last_summary = Some(summary);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::error!("render pass rejected: {err}");
                    self.status = Some(StatusLine::from_render_error(&err));
                }
            }
        }
    }

    fn show_filter_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");

        let mut city_changed = false;
        egui::ComboBox::from_label("City")
            .selected_text(if self.controls.city.is_empty() {
                "All cities"
            } else {
                self.controls.city.as_str()
            })
            .show_ui(ui, |ui| {
                city_changed |= ui
                    .selectable_value(&mut self.controls.city, String::new(), "All cities")
                    .changed();
                for city in &self.cities {
                    city_changed |= ui
                        .selectable_value(&mut self.controls.city, city.clone(), city)
                        .changed();
                }
            });
        if city_changed {
            self.dispatch(UiEvent::filter_changed(ControlGroup::City));
        }

        ui.add_space(4.0);
        ui.label("Status");
        if checkbox_group(ui, &mut self.controls.statuses, |s: &Status| s.to_string()) {
            self.dispatch(UiEvent::filter_changed(ControlGroup::Status));
        }

        ui.add_space(4.0);
        ui.label("Category");
        if checkbox_group(ui, &mut self.controls.categories, |c: &Category| {
            c.to_string()
        }) {
            self.dispatch(UiEvent::filter_changed(ControlGroup::Category));
        }

        ui.add_space(4.0);
        if ui.button("Reset filters").clicked() {
            self.dispatch(UiEvent::ResetFilters);
        }

        ui.add_space(6.0);
        let total = self.orchestrator.dataset().len();
        let visible = self.last_summary.as_ref().map_or(0, |summary| summary.visible);
        ui.small(visible_summary(visible, total));
        if let Some(status) = &self.status {
            let color = match status.severity {
                StatusSeverity::Info => ui.visuals().text_color(),
                StatusSeverity::Warning => ui.visuals().warn_fg_color,
                StatusSeverity::Error => ui.visuals().error_fg_color,
            };
            ui.colored_label(color, &status.message);
        }
    }

    fn show_project_list(&mut self, ui: &mut egui::Ui) {
        let mut zoom_target = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for card in &self.cards {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.strong(&card.name);
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(egui::RichText::new(&card.category).small().monospace());
                            });
                        });
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&card.status).small().monospace());
                            ui.label(&card.city);
                        });
                        ui.small(&card.dates);
                        ui.small(format!("Budget: {}", card.budget));
                        ui.horizontal_wrapped(|ui| {
                            for link in &card.links {
                                ui.hyperlink_to("source", link);
                            }
                        });
                        if ui.button("Zoom to").clicked() {
                            zoom_target = Some(card.id.clone());
                        }
                    });
                    ui.add_space(4.0);
                }
            });
        if let Some(id) = zoom_target {
            self.dispatch(UiEvent::zoom_to(id));
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        dispatch_ui_event(&self.ui_tx, event, &mut self.status);
    }
}

/// One checkbox per entry; `true` if any box was toggled this frame.
fn checkbox_group<T>(
    ui: &mut egui::Ui,
    boxes: &mut [(T, bool)],
    label: impl Fn(&T) -> String,
) -> bool {
    let mut changed = false;
    ui.horizontal_wrapped(|ui| {
        for (value, on) in boxes.iter_mut() {
            changed |= ui.checkbox(on, label(value)).changed();
        }
    });
    changed
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::SidePanel::left("filters_and_projects")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                self.show_filter_controls(ui);
                ui.separator();
                self.show_project_list(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.map.show(ui));

        if !self.ui_rx.is_empty() {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(&PersistedFilters::capture(&self.controls)) {
            Ok(text) => storage.set_string(FILTERS_STORAGE_KEY, text),
            Err(err) => tracing::warn!("failed to persist filter selection: {err}"),
        }
    }
}
