use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::diagnostics::{Diagnostics, Severity};
use crate::state::AppState;

const PRICE_STEP: f64 = 50_000.0;
const FOOTAGE_STEP: f64 = 100.0;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Widgets write straight into `state.selection`.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            city_filter(ui, state);
            ui.separator();

            ui.strong("Price");
            stepped_input(ui, "Min Price ($)", &mut state.selection.min_price, PRICE_STEP);
            stepped_input(ui, "Max Price ($)", &mut state.selection.max_price, PRICE_STEP);
            ui.add_space(4.0);

            ui.strong("Square footage");
            stepped_input(
                ui,
                "Min Square Footage",
                &mut state.selection.min_footage,
                FOOTAGE_STEP,
            );
            stepped_input(
                ui,
                "Max Square Footage",
                &mut state.selection.max_footage,
                FOOTAGE_STEP,
            );
            ui.separator();

            ui.label(RichText::new(format!("Listings Found: {}", state.result.len())).heading());
            ui.add_space(8.0);

            if ui
                .button(RichText::new("Stop Dashboard").color(ui.visuals().warn_fg_color))
                .clicked()
            {
                state.request_shutdown();
            }
        });
}

/// Multi-select over the distinct cities, every city checked by default.
fn city_filter(ui: &mut Ui, state: &mut AppState) {
    let cities = state.all_cities();
    let header = format!(
        "Select Cities  ({}/{})",
        state.selection.cities.len(),
        cities.len()
    );

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("city_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if cities.is_empty() {
                ui.label("No cities in the loaded data.");
                return;
            }

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_cities();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_cities();
                }
            });

            for city in &cities {
                let mut checked = state.selection.cities.contains(city);
                let text = RichText::new(city).color(state.palette.color_for(city));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_city(city);
                }
            }
        });
}

/// Non-negative numeric input with -/+ buttons moving by `step`.
fn stepped_input(ui: &mut Ui, label: &str, value: &mut f64, step: f64) {
    ui.label(label);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("-").clicked() {
            *value = (*value - step).max(0.0);
        }
        ui.add(
            egui::DragValue::new(value)
                .speed(step / 10.0)
                .range(0.0..=f64::MAX)
                .max_decimals(0),
        );
        if ui.small_button("+").clicked() {
            *value += step;
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            ui.separator();
            let can_export = !state.result.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} listings loaded, {} visible",
            state.source.display(),
            state.table.len(),
            state.result.len()
        ));

        let latest_error = state
            .load_diagnostics
            .last_error()
            .or_else(|| state.filter_diagnostics.last_error());
        if let Some(err) = latest_error {
            ui.separator();
            ui.label(RichText::new(&err.message).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Inline diagnostics
// ---------------------------------------------------------------------------

/// Show every diagnostic in place, coloured by severity.
pub fn diagnostics(ui: &mut Ui, diagnostics: &Diagnostics) {
    for diag in diagnostics.entries() {
        let color = match diag.severity {
            Severity::Info => ui.visuals().text_color(),
            Severity::Warning => ui.visuals().warn_fg_color,
            Severity::Error => ui.visuals().error_fg_color,
        };
        ui.label(RichText::new(&diag.message).color(color));
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered listings")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered_listings.csv")
        .save_file();

    if let Some(path) = file {
        state.export_filtered(&path);
    }
}
