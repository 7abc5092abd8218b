use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::Listing;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const IMAGE_HEIGHT: f32 = 140.0;

// ---------------------------------------------------------------------------
// Central panel – filtered listings
// ---------------------------------------------------------------------------

/// Render diagnostics, the inspection sections and one card per matching listing.
pub fn listing_view(ui: &mut Ui, state: &AppState) {
    ui.heading("Real Estate Dashboard");
    if !(state.load_diagnostics.is_empty() && state.filter_diagnostics.is_empty()) {
        panels::diagnostics(ui, &state.load_diagnostics);
        panels::diagnostics(ui, &state.filter_diagnostics);
    }
    ui.separator();

    ScrollArea::vertical()
        .id_salt("listing_cards")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.filter_ran() {
                egui::CollapsingHeader::new("Show More")
                    .id_salt("filtered_data")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.strong("Filtered Data:");
                        table::filtered_table(ui, &state.table, &state.result.indices);
                    });

                egui::CollapsingHeader::new("Price vs. square footage")
                    .id_salt("price_plot")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        plot::price_footage_plot(ui, state);
                    });
                ui.add_space(6.0);
            }

            if state.result.is_empty() {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    "No properties match the selected filters.",
                );
                return;
            }

            for listing in state
                .result
                .indices
                .iter()
                .filter_map(|&idx| state.table.listing(idx))
            {
                listing_card(ui, state, listing);
                ui.add_space(8.0);
            }
        });
}

/// Header, link, up to four images and a collapsed description.
fn listing_card(ui: &mut Ui, state: &AppState, listing: Listing<'_>) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());

        let header = RichText::new(listing.address()).heading().strong();
        let header = match listing.city() {
            Some(city) => header.color(state.palette.color_for(&city)),
            None => header,
        };
        ui.label(header);

        if let Some(link) = listing.link() {
            ui.hyperlink_to("View Listing", link);
        }

        let images = listing.images();
        if images.iter().any(Option::is_some) {
            ui.columns(4, |cols: &mut [Ui]| {
                for (col, image) in cols.iter_mut().zip(&images) {
                    // absent images leave their column empty
                    if let Some(url) = image {
                        col.add(
                            egui::Image::new(url.as_str())
                                .max_width(col.available_width())
                                .max_height(IMAGE_HEIGHT)
                                .corner_radius(4.0),
                        );
                    }
                }
            });
        }

        egui::CollapsingHeader::new("Show More")
            .id_salt(("description", listing.row()))
            .default_open(false)
            .show(ui, |ui: &mut Ui| match listing.description() {
                Some(text) => {
                    ui.label(text);
                }
                None => {
                    ui.weak("No description.");
                }
            });
    });
}
