use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::filter::numeric_value;
use crate::data::model::{CITY, PRICE, SQUARE_FOOTAGE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Price vs. footage scatter of the filtered listings
// ---------------------------------------------------------------------------

/// One `[footage, price]` point per visible listing, grouped by city.
pub fn city_series(state: &AppState) -> BTreeMap<String, Vec<[f64; 2]>> {
    let mut series: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in &state.result.indices {
        let table = &state.table;
        let city = table.cell(idx, CITY).and_then(|c| c.as_label());
        let price = table.cell(idx, PRICE).and_then(numeric_value);
        let footage = table.cell(idx, SQUARE_FOOTAGE).and_then(numeric_value);
        if let (Some(city), Some(price), Some(footage)) = (city, price, footage) {
            series.entry(city).or_default().push([footage, price]);
        }
    }
    series
}

/// Render the scatter plot, one colour per city.
pub fn price_footage_plot(ui: &mut Ui, state: &AppState) {
    Plot::new("price_footage_plot")
        .height(260.0)
        .legend(Legend::default())
        .x_axis_label("Square Footage")
        .y_axis_label("Price ($)")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (city, points) in city_series(state) {
                let color = state.palette.color_for(&city);
                let points: PlotPoints = points.into_iter().collect();
                plot_ui.points(Points::new(points).name(&city).color(color).radius(3.5));
            }
        });
}
