use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::ListingTable;

/// Every column of the rows at `indices`, for inspecting what the filter kept.
pub fn filtered_table(ui: &mut Ui, table: &ListingTable, indices: &[usize]) {
    if table.columns.is_empty() {
        ui.label("No columns loaded.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(60.0).clip(true), table.columns.len())
        .header(20.0, |mut header| {
            for name in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let Some(cells) = indices.get(row.index()).and_then(|&i| table.rows.get(i)) else {
                    return;
                };
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}
