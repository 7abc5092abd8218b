use eframe::egui;

use crate::state::AppState;
use crate::ui::{cards, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EstateViewApp {
    pub state: AppState,
    close_sent: bool,
}

impl EstateViewApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            close_sent: false,
        }
    }
}

impl eframe::App for EstateViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Any control change this frame reruns the whole filter pass.
        self.state.sync_selection();

        // ---- Central panel: listing cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            cards::listing_view(ui, &self.state);
        });

        if self.state.shutdown_requested && !self.close_sent {
            log::warn!("Stop requested, closing the window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            self.close_sent = true;
        }
    }
}
