use eframe::egui::{
    self,
    containers,
};

use super::app::KarteiApp;
use crate::core::AutofillLanguage;

pub fn top_bar(ctx: &egui::Context, app: &mut KarteiApp) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        containers::menu::Bar::new().ui(ui, |ui| {
            egui::widgets::global_theme_preference_switch(ui);

            ui.menu_button("File", |ui| {
                if ui.button("Import CSV…").clicked() {
                    app.import_csv_interactive();
                }
                if ui.button("Export CSV…").clicked() {
                    app.export_csv_interactive();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Options…").clicked() {
                    app.modals.options.open_options(app.settings.clone());
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                show_status_indicators(ui, app);
            });
        });
    });
}

fn show_status_indicators(ui: &mut egui::Ui, app: &KarteiApp) {
    ui.small(format!("{} of {} selected", app.selected_count, app.total_count));

    ui.add_space(3.0);

    let autofill_on = app.translator.is_available()
        && app.settings.autofill_language != AutofillLanguage::Disabled;

    let autofill_color = if autofill_on {
        egui::Color32::from_rgb(0, 200, 0)
    } else {
        egui::Color32::from_rgb(200, 80, 80)
    };

    let autofill_tooltip = if autofill_on {
        "Auto-fill suggests back text while you type"
    } else {
        "Auto-fill is off; pick a language in the Options dialog"
    };

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        ui.small("Auto-fill").on_hover_text(autofill_tooltip);
        ui.small(egui::RichText::new("●").color(autofill_color)).on_hover_text(autofill_tooltip);
    });
}
