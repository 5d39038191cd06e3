use eframe::egui;

/// One-button informational dialog for results worth acknowledging
/// (import/export summaries, print confirmations).
pub struct NoticeModal {
    open: bool,
    title: String,
    message: String,
}

impl NoticeModal {
    pub fn new() -> Self {
        Self { open: false, title: String::new(), message: String::new() }
    }

    pub fn show_notice(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
            ui.set_width(380.0);

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("ℹ").size(24.0).color(egui::Color32::LIGHT_BLUE));
                ui.label(egui::RichText::new(&self.title).size(15.0).strong());
            });

            ui.add_space(8.0);

            ui.label(&self.message);

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
        }
    }
}

impl Default for NoticeModal {
    fn default() -> Self {
        Self::new()
    }
}
