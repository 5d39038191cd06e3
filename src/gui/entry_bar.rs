use eframe::egui::{
    self,
    Key,
    TextEdit,
};

use super::app::KarteiApp;

/// Draft for the add-card form. The lesson is kept between adds so a
/// batch of cards for one lesson needs typing it once; front and back
/// clear and focus returns to the front field.
#[derive(Default)]
pub struct EntryState {
    pub lesson: String,
    pub front: String,
    pub back: String,
    pub focus_front: bool,
}

pub fn entry_bar(ctx: &egui::Context, app: &mut KarteiApp) {
    egui::TopBottomPanel::bottom("entry_bar").show(ctx, |ui| {
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label("Lesson:");
            ui.add_sized(
                [90.0, ui.spacing().interact_size.y],
                TextEdit::singleline(&mut app.entry.lesson).hint_text("1"),
            );

            ui.label("Front:");
            let front_response = ui.add_sized(
                [240.0, ui.spacing().interact_size.y],
                TextEdit::singleline(&mut app.entry.front).hint_text("Front text"),
            );

            if std::mem::take(&mut app.entry.focus_front) {
                front_response.request_focus();
            }

            if front_response.lost_focus() {
                app.autofill_back();
            }

            ui.label("Back:");
            let back_response = ui.add_sized(
                [240.0, ui.spacing().interact_size.y],
                TextEdit::singleline(&mut app.entry.back).hint_text("Back text"),
            );

            let enter_in_back =
                back_response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            let can_add =
                !app.entry.front.trim().is_empty() && !app.entry.back.trim().is_empty();
            let add_clicked = ui.add_enabled(can_add, egui::Button::new("Add card")).clicked();

            if can_add && (add_clicked || enter_in_back) {
                app.add_card_from_entry();
            }
        });

        ui.add_space(6.0);
    });
}
