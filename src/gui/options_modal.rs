use eframe::egui::{
    self,
    DragValue,
};

use super::{
    file_dialogs,
    modal::{
        action_buttons,
        Modal,
        ModalResult,
    },
};
use crate::{
    core::{
        AutofillLanguage,
        Orientation,
    },
    print::pdf::{
        MAX_FONT_SIZE,
        MIN_FONT_SIZE,
    },
    settings::SettingsData,
    store::CardStore,
};

/// What the options dialog did this frame.
#[derive(Default)]
pub struct OptionsOutcome {
    /// The accepted draft, present on the frame Save was clicked.
    pub saved: Option<SettingsData>,
    /// Set when a CSV import added rows and the table needs a reload.
    pub cards_changed: bool,
}

pub struct OptionsModal {
    modal: Modal<SettingsData>,
    status: Option<String>,
}

impl OptionsModal {
    pub fn new() -> Self {
        Self { modal: Modal::new("Options"), status: None }
    }

    /// Opens the dialog on a copy of the live settings. Nothing is applied
    /// until the caller gets the draft back from `show`.
    pub fn open_options(&mut self, settings: SettingsData) {
        self.status = None;
        self.modal.open_with(settings);
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        store: &CardStore,
        translator_available: bool,
    ) -> OptionsOutcome {
        let mut outcome = OptionsOutcome::default();

        if !self.modal.is_open() {
            return outcome;
        }

        let mut import_clicked = false;
        let mut export_clicked = false;
        let status_text = self.status.clone();

        let result = self.modal.show(ctx, |ui, draft| {
            ui.set_width(380.0);

            ui_print_options(ui, draft);

            ui.add_space(4.0);
            ui.separator();

            ui_autofill_options(ui, draft, translator_available);

            ui.add_space(4.0);
            ui.separator();

            ui.label(egui::RichText::new("Card file").strong());
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Import CSV…").clicked() {
                    import_clicked = true;
                }
                if ui.button("Export CSV…").clicked() {
                    export_clicked = true;
                }
            });
            if let Some(status) = &status_text {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(status).italics().weak());
            }

            ui.add_space(12.0);
            action_buttons(ui, draft, "Save", "Cancel")
        });

        if import_clicked {
            match file_dialogs::import_csv_with_dialog(store) {
                Some(Ok(report)) => {
                    outcome.cards_changed = report.imported > 0;
                    self.status = Some(format!(
                        "Imported {} cards, skipped {} rows.",
                        report.imported, report.skipped
                    ));
                }
                Some(Err(err)) => {
                    eprintln!("CSV import failed: {}", err);
                    self.status = Some(format!("Import failed: {}", err));
                }
                None => {}
            }
        }

        if export_clicked {
            match file_dialogs::export_csv_with_dialog(store) {
                Some((path, Ok(count))) => {
                    self.status =
                        Some(format!("Exported {} cards to {}.", count, path.display()));
                }
                Some((_, Err(err))) => {
                    eprintln!("CSV export failed: {}", err);
                    self.status = Some(format!("Export failed: {}", err));
                }
                None => {}
            }
        }

        if let Some(ModalResult::Confirmed(settings)) = result {
            outcome.saved = Some(settings);
        }

        outcome
    }
}

impl Default for OptionsModal {
    fn default() -> Self {
        Self::new()
    }
}

fn ui_print_options(ui: &mut egui::Ui, draft: &mut SettingsData) {
    ui.label(egui::RichText::new("Printing").strong());
    ui.add_space(4.0);

    egui::Grid::new("print_options_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
        ui.label("Cards per page:");
        ui.add(DragValue::new(&mut draft.cards_per_page).speed(0.1).range(1..=12))
            .on_hover_text("Printing itself accepts even values from 2 to 12.");
        ui.end_row();

        ui.label("Orientation:");
        egui::ComboBox::from_id_salt("orientation_combo")
            .selected_text(draft.orientation.label())
            .show_ui(ui, |ui| {
                for orientation in Orientation::ALL {
                    ui.selectable_value(&mut draft.orientation, orientation, orientation.label());
                }
            });
        ui.end_row();

        ui.label("Font size:");
        ui.add(
            DragValue::new(&mut draft.font_size)
                .speed(1.0)
                .range(MIN_FONT_SIZE..=MAX_FONT_SIZE)
                .suffix(" pt"),
        )
        .on_hover_text("Card text starts at this size and shrinks until it fits its box.");
        ui.end_row();

        ui.label("Pen color:");
        let mut rgb = draft.pen_rgb8();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            draft.set_pen_rgb8(rgb);
        }
        ui.end_row();

        ui.label("Pen width:");
        ui.add(DragValue::new(&mut draft.pen_width).speed(0.05).range(1.0..=10.0).suffix(" pt"));
        ui.end_row();
    });
}

fn ui_autofill_options(ui: &mut egui::Ui, draft: &mut SettingsData, translator_available: bool) {
    ui.label(egui::RichText::new("Auto-fill").strong());
    ui.add_space(4.0);

    egui::Grid::new("autofill_options_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
        ui.label("Back text language:");
        ui.add_enabled_ui(translator_available, |ui| {
            egui::ComboBox::from_id_salt("autofill_language_combo")
                .selected_text(draft.autofill_language.label())
                .show_ui(ui, |ui| {
                    for language in AutofillLanguage::ALL {
                        ui.selectable_value(
                            &mut draft.autofill_language,
                            language,
                            language.label(),
                        );
                    }
                });
        })
        .response
        .on_hover_text(if translator_available {
            "Suggests a back text in this language when the front field loses focus."
        } else {
            "This build was compiled without the translation feature."
        });
        ui.end_row();
    });
}
