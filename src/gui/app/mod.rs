mod modals;

use chrono::Local;
use eframe::egui;
use modals::{
    DeleteRequest,
    DeleteTarget,
    Modals,
};

use super::{
    entry_bar::{
        entry_bar,
        EntryState,
    },
    file_dialogs,
    modal::{
        action_buttons,
        ModalResult,
    },
    table::card_table,
    top_bar::top_bar,
};
use crate::{
    core::{
        Flashcard,
        KarteiError,
    },
    persistence::{
        save_json,
        SETTINGS_FILE,
    },
    print::{
        export_pdf,
        paginate,
        PageStyle,
        PrintCard,
    },
    settings::SettingsData,
    store::{
        CardFilter,
        CardStore,
    },
    translate::Translator,
};

pub struct KarteiApp {
    // Data
    pub store: CardStore,
    pub rows: Vec<Flashcard>,
    pub total_count: usize,
    pub selected_count: usize,

    // Configuration
    pub settings: SettingsData,

    // UI State
    pub search: String,
    pub show_selected_only: bool,
    pub entry: EntryState,
    pub last_added: Option<i64>,
    pub pending_scroll: Option<i64>,

    // External services
    pub translator: Translator,

    // Modals
    pub modals: Modals,
}

impl KarteiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        store: CardStore,
        settings: SettingsData,
        translator: Translator,
    ) -> Self {
        let mut app = Self {
            // Data
            store,
            rows: Vec::new(),
            total_count: 0,
            selected_count: 0,

            // Configuration
            settings,

            // UI State
            search: String::new(),
            show_selected_only: false,
            entry: EntryState::default(),
            last_added: None,
            pending_scroll: None,

            // External services
            translator,

            // Modals
            modals: Modals::default(),
        };

        app.reload();
        app
    }

    /// Re-queries the row cache from the store under the current filter.
    /// Called after anything that changes membership or ordering; plain
    /// cell edits skip it so the edited cell keeps focus.
    pub(crate) fn reload(&mut self) {
        let filter = if !self.search.trim().is_empty() {
            CardFilter::Search(self.search.trim().to_string())
        } else if self.show_selected_only {
            CardFilter::Selected
        } else {
            CardFilter::All
        };

        match self.store.list(&filter) {
            Ok(rows) => self.rows = rows,
            Err(err) => {
                self.rows.clear();
                self.report_store_error("load the card list", err);
            }
        }

        self.refresh_counts();
    }

    pub(crate) fn refresh_counts(&mut self) {
        self.total_count = self.store.count_all().unwrap_or(0);
        self.selected_count = self.store.count_selected().unwrap_or(0);
    }

    pub(crate) fn save_settings(&self) {
        if let Err(err) = save_json(&self.settings, SETTINGS_FILE) {
            eprintln!("Failed to save settings: {}", err);
        }
    }

    pub(crate) fn report_store_error(&mut self, what: &str, err: KarteiError) {
        eprintln!("Database operation failed ({}): {}", what, err);
        self.modals.error.report("Database error", format!("Could not {}.", what), &err);
    }

    pub(crate) fn add_card_from_entry(&mut self) {
        let lesson = self.entry.lesson.trim().to_string();
        let front = self.entry.front.trim().to_string();
        let back = self.entry.back.trim().to_string();

        if front.is_empty() || back.is_empty() {
            return;
        }

        match self.store.add_card(&lesson, &front, &back) {
            Ok(id) => {
                self.entry.front.clear();
                self.entry.back.clear();
                self.entry.focus_front = true;
                self.last_added = Some(id);
                self.pending_scroll = Some(id);
                self.reload();
            }
            Err(err) => self.report_store_error("add the card", err),
        }
    }

    /// Fills the empty back field from the front text, if a lookup
    /// language is configured. Best effort: a miss changes nothing.
    pub(crate) fn autofill_back(&mut self) {
        if !self.entry.back.trim().is_empty() {
            return;
        }

        let front = self.entry.front.trim();
        if front.is_empty() {
            return;
        }

        if let Some(translated) =
            self.translator.translate(front, self.settings.autofill_language)
        {
            self.entry.back = translated;
        }
    }

    pub(crate) fn import_csv_interactive(&mut self) {
        match file_dialogs::import_csv_with_dialog(&self.store) {
            Some(Ok(report)) => {
                self.reload();
                self.modals.notice.show_notice(
                    "Import finished",
                    format!(
                        "Imported {} cards, skipped {} rows.",
                        report.imported, report.skipped
                    ),
                );
            }
            Some(Err(err)) => {
                eprintln!("CSV import failed: {}", err);
                self.modals.error.report(
                    "Import failed",
                    "The CSV file could not be imported.",
                    &err,
                );
            }
            None => {}
        }
    }

    pub(crate) fn export_csv_interactive(&mut self) {
        match file_dialogs::export_csv_with_dialog(&self.store) {
            Some((path, Ok(count))) => {
                self.modals.notice.show_notice(
                    "Export finished",
                    format!("Exported {} cards to {}.", count, path.display()),
                );
            }
            Some((path, Err(err))) => {
                eprintln!("CSV export failed: {}", err);
                self.modals.error.report(
                    "Export failed",
                    format!("Could not write {}.", path.display()),
                    &err,
                );
            }
            None => {}
        }
    }

    /// The print flow: layout is validated before any file dialog shows,
    /// and printed counters only move after the PDF is on disk.
    pub(crate) fn print_selected(&mut self) {
        let cards = match self.store.list(&CardFilter::Selected) {
            Ok(cards) => cards,
            Err(err) => {
                self.report_store_error("load the selected cards", err);
                return;
            }
        };

        if cards.is_empty() {
            self.modals
                .notice
                .show_notice("Nothing to print", "Select at least one card first.");
            return;
        }

        let style = match PageStyle::from_settings(&self.settings) {
            Ok(style) => style,
            Err(err) => {
                self.modals.error.report(
                    "Print failed",
                    "The current print options were rejected.",
                    &err,
                );
                return;
            }
        };

        let print_cards: Vec<PrintCard> = cards
            .iter()
            .map(|card| PrintCard {
                lesson: card.lesson.clone(),
                front: card.front.clone(),
                back: card.back.clone(),
                copies: card.copies,
            })
            .collect();

        let sheets = match paginate(
            &print_cards,
            self.settings.cards_per_page,
            self.settings.orientation,
        ) {
            Ok(sheets) => sheets,
            Err(err) => {
                self.modals.error.report(
                    "Print failed",
                    "The cards-per-page value cannot be laid out.",
                    &err,
                );
                return;
            }
        };

        let Some(path) = file_dialogs::pick_pdf_target() else {
            return;
        };

        if let Err(err) = export_pdf(&sheets, self.settings.orientation, &style, &path) {
            self.modals.error.report(
                "Print failed",
                format!("Could not write {}.", path.display()),
                &err,
            );
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        match self.store.record_print(&timestamp) {
            Ok(updated) => {
                self.reload();
                let card_count: u32 = print_cards.iter().map(|card| card.copies).sum();
                self.modals.notice.show_notice(
                    "Print ready",
                    format!(
                        "Wrote {} sheet pairs ({} cards, {} rows updated) to {}.",
                        sheets.len(),
                        card_count,
                        updated,
                        path.display()
                    ),
                );
            }
            Err(err) => {
                self.reload();
                self.modals.error.report(
                    "Print counts not updated",
                    "The PDF was written, but the printed counters could not be stored.",
                    &err,
                );
            }
        }
    }

    /// Both delete paths ask first; the dialog's payload records which
    /// one the answer applies to.
    pub(crate) fn confirm_delete_card(&mut self, id: i64) {
        self.modals.confirm_delete.open_with(DeleteRequest {
            message: "Delete this card? This cannot be undone.".to_string(),
            target: DeleteTarget::Card(id),
        });
    }

    pub(crate) fn confirm_delete_selected(&mut self) {
        if self.selected_count == 0 {
            self.modals.notice.show_notice("Nothing to delete", "No cards are selected.");
            return;
        }
        self.modals.confirm_delete.open_with(DeleteRequest {
            message: format!(
                "Delete {} selected cards? This cannot be undone.",
                self.selected_count
            ),
            target: DeleteTarget::Selected,
        });
    }

    fn delete_card_confirmed(&mut self, id: i64) {
        match self.store.delete(id) {
            Ok(()) => self.reload(),
            Err(err) => self.report_store_error("delete the card", err),
        }
    }

    fn delete_selected_confirmed(&mut self) {
        match self.store.delete_selected() {
            Ok(removed) => {
                println!("Deleted {} cards", removed);
                self.reload();
            }
            Err(err) => self.report_store_error("delete the selected cards", err),
        }
    }
}

impl eframe::App for KarteiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        top_bar(ctx, self);
        entry_bar(ctx, self);
        card_table(ctx, self);

        self.modals.error.show(ctx);
        self.modals.notice.show(ctx);

        let answer = self.modals.confirm_delete.show(ctx, |ui, request| {
            ui.label(request.message.as_str());
            ui.add_space(10.0);
            action_buttons(ui, request, "Yes", "No")
        });
        if let Some(ModalResult::Confirmed(request)) = answer {
            match request.target {
                DeleteTarget::Selected => self.delete_selected_confirmed(),
                DeleteTarget::Card(id) => self.delete_card_confirmed(id),
            }
        }

        let outcome = self.modals.options.show(ctx, &self.store, self.translator.is_available());
        if outcome.cards_changed {
            self.reload();
        }
        if let Some(settings) = outcome.saved {
            self.settings = settings;
            self.save_settings();
        }
    }
}
