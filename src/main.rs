#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use kartei::{
    gui::KarteiApp,
    persistence::{
        self,
        SETTINGS_FILE,
    },
    settings::SettingsData,
    store::CardStore,
    translate::Translator,
};

fn main() -> eframe::Result {
    let settings = persistence::load_json_or_default::<SettingsData>(SETTINGS_FILE);

    let database_path = persistence::database_path();
    println!("Card database: {}", database_path.display());

    let store = match CardStore::open(&database_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Failed to open card database: {}", err);

            let choice = rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Kartei")
                .set_description(format!(
                    "The card database could not be opened:\n{}\n\nContinue with an empty, \
                     unsaved set of cards?",
                    err
                ))
                .set_buttons(rfd::MessageButtons::OkCancel)
                .show();

            if choice != rfd::MessageDialogResult::Ok {
                std::process::exit(1);
            }

            match CardStore::open_in_memory() {
                Ok(store) => store,
                Err(err) => {
                    eprintln!("Failed to open the fallback store: {}", err);
                    std::process::exit(1);
                }
            }
        }
    };

    let translator = Translator::new();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 600.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Kartei"),
        ..Default::default()
    };

    eframe::run_native(
        "Kartei",
        options,
        Box::new(move |cc| Ok(Box::new(KarteiApp::new(cc, store, settings, translator)))),
    )
}
