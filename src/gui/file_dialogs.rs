//! Native file pickers for the CSV and PDF flows. Each returns `None`
//! when the user backed out of the dialog.

use std::path::PathBuf;

use rfd::FileDialog;

use crate::{
    core::KarteiError,
    csv_io::{
        self,
        ImportReport,
    },
    store::CardStore,
};

pub fn import_csv_with_dialog(store: &CardStore) -> Option<Result<ImportReport, KarteiError>> {
    let path = FileDialog::new().add_filter("CSV files", &["csv"]).pick_file()?;
    Some(csv_io::import_csv_file(store, &path))
}

pub fn export_csv_with_dialog(
    store: &CardStore,
) -> Option<(PathBuf, Result<usize, KarteiError>)> {
    let path = FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_file_name("flashcards.csv")
        .save_file()?;
    let result = csv_io::export_csv_file(store, &path);
    Some((path, result))
}

pub fn pick_pdf_target() -> Option<PathBuf> {
    FileDialog::new().add_filter("PDF files", &["pdf"]).set_file_name("flashcards.pdf").save_file()
}
