use std::{
    fs::File,
    io::{
        Read,
        Write,
    },
    path::Path,
};

use crate::{
    core::{
        KarteiError,
        NewCard,
    },
    store::{
        CardFilter,
        CardStore,
    },
};

pub const CSV_HEADER: [&str; 6] =
    ["lesson", "front", "back", "copies", "printed_count", "last_printed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Appends rows from a CSV stream to the store. The header must carry
/// lesson/front/back; copies, printed_count and last_printed are
/// optional. Rows without front or back text are counted as skipped and
/// the import keeps going. Nothing is de-duplicated.
pub fn import_cards<R: Read>(store: &CardStore, reader: R) -> Result<ImportReport, KarteiError> {
    let mut csv_reader =
        csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &'static str| {
        headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let lesson_idx = column("lesson").ok_or(KarteiError::MissingColumn("lesson"))?;
    let front_idx = column("front").ok_or(KarteiError::MissingColumn("front"))?;
    let back_idx = column("back").ok_or(KarteiError::MissingColumn("back"))?;
    let copies_idx = column("copies");
    let printed_idx = column("printed_count");
    let last_printed_idx = column("last_printed");

    let mut rows: Vec<NewCard> = Vec::new();
    let mut skipped = 0usize;

    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Skipping unreadable CSV row: {}", e);
                skipped += 1;
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let front = field(front_idx);
        let back = field(back_idx);
        if front.is_empty() || back.is_empty() {
            skipped += 1;
            continue;
        }

        let copies = copies_idx
            .and_then(|idx| field(idx).parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        let printed_count =
            printed_idx.and_then(|idx| field(idx).parse::<u32>().ok()).unwrap_or(0);
        let last_printed = last_printed_idx
            .map(|idx| field(idx))
            .filter(|value| !value.is_empty())
            .map(String::from);

        rows.push(NewCard {
            lesson: field(lesson_idx).to_string(),
            front: front.to_string(),
            back: back.to_string(),
            copies,
            printed_count,
            last_printed,
        });
    }

    let imported = store.insert_batch(&rows)?;
    Ok(ImportReport { imported, skipped })
}

/// Writes every card (lesson order) with the full six-column header.
/// Returns the number of rows written.
pub fn export_cards<W: Write>(store: &CardStore, writer: W) -> Result<usize, KarteiError> {
    let cards = store.list(&CardFilter::All)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for card in &cards {
        let copies = card.copies.to_string();
        let printed_count = card.printed_count.to_string();
        csv_writer.write_record([
            card.lesson.as_str(),
            card.front.as_str(),
            card.back.as_str(),
            copies.as_str(),
            printed_count.as_str(),
            card.last_printed.as_deref().unwrap_or(""),
        ])?;
    }
    csv_writer.flush()?;

    Ok(cards.len())
}

pub fn import_csv_file(store: &CardStore, path: &Path) -> Result<ImportReport, KarteiError> {
    let file = File::open(path)?;
    import_cards(store, file)
}

pub fn export_csv_file(store: &CardStore, path: &Path) -> Result<usize, KarteiError> {
    let file = File::create(path)?;
    export_cards(store, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let source = CardStore::open_in_memory().unwrap();
        let id = source.add_card("Unit 1", "hello", "hola").unwrap();
        source.set_copies(id, 3).unwrap();
        source.set_selected(id, true).unwrap();
        source.record_print("2026-01-05 10:00:00").unwrap();
        source.add_card("Unit 2", "dog", "perro").unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        assert_eq!(export_cards(&source, &mut buffer).unwrap(), 2);

        let target = CardStore::open_in_memory().unwrap();
        let report = import_cards(&target, buffer.as_slice()).unwrap();
        assert_eq!(report, ImportReport { imported: 2, skipped: 0 });

        let cards = target.list(&CardFilter::All).unwrap();
        assert_eq!(cards.len(), 2);

        let hello = cards.iter().find(|c| c.front == "hello").unwrap();
        assert_eq!(hello.lesson, "Unit 1");
        assert_eq!(hello.back, "hola");
        assert_eq!(hello.copies, 3);
        assert_eq!(hello.printed_count, 3);
        assert_eq!(hello.last_printed.as_deref(), Some("2026-01-05 10:00:00"));
        // Selection is not part of the exchange format.
        assert!(!hello.selected);

        let dog = cards.iter().find(|c| c.front == "dog").unwrap();
        assert_eq!(dog.copies, 1);
        assert_eq!(dog.printed_count, 0);
        assert_eq!(dog.last_printed, None);
    }

    #[test]
    fn test_import_skips_incomplete_rows() {
        let csv = "lesson,front,back\n\
                   Unit 1,hello,hola\n\
                   Unit 1,,hola\n\
                   Unit 1,hello,\n\
                   ,solo,alone\n";
        let store = CardStore::open_in_memory().unwrap();
        let report = import_cards(&store, csv.as_bytes()).unwrap();
        assert_eq!(report, ImportReport { imported: 2, skipped: 2 });

        let cards = store.list(&CardFilter::All).unwrap();
        assert_eq!(cards.len(), 2);
        // Lesson may be empty, front and back may not.
        assert!(cards.iter().any(|c| c.lesson.is_empty() && c.front == "solo"));
    }

    #[test]
    fn test_import_short_rows_are_skipped() {
        let csv = "lesson,front,back\nUnit 1,hello\nUnit 1,bye,adios\n";
        let store = CardStore::open_in_memory().unwrap();
        let report = import_cards(&store, csv.as_bytes()).unwrap();
        assert_eq!(report, ImportReport { imported: 1, skipped: 1 });
    }

    #[test]
    fn test_import_missing_required_column() {
        let csv = "lesson,front,copies\nUnit 1,hello,2\n";
        let store = CardStore::open_in_memory().unwrap();
        let result = import_cards(&store, csv.as_bytes());
        match result {
            Err(KarteiError::MissingColumn("back")) => {}
            other => panic!("Expected MissingColumn(\"back\"), got {:?}", other),
        }
        assert_eq!(store.count_all().unwrap(), 0);
    }

    #[test]
    fn test_import_optional_columns_default() {
        let csv = "front,back,lesson\nhello,hola,Unit 1\n";
        let store = CardStore::open_in_memory().unwrap();
        let report = import_cards(&store, csv.as_bytes()).unwrap();
        assert_eq!(report.imported, 1);

        let card = &store.list(&CardFilter::All).unwrap()[0];
        assert_eq!(card.lesson, "Unit 1");
        assert_eq!(card.copies, 1);
        assert_eq!(card.printed_count, 0);
        assert_eq!(card.last_printed, None);
    }

    #[test]
    fn test_import_unparseable_numbers_default() {
        let csv = "lesson,front,back,copies,printed_count\nUnit 1,hello,hola,many,-3\n";
        let store = CardStore::open_in_memory().unwrap();
        import_cards(&store, csv.as_bytes()).unwrap();

        let card = &store.list(&CardFilter::All).unwrap()[0];
        assert_eq!(card.copies, 1);
        assert_eq!(card.printed_count, 0);
    }

    #[test]
    fn test_export_empty_store_writes_header_only() {
        let store = CardStore::open_in_memory().unwrap();
        let mut buffer: Vec<u8> = Vec::new();
        assert_eq!(export_cards(&store, &mut buffer).unwrap(), 0);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.trim_end(), "lesson,front,back,copies,printed_count,last_printed");
    }
}
