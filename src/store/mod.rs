use std::{
    path::Path,
    time::Duration,
};

use rusqlite::{
    params,
    Connection,
    OptionalExtension,
};

use crate::core::{
    Flashcard,
    KarteiError,
    NewCard,
};

mod schema;

/// Which rows a listing returns. Listings are always ordered by
/// lesson, then insertion id, so print order matches table order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CardFilter {
    #[default]
    All,
    Selected,
    Search(String),
}

pub struct CardStore {
    conn: Connection,
}

impl CardStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KarteiError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        schema::init(&conn)?;
        Ok(CardStore { conn })
    }

    pub fn open_in_memory() -> Result<Self, KarteiError> {
        let conn = Connection::open_in_memory()?;
        schema::init(&conn)?;
        Ok(CardStore { conn })
    }

    pub fn add_card(&self, lesson: &str, front: &str, back: &str) -> Result<i64, KarteiError> {
        self.conn.execute(
            "INSERT INTO flashcards (lesson, front, back) VALUES (?1, ?2, ?3)",
            params![lesson, front, back],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, id: i64) -> Result<Option<Flashcard>, KarteiError> {
        let card = self
            .conn
            .query_row(
                "SELECT id, lesson, front, back, selected, copies, printed_count, last_printed
                 FROM flashcards WHERE id = ?1",
                params![id],
                row_to_card,
            )
            .optional()?;
        Ok(card)
    }

    pub fn list(&self, filter: &CardFilter) -> Result<Vec<Flashcard>, KarteiError> {
        match filter {
            CardFilter::All => self.query_cards(
                "SELECT id, lesson, front, back, selected, copies, printed_count, last_printed
                 FROM flashcards ORDER BY lesson, id",
                params![],
            ),
            CardFilter::Selected => self.query_cards(
                "SELECT id, lesson, front, back, selected, copies, printed_count, last_printed
                 FROM flashcards WHERE selected = 1 ORDER BY lesson, id",
                params![],
            ),
            CardFilter::Search(text) => {
                let pattern = format!("%{}%", text);
                self.query_cards(
                    "SELECT id, lesson, front, back, selected, copies, printed_count, last_printed
                     FROM flashcards
                     WHERE lesson LIKE ?1 OR front LIKE ?1 OR back LIKE ?1
                     ORDER BY lesson, id",
                    params![pattern],
                )
            }
        }
    }

    pub fn set_lesson(&self, id: i64, lesson: &str) -> Result<(), KarteiError> {
        self.conn
            .execute("UPDATE flashcards SET lesson = ?1 WHERE id = ?2", params![lesson, id])?;
        Ok(())
    }

    pub fn set_front(&self, id: i64, front: &str) -> Result<(), KarteiError> {
        self.conn
            .execute("UPDATE flashcards SET front = ?1 WHERE id = ?2", params![front, id])?;
        Ok(())
    }

    pub fn set_back(&self, id: i64, back: &str) -> Result<(), KarteiError> {
        self.conn.execute("UPDATE flashcards SET back = ?1 WHERE id = ?2", params![back, id])?;
        Ok(())
    }

    /// Copies below one make no sense for printing, so the floor is 1.
    pub fn set_copies(&self, id: i64, copies: u32) -> Result<(), KarteiError> {
        self.conn.execute(
            "UPDATE flashcards SET copies = ?1 WHERE id = ?2",
            params![copies.max(1), id],
        )?;
        Ok(())
    }

    pub fn set_selected(&self, id: i64, selected: bool) -> Result<(), KarteiError> {
        self.conn.execute(
            "UPDATE flashcards SET selected = ?1 WHERE id = ?2",
            params![selected, id],
        )?;
        Ok(())
    }

    /// Marks the given rows selected without touching any others. The
    /// table passes the currently visible rows here so "Select All"
    /// respects an active search.
    pub fn select_many(&self, ids: &[i64]) -> Result<(), KarteiError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare("UPDATE flashcards SET selected = 1 WHERE id = ?1")?;
            for id in ids {
                stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn unselect_all(&self) -> Result<(), KarteiError> {
        self.conn.execute("UPDATE flashcards SET selected = 0", [])?;
        Ok(())
    }

    /// Replaces the current selection with every card that has never
    /// been printed.
    pub fn select_unprinted(&self) -> Result<(), KarteiError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("UPDATE flashcards SET selected = 0", [])?;
        tx.execute("UPDATE flashcards SET selected = 1 WHERE printed_count = 0", [])?;
        tx.commit()?;
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<(), KarteiError> {
        self.conn.execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn delete_selected(&self) -> Result<usize, KarteiError> {
        let deleted = self.conn.execute("DELETE FROM flashcards WHERE selected = 1", [])?;
        Ok(deleted)
    }

    pub fn count_all(&self) -> Result<usize, KarteiError> {
        let count: i64 =
            self.conn.query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn count_selected(&self) -> Result<usize, KarteiError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM flashcards WHERE selected = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Stamps every selected card as printed. Runs only after the PDF
    /// was written successfully.
    pub fn record_print(&self, timestamp: &str) -> Result<usize, KarteiError> {
        let updated = self.conn.execute(
            "UPDATE flashcards
             SET printed_count = printed_count + copies, last_printed = ?1
             WHERE selected = 1",
            params![timestamp],
        )?;
        Ok(updated)
    }

    /// Batch insert for CSV import, one transaction for the whole file.
    /// Imported rows always start unselected.
    pub fn insert_batch(&self, cards: &[NewCard]) -> Result<usize, KarteiError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO flashcards
                   (lesson, front, back, selected, copies, printed_count, last_printed)
                 VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6)",
            )?;
            for card in cards {
                stmt.execute(params![
                    card.lesson,
                    card.front,
                    card.back,
                    card.copies.max(1),
                    card.printed_count,
                    card.last_printed,
                ])?;
            }
        }
        tx.commit()?;
        Ok(cards.len())
    }

    fn query_cards(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Flashcard>, KarteiError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_card)?;
        let mut cards = Vec::new();
        for row in rows {
            cards.push(row?);
        }
        Ok(cards)
    }
}

fn row_to_card(row: &rusqlite::Row) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: row.get(0)?,
        lesson: row.get(1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        selected: row.get(4)?,
        copies: row.get(5)?,
        printed_count: row.get(6)?,
        last_printed: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_cards() -> CardStore {
        let store = CardStore::open_in_memory().unwrap();
        store.add_card("Unit 2", "dog", "perro").unwrap();
        store.add_card("Unit 1", "hello", "hola").unwrap();
        store.add_card("Unit 1", "bye", "adios").unwrap();
        store
    }

    #[test]
    fn test_add_defaults() {
        let store = CardStore::open_in_memory().unwrap();
        let id = store.add_card("", "front", "back").unwrap();
        let card = store.get(id).unwrap().unwrap();
        assert_eq!(card.lesson, "");
        assert!(!card.selected);
        assert_eq!(card.copies, 1);
        assert_eq!(card.printed_count, 0);
        assert_eq!(card.last_printed, None);
    }

    #[test]
    fn test_list_orders_by_lesson_then_id() {
        let store = store_with_cards();
        let cards = store.list(&CardFilter::All).unwrap();
        let fronts: Vec<&str> = cards.iter().map(|c| c.front.as_str()).collect();
        // "Unit 1" rows first, in insertion order, then "Unit 2".
        assert_eq!(fronts, vec!["hello", "bye", "dog"]);
    }

    #[test]
    fn test_search_matches_all_text_columns() {
        let store = store_with_cards();

        let by_front = store.list(&CardFilter::Search("hell".to_string())).unwrap();
        assert_eq!(by_front.len(), 1);
        assert_eq!(by_front[0].front, "hello");

        let by_back = store.list(&CardFilter::Search("perro".to_string())).unwrap();
        assert_eq!(by_back.len(), 1);

        let by_lesson = store.list(&CardFilter::Search("Unit 1".to_string())).unwrap();
        assert_eq!(by_lesson.len(), 2);

        let none = store.list(&CardFilter::Search("zzz".to_string())).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_selection_operations() {
        let store = store_with_cards();
        let all = store.list(&CardFilter::All).unwrap();

        store.set_selected(all[0].id, true).unwrap();
        assert_eq!(store.count_selected().unwrap(), 1);

        store.select_many(&[all[1].id, all[2].id]).unwrap();
        assert_eq!(store.count_selected().unwrap(), 3);

        store.unselect_all().unwrap();
        assert_eq!(store.count_selected().unwrap(), 0);

        let selected = store.list(&CardFilter::Selected).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_select_unprinted_replaces_selection() {
        let store = store_with_cards();
        let all = store.list(&CardFilter::All).unwrap();

        // Print the first card, then select it manually.
        store.set_selected(all[0].id, true).unwrap();
        store.record_print("2026-01-05 10:00:00").unwrap();
        store.set_selected(all[0].id, true).unwrap();

        store.select_unprinted().unwrap();
        let selected = store.list(&CardFilter::Selected).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|c| c.printed_count == 0));
        assert!(!selected.iter().any(|c| c.id == all[0].id));
    }

    #[test]
    fn test_set_copies_clamps_to_one() {
        let store = CardStore::open_in_memory().unwrap();
        let id = store.add_card("", "a", "b").unwrap();
        store.set_copies(id, 0).unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().copies, 1);
        store.set_copies(id, 4).unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().copies, 4);
    }

    #[test]
    fn test_cell_edits() {
        let store = CardStore::open_in_memory().unwrap();
        let id = store.add_card("L", "f", "b").unwrap();
        store.set_lesson(id, "Unit 9").unwrap();
        store.set_front(id, "new front").unwrap();
        store.set_back(id, "new back").unwrap();
        let card = store.get(id).unwrap().unwrap();
        assert_eq!(card.lesson, "Unit 9");
        assert_eq!(card.front, "new front");
        assert_eq!(card.back, "new back");
    }

    #[test]
    fn test_delete_and_delete_selected() {
        let store = store_with_cards();
        let all = store.list(&CardFilter::All).unwrap();

        store.delete(all[0].id).unwrap();
        assert_eq!(store.count_all().unwrap(), 2);
        assert!(store.get(all[0].id).unwrap().is_none());

        store.select_many(&[all[1].id, all[2].id]).unwrap();
        let deleted = store.delete_selected().unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.count_all().unwrap(), 0);
    }

    #[test]
    fn test_record_print_adds_copies() {
        let store = CardStore::open_in_memory().unwrap();
        let id = store.add_card("", "front", "back").unwrap();
        store.set_copies(id, 3).unwrap();
        store.set_selected(id, true).unwrap();

        let updated = store.record_print("2026-01-05 10:00:00").unwrap();
        assert_eq!(updated, 1);
        let card = store.get(id).unwrap().unwrap();
        assert_eq!(card.printed_count, 3);
        assert_eq!(card.last_printed.as_deref(), Some("2026-01-05 10:00:00"));

        store.record_print("2026-01-06 11:00:00").unwrap();
        let card = store.get(id).unwrap().unwrap();
        assert_eq!(card.printed_count, 6);
        assert_eq!(card.last_printed.as_deref(), Some("2026-01-06 11:00:00"));
    }

    #[test]
    fn test_record_print_skips_unselected() {
        let store = store_with_cards();
        let updated = store.record_print("2026-01-05 10:00:00").unwrap();
        assert_eq!(updated, 0);
        let cards = store.list(&CardFilter::All).unwrap();
        assert!(cards.iter().all(|c| c.printed_count == 0 && c.last_printed.is_none()));
    }

    #[test]
    fn test_insert_batch() {
        let store = CardStore::open_in_memory().unwrap();
        let rows = vec![
            NewCard {
                lesson: "Unit 1".to_string(),
                front: "one".to_string(),
                back: "uno".to_string(),
                copies: 2,
                printed_count: 5,
                last_printed: Some("2025-12-01 09:00:00".to_string()),
            },
            NewCard { front: "two".to_string(), back: "dos".to_string(), ..Default::default() },
        ];

        assert_eq!(store.insert_batch(&rows).unwrap(), 2);
        let cards = store.list(&CardFilter::All).unwrap();
        assert_eq!(cards.len(), 2);

        let one = cards.iter().find(|c| c.front == "one").unwrap();
        assert_eq!(one.copies, 2);
        assert_eq!(one.printed_count, 5);
        assert_eq!(one.last_printed.as_deref(), Some("2025-12-01 09:00:00"));
        assert!(!one.selected);

        let two = cards.iter().find(|c| c.front == "two").unwrap();
        assert_eq!(two.copies, 1);
        assert_eq!(two.printed_count, 0);
    }
}
