use rusqlite::Connection;

pub(crate) fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS flashcards (
          id            INTEGER PRIMARY KEY,
          lesson        TEXT NOT NULL DEFAULT '',
          front         TEXT NOT NULL DEFAULT '',
          back          TEXT NOT NULL DEFAULT '',
          selected      INTEGER NOT NULL DEFAULT 0,
          copies        INTEGER NOT NULL DEFAULT 1,
          printed_count INTEGER NOT NULL DEFAULT 0,
          last_printed  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_flashcards_lesson   ON flashcards(lesson);
        CREATE INDEX IF NOT EXISTS idx_flashcards_selected ON flashcards(selected);
        CREATE INDEX IF NOT EXISTS idx_flashcards_front    ON flashcards(front);
        CREATE INDEX IF NOT EXISTS idx_flashcards_back     ON flashcards(back);
        "#,
    )
}
