//! Local SQLite store for the user's collection.
//!
//! Membership is ground truth: these calls are never cached, so a toggle is
//! visible to the very next query. The full card record is kept as a JSON
//! payload (cards carry nested set/image structures), with the identifier
//! and name broken out as columns.

use crate::models::Card;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

/// Result type for database operations
pub type DbResult<T> = Result<T, rusqlite::Error>;

/// Returns the path to the collection database file.
fn db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("card_binder")
        .join("collection.db")
}

/// Returns today's date as `YYYY-MM-DD` using local system time.
fn today_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub struct CollectionDb {
    conn: Connection,
}

impl CollectionDb {
    /// Opens (or creates) the collection database and initialises the schema.
    pub fn open() -> DbResult<Self> {
        Self::open_at(&db_path())
    }

    /// Opens a database at an explicit path
    pub fn open_at(path: &std::path::Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        log::info!("Collection DB: {}", path.display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory database, used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS collected_cards (
                id           TEXT NOT NULL PRIMARY KEY,
                name         TEXT NOT NULL,
                payload      TEXT NOT NULL,
                collected_at TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// True if the card is in the collection
    pub fn exists(&self, card_id: &str) -> DbResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM collected_cards WHERE id = ?1",
                params![card_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Adds a card to the collection (idempotent; re-saving refreshes the
    /// stored record but keeps the original collected date).
    pub fn save(&self, card: &Card) -> DbResult<()> {
        let payload = serde_json::to_string(card).map_err(|e| {
            rusqlite::Error::ToSqlConversionFailure(Box::new(e))
        })?;
        self.conn.execute(
            "INSERT INTO collected_cards (id, name, payload, collected_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name    = excluded.name,
                payload = excluded.payload",
            params![card.id, card.name, payload, today_date()],
        )?;
        log::debug!("Saved card {} to collection", card.id);
        Ok(())
    }

    /// Removes a card from the collection. Removing an absent card is a no-op.
    pub fn delete_by_id(&self, card_id: &str) -> DbResult<()> {
        self.conn.execute(
            "DELETE FROM collected_cards WHERE id = ?1",
            params![card_id],
        )?;
        log::debug!("Deleted card {} from collection", card_id);
        Ok(())
    }

    /// All collected cards, ordered by name
    pub fn find_all(&self) -> DbResult<Vec<Card>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM collected_cards ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            let payload: String = row.get(0)?;
            Ok(payload)
        })?;

        let mut cards = Vec::new();
        for payload in rows {
            match serde_json::from_str::<Card>(&payload?) {
                Ok(card) => cards.push(card),
                Err(e) => log::warn!("Skipping unreadable collection record: {}", e),
            }
        }
        Ok(cards)
    }

    pub fn count(&self) -> DbResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM collected_cards", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
