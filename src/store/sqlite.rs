// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::content::Deck;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::ActivityStore;
use crate::store::ProgressStore;
use crate::types::activity::DailyActivity;
use crate::types::date::Date;
use crate::types::item_id::ItemId;
use crate::types::progress::ProgressRecord;
use crate::types::timestamp::Timestamp;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// The progress records of one deck. Decks are scheduled independently.
    pub fn progress(&self, deck: Deck) -> ProgressTable {
        ProgressTable {
            db: self.clone(),
            deck,
        }
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ErrorReport::new("database lock poisoned"))
    }
}

/// A deck-scoped view of the `progress` table.
#[derive(Clone)]
pub struct ProgressTable {
    db: Database,
    deck: Deck,
}

impl ProgressTable {
    fn query(&self, sql: &str) -> Fallible<Vec<ProgressRecord>> {
        let conn = self.db.acquire()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([self.deck.as_str()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(progress_from_row(row)?);
        }
        Ok(records)
    }
}

const PROGRESS_COLUMNS: &str = "item_id, ease_factor, interval, repetitions, next_review_date, date_first_seen, last_review_date";

impl ProgressStore for ProgressTable {
    fn get_progress(&self, item_id: &ItemId) -> Fallible<Option<ProgressRecord>> {
        let conn = self.db.acquire()?;
        let sql = format!("select {PROGRESS_COLUMNS} from progress where deck = ? and item_id = ?;");
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query((self.deck.as_str(), item_id))?;
        match rows.next()? {
            Some(row) => Ok(Some(progress_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn upsert_progress(&mut self, record: &ProgressRecord) -> Fallible<()> {
        let mut conn = self.db.acquire()?;
        let tx = conn.transaction()?;
        let sql = "insert into progress (deck, item_id, ease_factor, interval, repetitions, next_review_date, date_first_seen, last_review_date) values (?, ?, ?, ?, ?, ?, ?, ?) on conflict (deck, item_id) do update set ease_factor = excluded.ease_factor, interval = excluded.interval, repetitions = excluded.repetitions, next_review_date = excluded.next_review_date, last_review_date = excluded.last_review_date;";
        tx.execute(
            sql,
            (
                self.deck.as_str(),
                &record.item_id,
                record.ease_factor,
                record.interval,
                record.repetitions,
                record.next_review_date,
                record.date_first_seen,
                record.last_review_date,
            ),
        )?;
        tx.commit()?;
        Ok(())
    }

    fn due_before(&self, cutoff: Timestamp) -> Fallible<Vec<ProgressRecord>> {
        // Timestamps are stored as text, so compare them here rather than in
        // SQL.
        let records = self.all_progress()?;
        Ok(records
            .into_iter()
            .filter(|record| record.next_review_date < cutoff)
            .collect())
    }

    fn progress_ids(&self) -> Fallible<HashSet<ItemId>> {
        let conn = self.db.acquire()?;
        let mut stmt = conn.prepare("select item_id from progress where deck = ?;")?;
        let mut rows = stmt.query([self.deck.as_str()])?;
        let mut ids = HashSet::new();
        while let Some(row) = rows.next()? {
            let id: ItemId = row.get(0)?;
            ids.insert(id);
        }
        Ok(ids)
    }

    fn all_progress(&self) -> Fallible<Vec<ProgressRecord>> {
        self.query(&format!(
            "select {PROGRESS_COLUMNS} from progress where deck = ? order by item_id;"
        ))
    }
}

impl ActivityStore for Database {
    fn get_activity(&self, date: Date) -> Fallible<Option<DailyActivity>> {
        let conn = self.acquire()?;
        let sql = "select date, items_reviewed, items_learned from daily_activity where date = ?;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([date])?;
        match rows.next()? {
            Some(row) => Ok(Some(activity_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn upsert_activity(&mut self, activity: &DailyActivity) -> Fallible<()> {
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        let sql = "insert into daily_activity (date, items_reviewed, items_learned) values (?, ?, ?) on conflict (date) do update set items_reviewed = excluded.items_reviewed, items_learned = excluded.items_learned;";
        tx.execute(
            sql,
            (activity.date, activity.items_reviewed, activity.items_learned),
        )?;
        tx.commit()?;
        Ok(())
    }

    fn all_activity(&self) -> Fallible<Vec<DailyActivity>> {
        let conn = self.acquire()?;
        let sql = "select date, items_reviewed, items_learned from daily_activity order by date;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(activity_from_row(row)?);
        }
        Ok(records)
    }
}

fn progress_from_row(row: &Row) -> Fallible<ProgressRecord> {
    Ok(ProgressRecord {
        item_id: row.get(0)?,
        ease_factor: row.get(1)?,
        interval: row.get(2)?,
        repetitions: row.get(3)?,
        next_review_date: row.get(4)?,
        date_first_seen: row.get(5)?,
        last_review_date: row.get(6)?,
    })
}

fn activity_from_row(row: &Row) -> Fallible<DailyActivity> {
    Ok(DailyActivity {
        date: row.get(0)?,
        items_reviewed: row.get(1)?,
        items_learned: row.get(2)?,
    })
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["progress"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::sm2::Quality;
    use crate::sm2::compute_next;

    fn open() -> Fallible<Database> {
        Database::new(":memory:")
    }

    #[test]
    fn test_progress_round_trip() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("scenecards.db");
        let path = path.to_str().ok_or_else(|| ErrorReport::new("invalid path"))?;
        let first_seen = Timestamp::now();
        let mut record = ProgressRecord::new(ItemId::from("sonder"), first_seen);
        for quality in [Quality::KnewIt, Quality::HadAHunch, Quality::KnewIt] {
            let now = Timestamp::now();
            let schedule = compute_next(
                quality,
                record.ease_factor,
                record.interval,
                record.repetitions,
                now,
            );
            record.apply(&schedule, now);
        }
        {
            let mut table = Database::new(path)?.progress(Deck::Vocabulary);
            table.upsert_progress(&record)?;
        }
        // Reopen so nothing is served from a live connection.
        let table = Database::new(path)?.progress(Deck::Vocabulary);
        let stored = table.get_progress(&ItemId::from("sonder"))?;
        assert_eq!(stored, Some(record));
        Ok(())
    }

    #[test]
    fn test_upsert_keeps_first_seen() -> Fallible<()> {
        let db = open()?;
        let mut table = db.progress(Deck::Vocabulary);
        let first = Timestamp::local(2026, 3, 1, 9, 0);
        table.upsert_progress(&ProgressRecord::new(ItemId::from("a"), first))?;
        let later = ProgressRecord {
            repetitions: 1,
            interval: 1,
            ..ProgressRecord::new(ItemId::from("a"), Timestamp::local(2026, 3, 2, 9, 0))
        };
        table.upsert_progress(&later)?;
        let stored = table.get_progress(&ItemId::from("a"))?.expect("record exists");
        assert_eq!(stored.date_first_seen, first);
        assert_eq!(stored.repetitions, 1);
        assert_eq!(stored.last_review_date, later.last_review_date);
        Ok(())
    }

    #[test]
    fn test_decks_are_independent() -> Fallible<()> {
        let db = open()?;
        let now = Timestamp::local(2026, 3, 10, 9, 0);
        let mut words = db.progress(Deck::Vocabulary);
        words.upsert_progress(&ProgressRecord::new(ItemId::from("salary"), now))?;
        let etymology = db.progress(Deck::Etymology);
        assert!(etymology.progress_ids()?.is_empty());
        assert_eq!(words.progress_ids()?.len(), 1);
        assert_eq!(etymology.get_progress(&ItemId::from("salary"))?, None);
        Ok(())
    }

    #[test]
    fn test_due_before() -> Fallible<()> {
        let db = open()?;
        let mut table = db.progress(Deck::Vocabulary);
        let now = Timestamp::local(2026, 3, 10, 9, 0);
        for (id, due) in [
            ("a", Timestamp::local(2026, 3, 9, 9, 0)),
            ("b", Timestamp::local(2026, 3, 11, 9, 0)),
            ("c", Timestamp::local(2026, 3, 10, 9, 0)),
        ] {
            let record = ProgressRecord {
                next_review_date: due,
                ..ProgressRecord::new(ItemId::from(id), now)
            };
            table.upsert_progress(&record)?;
        }
        let due: Vec<ItemId> = table
            .due_before(now.start_of_tomorrow())?
            .into_iter()
            .map(|record| record.item_id)
            .collect();
        assert_eq!(due, vec![ItemId::from("a"), ItemId::from("c")]);
        Ok(())
    }

    #[test]
    fn test_activity_round_trip() -> Fallible<()> {
        let mut db = open()?;
        let date = Date::parse("2026-03-10")?;
        assert_eq!(db.get_activity(date)?, None);
        let activity = DailyActivity {
            date,
            items_reviewed: 4,
            items_learned: 2,
        };
        db.upsert_activity(&activity)?;
        let updated = DailyActivity {
            items_reviewed: 5,
            ..activity.clone()
        };
        db.upsert_activity(&updated)?;
        assert_eq!(db.get_activity(date)?, Some(updated.clone()));
        assert_eq!(db.all_activity()?, vec![updated]);
        Ok(())
    }

    #[test]
    fn test_schema_is_created_once() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("scenecards.db");
        let path = path.to_str().ok_or_else(|| ErrorReport::new("invalid path"))?;
        let mut db = Database::new(path)?;
        db.upsert_activity(&DailyActivity::new(Date::parse("2026-03-10")?))?;
        let db = Database::new(path)?;
        assert_eq!(db.all_activity()?.len(), 1);
        Ok(())
    }
}
