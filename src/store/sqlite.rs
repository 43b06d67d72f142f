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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::store::PROGRESS_KEY;
use crate::store::Store;

/// Stores the blob as a row in a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Fallible<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }
}

impl Store for SqliteStore {
    fn read(&self) -> Fallible<Option<Vec<u8>>> {
        let sql = "select value from blobs where key = ?;";
        let blob: Option<Vec<u8>> = self
            .conn
            .query_row(sql, [PROGRESS_KEY], |row| row.get(0))
            .optional()?;
        Ok(blob)
    }

    fn write(&self, blob: &[u8]) -> Fallible<()> {
        let sql = "insert into blobs (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        self.conn.execute(sql, (PROGRESS_KEY, blob))?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["blobs"], |row| row.get(0))?;
    Ok(count > 0)
}
