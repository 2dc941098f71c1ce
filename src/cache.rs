use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Persistent local cache: directory sizes, directory names and query payloads
pub struct CacheDb {
    conn: Connection,
}

impl CacheDb {
    pub fn new() -> Result<Self> {
        let cache_dir = Self::get_cache_dir()?;
        std::fs::create_dir_all(&cache_dir)?;

        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(db_path)?;

        let mut cache = CacheDb { conn };
        cache.init_schema()?;

        Ok(cache)
    }

    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut cache = CacheDb { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    fn get_cache_dir() -> Result<PathBuf> {
        if let Some(cache_dir) = dirs::cache_dir() {
            Ok(cache_dir.join("drivetui"))
        } else {
            // Fallback to the temp dir if no cache dir available
            Ok(std::env::temp_dir().join("drivetui-cache"))
        }
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS directory_sizes (
                uuid TEXT PRIMARY KEY,
                size INTEGER NOT NULL
            ) WITHOUT ROWID;

            CREATE TABLE IF NOT EXISTS directory_names (
                uuid TEXT PRIMARY KEY,
                name TEXT NOT NULL
            ) WITHOUT ROWID;

            CREATE TABLE IF NOT EXISTS query_cache (
                query_key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            ) WITHOUT ROWID;
            ",
        )?;

        Ok(())
    }

    // Directory sizes
    pub fn get_directory_size(&self, uuid: &str) -> Result<Option<u64>> {
        let result = self.conn.query_row(
            "SELECT size FROM directory_sizes WHERE uuid = ?1",
            params![uuid],
            |row| row.get::<_, i64>(0),
        );

        match result {
            Ok(size) => Ok(Some(size as u64)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_directory_size(&self, uuid: &str, size: u64) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO directory_sizes (uuid, size) VALUES (?1, ?2)",
            params![uuid, size as i64],
        )?;
        Ok(())
    }

    /// Load every cached directory size (warms the in-memory map at startup)
    pub fn get_all_directory_sizes(&self) -> Result<HashMap<String, u64>> {
        let mut stmt = self.conn.prepare("SELECT uuid, size FROM directory_sizes")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(rows)
    }

    // Directory names (breadcrumb titles)
    pub fn get_directory_name(&self, uuid: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT name FROM directory_names WHERE uuid = ?1",
            params![uuid],
            |row| row.get(0),
        );

        match result {
            Ok(name) => Ok(Some(name)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_directory_name(&self, uuid: &str, name: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO directory_names (uuid, name) VALUES (?1, ?2)",
            params![uuid, name],
        )?;
        Ok(())
    }

    /// Record names for a whole listing in one transaction
    pub fn save_directory_names<'a, I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO directory_names (uuid, name) VALUES (?1, ?2)",
            )?;
            for (uuid, name) in entries {
                stmt.execute(params![uuid, name])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    // Query payloads
    pub fn get_query<T: DeserializeOwned>(&self, query_key: &str) -> Result<Option<(T, u64)>> {
        let result = self.conn.query_row(
            "SELECT payload, updated_at FROM query_cache WHERE query_key = ?1",
            params![query_key],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        );

        match result {
            Ok((payload, updated_at)) => {
                let data = serde_json::from_str(&payload)
                    .with_context(|| format!("Corrupt cached payload for {}", query_key))?;
                Ok(Some((data, updated_at as u64)))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_query<T: Serialize>(&self, query_key: &str, data: &T, updated_at: u64) -> Result<()> {
        let payload = serde_json::to_string(data)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO query_cache (query_key, payload, updated_at)
             VALUES (?1, ?2, ?3)",
            params![query_key, payload, updated_at as i64],
        )?;
        Ok(())
    }

    pub fn invalidate_query(&self, query_key: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM query_cache WHERE query_key = ?1",
            params![query_key],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_size_round_trip() {
        let cache = CacheDb::new_in_memory().unwrap();
        assert_eq!(cache.get_directory_size("d1").unwrap(), None);

        cache.save_directory_size("d1", 4096).unwrap();
        assert_eq!(cache.get_directory_size("d1").unwrap(), Some(4096));

        // Overwrite keeps a single row
        cache.save_directory_size("d1", 8192).unwrap();
        assert_eq!(cache.get_directory_size("d1").unwrap(), Some(8192));
        assert_eq!(cache.get_all_directory_sizes().unwrap().len(), 1);
    }

    #[test]
    fn test_directory_names_batch() {
        let cache = CacheDb::new_in_memory().unwrap();
        cache
            .save_directory_names(vec![("d1", "Photos"), ("d2", "Invoices")])
            .unwrap();

        assert_eq!(cache.get_directory_name("d2").unwrap().as_deref(), Some("Invoices"));
        assert_eq!(cache.get_directory_name("d3").unwrap(), None);
    }

    #[test]
    fn test_query_payload_invalidate() {
        let cache = CacheDb::new_in_memory().unwrap();
        cache.save_query("listContacts", &vec!["a".to_string()], 10).unwrap();

        let (data, at): (Vec<String>, u64) = cache.get_query("listContacts").unwrap().unwrap();
        assert_eq!(data, vec!["a".to_string()]);
        assert_eq!(at, 10);

        cache.invalidate_query("listContacts").unwrap();
        assert!(cache.get_query::<Vec<String>>("listContacts").unwrap().is_none());
    }
}
