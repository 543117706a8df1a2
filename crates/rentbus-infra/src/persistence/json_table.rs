//! A backend table persisted as a JSON array on disk

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use rentbus_domain::repository::Keyed;
use rentbus_types::{Result, StoreError};

/// Rows of one table, loaded on open and rewritten after every mutation
pub struct JsonTable<R> {
    name: &'static str,
    path: PathBuf,
    rows: RefCell<Vec<R>>,
}

impl<R> JsonTable<R>
where
    R: Serialize + DeserializeOwned + Clone,
{
    /// Create or load `<store_dir>/<name>.json`
    pub fn open(store_dir: &Path, name: &'static str) -> Result<Self> {
        fs::create_dir_all(store_dir)?;
        let path = store_dir.join(format!("{}.json", name));

        let rows: Vec<R> = if path.exists() {
            let file = File::open(&path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)?
        } else {
            Vec::new()
        };
        tracing::debug!(table = name, rows = rows.len(), "opened table");

        Ok(Self {
            name,
            path,
            rows: RefCell::new(rows),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of every row in storage order
    pub fn snapshot(&self) -> Vec<R> {
        self.rows.borrow().clone()
    }

    /// Rows matching a predicate, storage order
    pub fn select(&self, pred: impl Fn(&R) -> bool) -> Vec<R> {
        self.rows.borrow().iter().filter(|r| pred(r)).cloned().collect()
    }

    /// Run a mutation on a copy of the rows; the copy replaces the loaded
    /// rows only once it is on disk
    pub fn mutate<T>(&self, f: impl FnOnce(&mut Vec<R>) -> Result<T>) -> Result<T> {
        let mut next = self.snapshot();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *self.rows.borrow_mut() = next;
        Ok(out)
    }

    /// Write to a sibling temp file, then rename over the table
    fn persist(&self, rows: &[R]) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writer.flush()?;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl<R> JsonTable<R>
where
    R: Keyed + Serialize + DeserializeOwned + Clone,
{
    pub fn get(&self, id: &str) -> Option<R> {
        self.rows.borrow().iter().find(|r| r.key() == id).cloned()
    }

    /// Append a row; the key must be unused
    pub fn insert(&self, row: R) -> Result<()> {
        let name = self.name;
        self.mutate(|rows| {
            if rows.iter().any(|r| r.key() == row.key()) {
                return Err(StoreError::Duplicate {
                    table: name,
                    id: row.key().to_string(),
                }
                .into());
            }
            tracing::info!(table = name, id = row.key(), "insert");
            rows.push(row);
            Ok(())
        })
    }

    /// Replace the row with the same key in place
    pub fn replace(&self, row: R) -> Result<()> {
        let name = self.name;
        self.mutate(|rows| {
            let slot = rows
                .iter_mut()
                .find(|r| r.key() == row.key())
                .ok_or_else(|| StoreError::NotFound {
                    table: name,
                    id: row.key().to_string(),
                })?;
            tracing::info!(table = name, id = row.key(), "update");
            *slot = row;
            Ok(())
        })
    }

    /// Edit the row with the given key in place
    pub fn modify<T>(&self, id: &str, f: impl FnOnce(&mut R) -> Result<T>) -> Result<T> {
        let name = self.name;
        self.mutate(|rows| {
            let slot = rows
                .iter_mut()
                .find(|r| r.key() == id)
                .ok_or_else(|| StoreError::NotFound {
                    table: name,
                    id: id.to_string(),
                })?;
            tracing::info!(table = name, id, "update");
            f(slot)
        })
    }

    /// Remove and return the row with the given key
    pub fn remove(&self, id: &str) -> Result<R> {
        let name = self.name;
        self.mutate(|rows| {
            let index = rows
                .iter()
                .position(|r| r.key() == id)
                .ok_or_else(|| StoreError::NotFound {
                    table: name,
                    id: id.to_string(),
                })?;
            tracing::info!(table = name, id, "delete");
            Ok(rows.remove(index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbus_types::{Category, Error};
    use tempfile::TempDir;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
        }
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let table = JsonTable::<Category>::open(dir.path(), "blog_categories").unwrap();
            table.insert(category("c1", "Travel Tips")).unwrap();
            table.insert(category("c2", "Bus Reviews")).unwrap();
        }

        let table = JsonTable::<Category>::open(dir.path(), "blog_categories").unwrap();
        let names: Vec<_> = table.snapshot().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Travel Tips", "Bus Reviews"]);
        assert!(table.path().ends_with("blog_categories.json"));
    }

    #[test]
    fn test_duplicate_and_missing_keys() {
        let dir = TempDir::new().unwrap();
        let table = JsonTable::<Category>::open(dir.path(), "blog_categories").unwrap();
        table.insert(category("c1", "News")).unwrap();

        assert!(matches!(
            table.insert(category("c1", "Other")),
            Err(Error::Store(StoreError::Duplicate { .. }))
        ));
        assert!(matches!(
            table.remove("nope"),
            Err(Error::Store(StoreError::NotFound { .. }))
        ));
        assert_eq!(table.get("c1").map(|c| c.name).as_deref(), Some("News"));
    }

    #[test]
    fn test_failed_mutation_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let table = JsonTable::<Category>::open(dir.path(), "blog_categories").unwrap();
        table.insert(category("c1", "News")).unwrap();
        let before = std::fs::read_to_string(table.path()).unwrap();

        let _ = table.replace(category("c9", "Ghost"));

        assert_eq!(std::fs::read_to_string(table.path()).unwrap(), before);
    }

    #[test]
    fn test_failed_write_keeps_rows_unchanged() {
        let dir = TempDir::new().unwrap();
        let table = JsonTable::<Category>::open(dir.path(), "blog_categories").unwrap();
        table.insert(category("c1", "News")).unwrap();

        // A directory in place of the table file makes every write fail
        std::fs::remove_file(table.path()).unwrap();
        std::fs::create_dir(table.path()).unwrap();

        assert!(table.insert(category("c2", "Guides")).is_err());
        assert!(table.get("c2").is_none());
        assert!(table.remove("c1").is_err());
        assert_eq!(table.get("c1").map(|c| c.name).as_deref(), Some("News"));
        assert!(table
            .modify("c1", |c| {
                c.name = "Renamed".to_string();
                Ok(())
            })
            .is_err());
        assert_eq!(table.snapshot().len(), 1);
        assert_eq!(table.snapshot()[0].name, "News");
        assert!(!dir.path().join("blog_categories.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_table_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("blog_tags.json"), "{not json").unwrap();
        assert!(JsonTable::<Category>::open(dir.path(), "blog_tags").is_err());
    }
}
