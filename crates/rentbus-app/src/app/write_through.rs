//! Write-through cache over a backend table
//!
//! Every mutation goes to the repository first. The local snapshot is only
//! patched once the backend accepted the write, so a failed write leaves the
//! snapshot exactly as it was and hands the error back to the caller.

use rentbus_domain::repository::{Keyed, RecordRepository};
use rentbus_types::{Error, StoreError, ValidationError};
use thiserror::Error;

/// Errors specific to the admin services
#[derive(Debug, Error)]
pub enum AdminServiceError {
    #[error("Admin login required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend write failed: {0}")]
    Backend(Error),
}

impl From<Error> for AdminServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Unauthorized => AdminServiceError::Unauthorized,
            Error::NotFound(what) => AdminServiceError::NotFound(what),
            Error::Store(StoreError::NotFound { table, id }) => {
                AdminServiceError::NotFound(format!("{} {}", table, id))
            }
            Error::Validation(e) => AdminServiceError::Validation(e),
            other => AdminServiceError::Backend(other),
        }
    }
}

impl From<AdminServiceError> for Error {
    fn from(err: AdminServiceError) -> Self {
        match err {
            AdminServiceError::Unauthorized => Error::Unauthorized,
            AdminServiceError::NotFound(what) => Error::NotFound(what),
            AdminServiceError::Validation(e) => Error::Validation(e),
            AdminServiceError::Backend(e) => e,
        }
    }
}

pub type AdminResult<T> = std::result::Result<T, AdminServiceError>;

/// Cached table snapshot kept in step with its repository
pub struct WriteThroughCache<T, R> {
    repo: R,
    snapshot: Vec<T>,
}

impl<T, R> WriteThroughCache<T, R>
where
    T: Keyed + Clone,
    R: RecordRepository<T>,
{
    /// Wrap a repository with an empty snapshot
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            snapshot: Vec::new(),
        }
    }

    /// Wrap a repository and fetch its rows
    pub fn load(repo: R) -> AdminResult<Self> {
        let mut cache = Self::new(repo);
        cache.refresh()?;
        Ok(cache)
    }

    /// Re-read the whole table
    pub fn refresh(&mut self) -> AdminResult<()> {
        self.snapshot = self.repo.find_all()?;
        tracing::debug!(rows = self.snapshot.len(), "refreshed snapshot");
        Ok(())
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.snapshot.iter().find(|r| r.key() == id)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Insert remotely, then put the record at the head of the snapshot
    pub fn create(&mut self, record: T) -> AdminResult<()> {
        self.repo.insert(&record)?;
        self.snapshot.insert(0, record);
        Ok(())
    }

    /// Update remotely, then replace the cached copy in place
    pub fn update(&mut self, record: T) -> AdminResult<()> {
        self.repo.update(&record)?;
        match self.snapshot.iter_mut().find(|r| r.key() == record.key()) {
            Some(slot) => *slot = record,
            None => self.snapshot.insert(0, record),
        }
        Ok(())
    }

    /// Edit a cached record and write the result through
    pub fn modify(&mut self, id: &str, edit: impl FnOnce(&mut T)) -> AdminResult<T> {
        let mut record = self
            .get(id)
            .cloned()
            .ok_or_else(|| AdminServiceError::NotFound(id.to_string()))?;
        edit(&mut record);
        self.update(record.clone())?;
        Ok(record)
    }

    /// Delete remotely, then drop the cached copy
    pub fn delete(&mut self, id: &str) -> AdminResult<()> {
        self.repo.delete(id)?;
        self.snapshot.retain(|r| r.key() != id);
        Ok(())
    }
}
