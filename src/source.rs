//! Read-only access to works and firm paperwork.
//!
//! The records store is an external collaborator; the engine only needs the
//! four lookups on [`DataSource`]. [`InMemoryDataSource`] backs tests and the
//! CLI, and can be loaded from a JSON fixture.

use std::path::Path;

use docgen_types::{FirmDocument, Work, WorkId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SourceError;

/// Lookups the engine performs against the records store
pub trait DataSource {
    fn get_work(&self, work_id: WorkId) -> Result<Option<Work>, SourceError>;

    /// Firms registered against a work, in registration order
    fn get_firm_names(&self, work_id: WorkId) -> Result<Vec<String>, SourceError>;

    fn get_firm_document(
        &self,
        work_id: WorkId,
        firm_name: &str,
    ) -> Result<Option<FirmDocument>, SourceError>;

    fn get_all_firm_documents(&self, work_id: WorkId) -> Result<Vec<FirmDocument>, SourceError>;
}

/// A firm quoting for a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmRegistration {
    pub work_id: WorkId,
    pub firm_name: String,
}

/// In-memory records, in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDataSource {
    #[serde(default)]
    pub works: Vec<Work>,
    #[serde(default)]
    pub firms: Vec<FirmRegistration>,
    #[serde(default)]
    pub documents: Vec<FirmDocument>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from a JSON fixture
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::FixtureRead {
            path: path.to_path_buf(),
            source,
        })?;
        let source: Self =
            serde_json::from_str(&content).map_err(|source| SourceError::FixtureMalformed {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            works = source.works.len(),
            firms = source.firms.len(),
            documents = source.documents.len(),
            "Loaded data fixture from {}",
            path.display()
        );
        Ok(source)
    }

    pub fn add_work(&mut self, work: Work) -> &mut Self {
        self.works.push(work);
        self
    }

    /// Register a firm against a work; repeated registrations are ignored
    pub fn register_firm(&mut self, work_id: WorkId, firm_name: impl Into<String>) -> &mut Self {
        let firm_name = firm_name.into();
        let exists = self
            .firms
            .iter()
            .any(|f| f.work_id == work_id && f.firm_name == firm_name);
        if !exists {
            self.firms.push(FirmRegistration { work_id, firm_name });
        }
        self
    }

    /// Add or replace the paperwork row for `(work_id, firm_name)`
    pub fn upsert_document(&mut self, document: FirmDocument) -> &mut Self {
        self.documents
            .retain(|d| !(d.work_id == document.work_id && d.firm_name == document.firm_name));
        self.documents.push(document);
        self
    }
}

impl DataSource for InMemoryDataSource {
    fn get_work(&self, work_id: WorkId) -> Result<Option<Work>, SourceError> {
        Ok(self.works.iter().find(|w| w.id == work_id).cloned())
    }

    fn get_firm_names(&self, work_id: WorkId) -> Result<Vec<String>, SourceError> {
        Ok(self
            .firms
            .iter()
            .filter(|f| f.work_id == work_id)
            .map(|f| f.firm_name.clone())
            .collect())
    }

    fn get_firm_document(
        &self,
        work_id: WorkId,
        firm_name: &str,
    ) -> Result<Option<FirmDocument>, SourceError> {
        Ok(self
            .documents
            .iter()
            .find(|d| d.work_id == work_id && d.firm_name == firm_name)
            .cloned())
    }

    fn get_all_firm_documents(&self, work_id: WorkId) -> Result<Vec<FirmDocument>, SourceError> {
        Ok(self
            .documents
            .iter()
            .filter(|d| d.work_id == work_id)
            .cloned()
            .collect())
    }
}
