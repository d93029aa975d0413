//! Mock implementation of CodeStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::trait_::CodeStore;

/// In-memory code store for testing.
///
/// Records are kept in insertion order; `find_latest_active` prefers the
/// later insertion when two records carry the same issuance timestamp, which
/// matches a store index ordered by (issued_at, insertion sequence).
pub struct MockCodeStore {
    records: Arc<RwLock<Vec<VerificationCode>>>,
    should_fail: bool,
}

impl MockCodeStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            should_fail: false,
        }
    }

    /// Create a mock store whose every call fails with `StoreUnavailable`
    pub fn failing() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            should_fail: true,
        }
    }

    /// Number of stored records, across all destinations
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Snapshot of all records for a destination, in insertion order
    pub async fn records_for(&self, destination: &str) -> Vec<VerificationCode> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.destination == destination)
            .cloned()
            .collect()
    }

    fn unavailable() -> DomainError {
        DomainError::StoreUnavailable {
            message: "mock store failure".to_string(),
        }
    }
}

impl Default for MockCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStore for MockCodeStore {
    async fn insert(&self, record: &VerificationCode) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(Self::unavailable());
        }
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn find_latest_active(
        &self,
        destination: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError> {
        if self.should_fail {
            return Err(Self::unavailable());
        }
        let records = self.records.read().await;
        let mut latest: Option<&VerificationCode> = None;
        for record in records
            .iter()
            .filter(|r| r.destination == destination && r.is_active(now))
        {
            // >= keeps the later insertion on equal timestamps
            if latest.map_or(true, |l| record.issued_at >= l.issued_at) {
                latest = Some(record);
            }
        }
        Ok(latest.cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(Self::unavailable());
        }
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) if !record.used => {
                record.used = true;
                Ok(())
            }
            // Already used or unknown id: the compare-and-set lost
            _ => Err(DomainError::Conflict),
        }
    }
}
