//! Code store trait defining the interface for verification code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Persistence capability for verification code records.
///
/// The store is append-only from the core's perspective: records are inserted
/// on issuance and mutated exactly once when redeemed. Retention and cleanup
/// of stale records belong to the hosting application.
///
/// # Concurrency contract
///
/// [`mark_used`](CodeStore::mark_used) must behave as a compare-and-set on
/// the `used` flag: of two concurrent calls for the same record id, exactly
/// one may succeed and the other must fail with [`DomainError::Conflict`].
/// This is what makes redemption race-safe without core-side locking.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Insert a new code record. Never overwrites or deletes earlier records
    /// for the same destination.
    ///
    /// # Errors
    /// * [`DomainError::StoreUnavailable`] - the backing store failed
    async fn insert(&self, record: &VerificationCode) -> Result<(), DomainError>;

    /// Find the most recently issued record for `destination` that is unused
    /// and unexpired as of `now`, or `None`.
    ///
    /// Implementations must order by issuance time descending so redemption
    /// always observes the latest code; earlier codes for the same
    /// destination are thereby superseded without being touched.
    async fn find_latest_active(
        &self,
        destination: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Atomically flip `used` from false to true on the record with `id`.
    ///
    /// # Errors
    /// * [`DomainError::Conflict`] - the record was already used (lost race)
    /// * [`DomainError::StoreUnavailable`] - the backing store failed
    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError>;
}
