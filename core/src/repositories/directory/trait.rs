//! Directory trait defining the interface to the registered-user directory.

use async_trait::async_trait;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::entities::contact::DirectoryUser;
use crate::errors::DomainError;

/// Read-mostly capability over the registered-user directory.
///
/// The core reads users for reconciliation and recovery lookups; its only
/// write is the append-only group-membership batch. Atomicity of that batch
/// is the backing store's concern, the core treats it as atomic-or-failed.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Find users whose canonical email is in `emails` or whose phone, after
    /// digits-only normalization, is in `phones`. One batched query per
    /// reconciliation pass; the result may contain a user once per channel it
    /// matched on, callers deduplicate by id.
    async fn find_by_emails_or_phones(
        &self,
        emails: &BTreeSet<String>,
        phones: &BTreeSet<String>,
    ) -> Result<Vec<DirectoryUser>, DomainError>;

    /// Find a registered user by normalized email, used by the password
    /// recovery flow before a code is issued.
    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, DomainError>;

    /// Insert one `(group_id, user_id)` membership per entry as a single
    /// batch.
    ///
    /// # Errors
    /// * [`DomainError::Conflict`] - at least one membership already exists;
    ///   the whole batch is reported failed, no partial success
    /// * [`DomainError::DirectoryUnavailable`] - the directory failed
    async fn insert_memberships(
        &self,
        group_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<(), DomainError>;
}
