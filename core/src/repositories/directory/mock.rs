//! Mock implementation of Directory for testing

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use fr_shared::utils::email::normalize_email;
use fr_shared::utils::phone::normalize_phone;

use crate::domain::entities::contact::DirectoryUser;
use crate::errors::DomainError;

use super::trait_::Directory;

/// In-memory user directory for testing
pub struct MockDirectory {
    users: Arc<RwLock<Vec<DirectoryUser>>>,
    memberships: Arc<RwLock<Vec<(Uuid, Uuid)>>>,
    should_fail: bool,
}

impl MockDirectory {
    /// Create an empty mock directory
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(Vec::new())),
            memberships: Arc::new(RwLock::new(Vec::new())),
            should_fail: false,
        }
    }

    /// Create a mock directory pre-populated with users
    pub fn with_users(users: Vec<DirectoryUser>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            memberships: Arc::new(RwLock::new(Vec::new())),
            should_fail: false,
        }
    }

    /// Create a mock directory whose every call fails
    pub fn failing() -> Self {
        Self {
            users: Arc::new(RwLock::new(Vec::new())),
            memberships: Arc::new(RwLock::new(Vec::new())),
            should_fail: true,
        }
    }

    /// Snapshot of recorded memberships as `(group_id, user_id)` pairs
    pub async fn memberships(&self) -> Vec<(Uuid, Uuid)> {
        self.memberships.read().await.clone()
    }

    fn unavailable() -> DomainError {
        DomainError::DirectoryUnavailable {
            message: "mock directory failure".to_string(),
        }
    }
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Directory for MockDirectory {
    async fn find_by_emails_or_phones(
        &self,
        emails: &BTreeSet<String>,
        phones: &BTreeSet<String>,
    ) -> Result<Vec<DirectoryUser>, DomainError> {
        if self.should_fail {
            return Err(Self::unavailable());
        }
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| {
                emails.contains(&normalize_email(&u.email))
                    || u.phone
                        .as_deref()
                        .map(normalize_phone)
                        .is_some_and(|p| phones.contains(&p))
            })
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, DomainError> {
        if self.should_fail {
            return Err(Self::unavailable());
        }
        let needle = normalize_email(email);
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| normalize_email(&u.email) == needle)
            .cloned())
    }

    async fn insert_memberships(
        &self,
        group_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(Self::unavailable());
        }
        let mut memberships = self.memberships.write().await;

        // Duplicate anywhere in the batch fails the whole batch
        for user_id in user_ids {
            if memberships.contains(&(group_id, *user_id)) {
                return Err(DomainError::Conflict);
            }
        }
        for user_id in user_ids {
            memberships.push((group_id, *user_id));
        }
        Ok(())
    }
}
