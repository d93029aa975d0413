//! Contact reconciliation service implementation

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing;
use uuid::Uuid;

use fr_shared::utils::email::normalize_email;
use fr_shared::utils::phone::normalize_phone;

use crate::domain::entities::contact::{ContactIdentity, DirectoryUser, MatchResult};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::directory::Directory;

/// Service reconciling imported contacts against the user directory.
///
/// Reconciliation issues a single batched directory query per pass, so the
/// cost is O(contacts + matches) rather than one lookup per contact.
pub struct ContactReconciler<D: Directory> {
    directory: Arc<D>,
}

impl<D: Directory> ContactReconciler<D> {
    /// Create a new reconciler over a directory capability
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Match each contact against the registered-user directory.
    ///
    /// Returns one [`MatchResult`] per input contact, preserving input
    /// order. A contact matches when any of its normalized emails equals a
    /// user's normalized email, or failing that, any of its normalized
    /// phones equals a user's normalized phone. Ambiguity is resolved
    /// deterministically: an email match takes priority over a phone match,
    /// and within a channel the lowest user id wins.
    ///
    /// # Errors
    ///
    /// * [`DomainError::DirectoryUnavailable`] - the directory query failed
    pub async fn reconcile(
        &self,
        contacts: &[ContactIdentity],
    ) -> DomainResult<Vec<MatchResult>> {
        let mut emails: BTreeSet<String> = BTreeSet::new();
        let mut phones: BTreeSet<String> = BTreeSet::new();
        for contact in contacts {
            emails.extend(contact.normalized_emails());
            phones.extend(contact.normalized_phones());
        }

        let users = if emails.is_empty() && phones.is_empty() {
            Vec::new()
        } else {
            self.directory
                .find_by_emails_or_phones(&emails, &phones)
                .await?
        };

        // Dedupe by id; ascending order makes the lowest id win every
        // first-insert below
        let mut users = users;
        users.sort_by_key(|u| u.id);
        users.dedup_by_key(|u| u.id);

        let mut by_email: HashMap<String, &DirectoryUser> = HashMap::new();
        let mut by_phone: HashMap<String, &DirectoryUser> = HashMap::new();
        for user in &users {
            by_email.entry(normalize_email(&user.email)).or_insert(user);
            if let Some(phone) = user.phone.as_deref() {
                let normalized = normalize_phone(phone);
                if !normalized.is_empty() {
                    by_phone.entry(normalized).or_insert(user);
                }
            }
        }

        tracing::debug!(
            contacts = contacts.len(),
            directory_matches = users.len(),
            event = "contacts_reconciled",
            "Reconciled address book against directory"
        );

        Ok(contacts
            .iter()
            .map(|contact| {
                let matched = contact
                    .normalized_emails()
                    .iter()
                    .find_map(|e| by_email.get(e.as_str()))
                    .or_else(|| {
                        contact
                            .normalized_phones()
                            .iter()
                            .find_map(|p| by_phone.get(p.as_str()))
                    })
                    .copied();

                match matched {
                    Some(user) => MatchResult::matched(contact.clone(), user),
                    None => MatchResult::unmatched(contact.clone()),
                }
            })
            .collect())
    }

    /// Add the selected, registered contacts to a group as a single batch.
    ///
    /// # Errors
    ///
    /// * [`DomainError::InvalidInput`] - empty selection, rejected before
    ///   any directory call
    /// * [`DomainError::PartialSelectionInvalid`] - an unregistered contact
    ///   in the selection
    /// * [`DomainError::Conflict`] - a membership already existed; the batch
    ///   is reported failed as a whole
    /// * [`DomainError::DirectoryUnavailable`] - the directory write failed
    pub async fn materialize_group_invites(
        &self,
        group_id: Uuid,
        selected: &[MatchResult],
    ) -> DomainResult<usize> {
        if selected.is_empty() {
            return Err(DomainError::InvalidInput {
                message: "no contacts selected".to_string(),
            });
        }

        let mut user_ids = Vec::with_capacity(selected.len());
        for result in selected {
            ensure_selectable(result)?;
            let user_id =
                result
                    .matched_user_id
                    .ok_or_else(|| DomainError::PartialSelectionInvalid {
                        contact_id: result.contact.id.clone(),
                    })?;
            user_ids.push(user_id);
        }

        self.directory
            .insert_memberships(group_id, &user_ids)
            .await?;

        tracing::info!(
            group_id = %group_id,
            members = user_ids.len(),
            event = "group_invites_materialized",
            "Added contacts to group"
        );

        Ok(user_ids.len())
    }
}

/// Reject selection of a contact that did not match a registered user, so
/// the caller can surface feedback instead of a silent no-op.
pub fn ensure_selectable(result: &MatchResult) -> DomainResult<()> {
    if result.is_selectable() {
        Ok(())
    } else {
        Err(DomainError::PartialSelectionInvalid {
            contact_id: result.contact.id.clone(),
        })
    }
}

/// Case-insensitive substring filter on display names. Pure, no I/O.
///
/// The query is trimmed first, so an empty or whitespace-only query returns
/// the input unchanged and in order; literal whitespace never filters.
pub fn filter_by_name(contacts: &[ContactIdentity], query: &str) -> Vec<ContactIdentity> {
    let query = query.trim();
    if query.is_empty() {
        return contacts.to_vec();
    }
    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|c| c.display_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable case-insensitive sort by display name, as applied before display.
pub fn sorted_by_display_name(contacts: &[ContactIdentity]) -> Vec<ContactIdentity> {
    let mut sorted = contacts.to_vec();
    sorted.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });
    sorted
}
