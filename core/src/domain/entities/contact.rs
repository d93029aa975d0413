//! Contact and directory entities for address-book reconciliation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fr_shared::utils::email::normalize_email;
use fr_shared::utils::phone::normalize_phone;

/// A contact imported from the device address book.
///
/// Raw phone numbers and emails are kept as the platform supplied them;
/// normalized forms are derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactIdentity {
    /// Opaque device-local contact identifier
    pub id: String,

    /// Display name, may be empty
    pub display_name: String,

    /// Raw phone numbers in device order
    pub phone_numbers: Vec<String>,

    /// Raw email addresses in device order
    pub emails: Vec<String>,
}

impl ContactIdentity {
    /// Emails normalized for matching (trimmed, lower-cased), empties dropped.
    pub fn normalized_emails(&self) -> Vec<String> {
        self.emails
            .iter()
            .map(|e| normalize_email(e))
            .filter(|e| !e.is_empty())
            .collect()
    }

    /// Phone numbers normalized for matching (digits only), empties dropped.
    pub fn normalized_phones(&self) -> Vec<String> {
        self.phone_numbers
            .iter()
            .map(|p| normalize_phone(p))
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Whether the contact carries at least one usable identity. Contacts
    /// without one are retained in reconciliation output but never matched.
    pub fn has_match_identities(&self) -> bool {
        !self.normalized_emails().is_empty() || !self.normalized_phones().is_empty()
    }
}

/// A registered user as seen in the external directory (read-only here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Directory identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Canonical account email
    pub email: String,

    /// Canonical phone number, if the user registered one
    pub phone: Option<String>,
}

/// Per-contact outcome of reconciling an address book against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The originating contact
    pub contact: ContactIdentity,

    /// Whether the contact matched a registered user
    pub is_registered: bool,

    /// Matched directory user id, present iff `is_registered`
    pub matched_user_id: Option<Uuid>,

    /// Matched directory user name, present iff `is_registered`
    pub matched_user_name: Option<String>,
}

impl MatchResult {
    /// Builds an unmatched result for a contact.
    pub fn unmatched(contact: ContactIdentity) -> Self {
        Self {
            contact,
            is_registered: false,
            matched_user_id: None,
            matched_user_name: None,
        }
    }

    /// Builds a matched result for a contact and directory user.
    pub fn matched(contact: ContactIdentity, user: &DirectoryUser) -> Self {
        Self {
            contact,
            is_registered: true,
            matched_user_id: Some(user.id),
            matched_user_name: Some(user.name.clone()),
        }
    }

    /// A contact may be selected for group invitation only if it matched a
    /// registered user.
    pub fn is_selectable(&self) -> bool {
        self.is_registered
    }
}
