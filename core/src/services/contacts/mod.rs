//! Contact reconciliation module
//!
//! Matches a device address book against the registered-user directory and
//! materializes group invitations for selected, registered contacts.

mod service;


pub use service::{ensure_selectable, filter_by_name, sorted_by_display_name, ContactReconciler};
