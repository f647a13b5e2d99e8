use std::collections::HashSet;

use crate::model::Contact;

/// Keeps the first contact for each dedup key, preserving order.
///
/// Contacts without any key are kept as they are.
pub fn dedup_contacts(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut seen: HashSet<String> = HashSet::with_capacity(contacts.len());
    contacts
        .into_iter()
        .filter(|contact| match contact.dedup_key() {
            Some(key) => seen.insert(key.to_string()),
            None => true,
        })
        .collect()
}
