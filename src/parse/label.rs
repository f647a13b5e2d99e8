use serde_json::Value;

use super::access::{last_fragment, str_at};

/// Label of a typed feed item (email, phone, address, ...).
///
/// Items carry their category either as a relation URL (`...#home`) or as a
/// free-text `label`. The relation wins when present.
pub fn label_of(item: &Value) -> Option<String> {
    match str_at(item, &["rel"]) {
        Some(rel) => last_fragment(&rel),
        None => str_at(item, &["label"]),
    }
}
