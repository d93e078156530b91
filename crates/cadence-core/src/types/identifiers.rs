//! Deterministic record identifiers.
//!
//! Identical inputs must yield identical ids, so result ids are UUID v5
//! over a `kind` namespace label and the identifying parts.

use uuid::Uuid;

/// Build a stable id such as `behavioral-3f2c…` from a kind and name parts.
pub fn deterministic_id<I, S>(kind: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut name = String::from(kind);
    for part in parts {
        name.push('\u{1f}');
        name.push_str(part.as_ref());
    }
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
    format!("{kind}-{}", uuid.simple())
}
