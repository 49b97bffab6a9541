//! Per-call log record and default-field merge

use super::fields::Fields;
use std::collections::BTreeMap;

/// Prefix given to a base entry displaced by a default of the same name
pub const DEFAULTS_PREFIX: &str = "defaults.";

/// Merged string mapping handed to a formatter. Built fresh for every
/// dispatch and dropped when the dispatch ends.
pub type Record = BTreeMap<String, String>;

/// Build the base record (`time`, `level`, `msg`) for one dispatch
pub fn base_record(time: String, level: &str, msg: &str) -> Record {
    let mut record = Record::new();
    record.insert("time".to_string(), time);
    record.insert("level".to_string(), level.to_string());
    record.insert("msg".to_string(), msg.to_string());
    record
}

/// Merge default fields into a base record.
///
/// A default whose key already exists in the base takes the original key;
/// the displaced base value moves to `defaults.<key>`. Other defaults are
/// inserted as-is. Must be called once per freshly built base record.
pub fn merge_defaults(mut base: Record, defaults: &Fields) -> Record {
    for (key, value) in defaults {
        if let Some(existing) = base.remove(key) {
            base.insert(format!("{}{}", DEFAULTS_PREFIX, key), existing);
        }
        base.insert(key.clone(), value.to_string());
    }
    base
}
