//! Input record type

use super::Value;
use indexmap::IndexMap;

/// One flat input row: field name to scalar value.
///
/// Column order is kept so diagnostics and raw-input backrefs read like the
/// source row.
pub type Record = IndexMap<String, Value>;

/// Build a record from string pairs (handy for tests and small adapters)
pub fn record_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Record
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_pairs() {
        let record = record_from_pairs([("gender", "M"), ("age", "42")]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("gender"), Some(&Value::from("M")));
        assert_eq!(record.get_index(1).map(|(k, _)| k.as_str()), Some("age"));
    }
}
