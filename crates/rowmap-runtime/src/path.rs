//! Attribute path resolution
//!
//! Writes and reads dotted paths such as `patient.name.given` on output
//! targets. Map-like targets store the whole path as one flat key.
//! Attribute-style targets are navigated segment by segment; intermediate
//! objects are never created, so a rule writing below an object that does
//! not exist yet is logged and skipped.

use indexmap::IndexMap;
use rowmap_core::{AttributePath, OutputTarget, Value};
use tracing::{debug, error, warn};

/// Write `value` at `path`.
///
/// Returns `false` when an intermediate segment is missing, null or not an
/// object; the problem is logged and the target is left untouched. The final
/// segment is always overwritten, whatever it held before.
pub fn set_path<T: OutputTarget + ?Sized>(target: &mut T, path: &AttributePath, value: Value) -> bool {
    if target.is_map_like() || !path.is_nested() {
        target.insert(path.as_str(), value);
        return true;
    }

    let parents = path.parents();
    let mut slot = match target.get_mut(path.head()) {
        Some(slot) => slot,
        None => {
            error!(path = %path, missing = path.head(), "Cannot set attribute: intermediate attribute does not exist");
            return false;
        }
    };

    for depth in 1..parents.len() {
        let Some(members) = container(slot, path, depth) else {
            return false;
        };
        slot = match members.get_mut(&parents[depth]) {
            Some(next) => next,
            None => {
                error!(
                    path = %path,
                    missing = %path.segments()[..=depth].join("."),
                    "Cannot set attribute: intermediate attribute does not exist"
                );
                return false;
            }
        };
    }

    match container(slot, path, parents.len()) {
        Some(members) => {
            debug!(path = %path, "Set attribute");
            members.insert(path.leaf().to_string(), value);
            true
        }
        None => false,
    }
}

/// Member map of the intermediate at `segments[..depth]`
fn container<'a>(
    node: &'a mut Value,
    path: &AttributePath,
    depth: usize,
) -> Option<&'a mut IndexMap<String, Value>> {
    if node.is_null() {
        warn!(
            path = %path,
            intermediate = %path.segments()[..depth].join("."),
            "Intermediate object is null; value not set"
        );
        return None;
    }

    let type_name = node.type_name();
    match node.members_mut() {
        Some(members) => Some(members),
        None => {
            error!(
                path = %path,
                intermediate = %path.segments()[..depth].join("."),
                found = type_name,
                "Cannot set attribute on a non-object value"
            );
            None
        }
    }
}

/// Read the value at a dotted path, `None` on any miss
pub fn get_path<'a, T: OutputTarget + ?Sized>(target: &'a T, path: &str) -> Option<&'a Value> {
    if target.is_map_like() {
        return target.get(path);
    }

    let mut segments = path.split('.');
    let mut current = target.get(segments.next()?)?;
    for segment in segments {
        current = current.member(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::{ModelClass, ModelInstance, ModelSchema, ScratchRecord};

    fn schema() -> ModelSchema {
        ModelSchema::new()
            .with_class(
                "Record",
                ModelClass::new()
                    .scalar("name")
                    .eager_nested("header", "Header")
                    .nested("patient", "Patient"),
            )
            .with_class("Header", ModelClass::new().scalar("title").eager_nested("code", "Code"))
            .with_class("Code", ModelClass::new().scalar("value"))
            .with_class("Patient", ModelClass::new().scalar("id"))
    }

    fn instance() -> ModelInstance {
        schema().new_instance("Record").unwrap()
    }

    fn path(raw: &str) -> AttributePath {
        AttributePath::parse(raw).unwrap()
    }

    #[test]
    fn test_set_top_level() {
        let mut target = instance();
        assert!(set_path(&mut target, &path("name"), Value::from("Alice")));
        assert_eq!(target.field("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn test_set_nested() {
        let mut target = instance();
        assert!(set_path(&mut target, &path("header.code.value"), Value::from("X1")));
        assert_eq!(target.lookup("header.code.value"), Some(&Value::from("X1")));
        assert_eq!(get_path(&target, "header.code.value"), Some(&Value::from("X1")));
    }

    #[test]
    fn test_null_intermediate_is_skipped() {
        let mut target = instance();
        assert!(!set_path(&mut target, &path("patient.id"), Value::from("P1")));
        assert_eq!(target.field("patient"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_intermediate_is_skipped() {
        let mut target = instance();
        assert!(!set_path(&mut target, &path("nowhere.id"), Value::from("P1")));
        assert!(target.field("nowhere").is_none());
    }

    #[test]
    fn test_scalar_intermediate_is_skipped() {
        let mut target = instance();
        set_path(&mut target, &path("name"), Value::from("Alice"));
        assert!(!set_path(&mut target, &path("name.first"), Value::from("A")));
        assert_eq!(target.field("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn test_leaf_overwrites_any_value() {
        let mut target = instance();
        assert!(set_path(&mut target, &path("header.code"), Value::from("flat")));
        assert_eq!(target.lookup("header.code"), Some(&Value::from("flat")));
    }

    #[test]
    fn test_map_like_uses_flat_keys() {
        let mut scratch = ScratchRecord::new();
        assert!(set_path(&mut scratch, &path("value.code"), Value::from("7")));
        assert_eq!(scratch.entries().get("value.code"), Some(&Value::from("7")));
        assert_eq!(get_path(&scratch, "value.code"), Some(&Value::from("7")));
        assert_eq!(get_path(&scratch, "value"), None);
    }

    #[test]
    fn test_get_path_misses() {
        let target = instance();
        assert_eq!(get_path(&target, "header.missing"), None);
        assert_eq!(get_path(&target, "patient.id"), None);
        assert_eq!(get_path(&target, "absent"), None);
    }
}
