//! Field-merge primitive.

use metafill_model::field::{ALLOWED_KEY, ANYOF_KEY, TYPE_KEY};
use metafill_model::{FieldDefinition, FieldDictionary};

/// Merges `add` over `base`, returning a fresh dictionary.
///
/// Fields only in `add` are copied verbatim; fields in both are merged
/// attribute-wise with `add` winning. No field is ever dropped.
pub fn merge_fields(base: &FieldDictionary, add: &FieldDictionary) -> FieldDictionary {
    let mut merged = base.clone();
    for (name, definition) in add {
        match merged.get_mut(name) {
            Some(existing) => overlay_definition(existing, definition),
            None => {
                merged.insert(name.clone(), definition.clone());
            }
        }
    }
    merged
}

/// Attribute-wise merge of two definitions of the same field.
pub fn merge_definition(base: &FieldDefinition, add: &FieldDefinition) -> FieldDefinition {
    let mut merged = base.clone();
    overlay_definition(&mut merged, add);
    merged
}

// `allowed` and `anyof` are exclusive, and `anyof` excludes `type`.
fn overlay_definition(target: &mut FieldDefinition, add: &FieldDefinition) {
    if add.contains(ALLOWED_KEY) {
        target.remove(ANYOF_KEY);
    }
    if add.contains(ANYOF_KEY) {
        target.remove(ALLOWED_KEY);
        target.remove(TYPE_KEY);
    }
    for (key, value) in add.iter() {
        target.insert(key.clone(), value.clone());
    }
}
