//! Response shaping
//!
//! Entries render flat: `id`, `documentId`, then the stored attributes.
//! Populated relations are arrays of entries under their attribute name.

use axum::Json;
use seedbed_core::model::ContentEntry;
use serde_json::{json, Map, Value};

/// Wrap `data` in the `{ data, meta }` envelope
pub fn transform_response(data: Value) -> Json<Value> {
    Json(json!({ "data": data, "meta": {} }))
}

/// Flat JSON form of one entry
pub fn entry_json(entry: &ContentEntry) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!(entry.row_id));
    object.insert("documentId".to_string(), json!(entry.document_id));
    for (key, value) in &entry.data {
        object.insert(key.clone(), value.clone());
    }
    Value::Object(object)
}

/// Entry JSON with `relations` populated under their attribute names
pub fn populated_entry_json(entry: &ContentEntry, relations: &[(&str, Vec<ContentEntry>)]) -> Value {
    let mut value = entry_json(entry);
    if let Value::Object(object) = &mut value {
        for (attribute, children) in relations {
            object.insert(
                attribute.to_string(),
                Value::Array(children.iter().map(entry_json).collect()),
            );
        }
    }
    value
}
