//! Swap file names inside content blocks for resolved assets
//!
//! Dynamic-zone blocks are JSON objects tagged by `__component`. Media and
//! slider blocks reference files by name; every other block passes through.

use serde_json::Value;

use crate::errors::{Result, SeedError};
use crate::seed::file_resolver::FileResolver;

pub const COMPONENT_KEY: &str = "__component";
pub const MEDIA_COMPONENT: &str = "shared.media";
pub const SLIDER_COMPONENT: &str = "shared.slider";

/// Return a rewritten copy of `blocks`; the input is left untouched
///
/// # Errors
///
/// `InvalidInput` for a media block without a string `file` or a slider
/// without a string array `files`; file resolution failures propagate.
pub fn rewrite_blocks(files: &mut FileResolver<'_>, blocks: &[Value]) -> Result<Vec<Value>> {
    let mut rewritten = Vec::with_capacity(blocks.len());
    for block in blocks {
        let component = block.get(COMPONENT_KEY).and_then(Value::as_str);
        let updated = match component {
            Some(MEDIA_COMPONENT) => {
                let name = block
                    .get("file")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("file", "media block needs a file name"))?;
                with_field(block, "file", files.resolve(&[name])?.to_value()?)
            }
            Some(SLIDER_COMPONENT) => {
                let names = string_list(block.get("files"))
                    .ok_or_else(|| invalid("files", "slider block needs a list of file names"))?;
                with_field(block, "files", files.resolve(&names)?.to_value()?)
            }
            _ => block.clone(),
        };
        rewritten.push(updated);
    }
    Ok(rewritten)
}

fn with_field(block: &Value, field: &str, value: Value) -> Value {
    let mut copy = block.clone();
    if let Some(map) = copy.as_object_mut() {
        map.insert(field.to_string(), value);
    }
    copy
}

fn string_list(value: Option<&Value>) -> Option<Vec<&str>> {
    value?.as_array()?.iter().map(Value::as_str).collect()
}

fn invalid(field: &str, reason: &str) -> crate::errors::ExError {
    SeedError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
