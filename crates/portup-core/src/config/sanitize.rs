//! Pre-parse filter: strip unknown properties, then back-fill missing ones.
//!
//! Runs on the raw JSON value before typed decoding. Values of the wrong type are left in
//! place so that decoding reports them as schema errors.

use serde_json::{Map, Value};

use super::document::ConfigDefaults;

const TOP_LEVEL_KEYS: [&str; 3] = ["Paths", "Programs", "Metadata"];
const PATH_KEYS: [&str; 4] = ["dow_pth", "ext_pth", "ins_pth", "lnk_pth"];
const PROGRAM_KEYS: [&str; 1] = ["url"];
const RECORD_KEYS: [&str; 3] = ["Hash", "ETag", "LMod"];

/// Strips unknown properties at every object level and inserts missing ones.
///
/// A non-object document is returned unchanged.
pub fn sanitize_document(doc: Value, defaults: &ConfigDefaults) -> Value {
    let mut root = match doc {
        Value::Object(map) => map,
        other => {
            tracing::warn!("config document is a {}, not an object", kind(&other));
            return other;
        }
    };
    retain_known(&mut root, &TOP_LEVEL_KEYS);

    let paths = root
        .entry("Paths")
        .or_insert_with(|| Value::Array(Vec::new()));
    for_each_object(paths, |set| {
        retain_known(set, &PATH_KEYS);
        for key in PATH_KEYS {
            set.entry(key)
                .or_insert_with(|| Value::String(defaults.work_dir_string()));
        }
    });

    let programs = root
        .entry("Programs")
        .or_insert_with(|| Value::Array(Vec::new()));
    for_each_object(programs, |program| {
        retain_known(program, &PROGRAM_KEYS);
        program.entry("url").or_insert(Value::Null);
    });

    let metadata = root
        .entry("Metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(files) = metadata {
        for records in files.values_mut() {
            for_each_object(records, |record| {
                retain_known(record, &RECORD_KEYS);
                for key in RECORD_KEYS {
                    record.entry(key).or_insert(Value::Null);
                }
            });
        }
    }

    Value::Object(root)
}

fn retain_known(map: &mut Map<String, Value>, known: &[&str]) {
    map.retain(|key, _| {
        let keep = known.contains(&key.as_str());
        if !keep {
            tracing::debug!(property = %key, "dropping unknown config property");
        }
        keep
    });
}

/// Applies `f` to every object element of `value` when it is an array.
fn for_each_object(value: &mut Value, mut f: impl FnMut(&mut Map<String, Value>)) {
    if let Value::Array(items) = value {
        for item in items.iter_mut() {
            if let Value::Object(map) = item {
                f(map);
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
