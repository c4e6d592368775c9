use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// List the keys present in the default configuration but absent from the
/// file at `path`, as dotted paths (e.g. `buckets.negative_policy`).
/// Missing keys are not an error: serde fills them with defaults.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let user: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

    let defaults =
        serde_yaml::to_value(Config::default()).map_err(|e| AppError::Config(e.to_string()))?;

    let mut missing = Vec::new();
    if let (Some(def_map), Some(user_map)) = (defaults.as_mapping(), user.as_mapping()) {
        collect_missing(def_map, user_map, "", &mut missing);
    } else if let Some(def_map) = defaults.as_mapping() {
        // empty or scalar file: everything is missing
        collect_missing(def_map, &Mapping::new(), "", &mut missing);
    }

    Ok(missing)
}

fn collect_missing(defaults: &Mapping, user: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, def_val) in defaults {
        let Some(name) = key.as_str() else { continue };
        let dotted = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match user.get(key) {
            None => out.push(dotted),
            Some(user_val) => {
                if let (Some(d), Some(u)) = (def_val.as_mapping(), user_val.as_mapping()) {
                    collect_missing(d, u, &dotted, out);
                }
            }
        }
    }
}
