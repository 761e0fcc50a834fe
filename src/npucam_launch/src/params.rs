//! Parameter file loading

use crate::error::Result;
use serde_yaml::{Mapping, Value};
use std::{fs, path::Path};

/// Keys under which a ROS 2 parameter file may address every node
const WILDCARD_KEYS: &[&str] = &["/**", "**"];

/// Parsed ROS 2 parameter file
///
/// ```yaml
/// img_pub:
///   ros__parameters:
///     frame_rate: 30
/// ```
#[derive(Debug, Clone)]
pub struct ParamFile {
    content: String,
    yaml: Value,
}

impl ParamFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(content)
    }

    pub fn parse(content: String) -> Result<Self> {
        let yaml: Value = serde_yaml::from_str(&content)?;
        Ok(Self { content, yaml })
    }

    /// Raw file contents
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Flattened parameters that apply to `node_name` in the root namespace.
    /// Wildcard sections come first so node-specific values follow them.
    pub fn node_parameters(&self, node_name: &str) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let Value::Mapping(root) = &self.yaml else {
            return params;
        };

        let absolute = format!("/{}", node_name);
        let keys = WILDCARD_KEYS
            .iter()
            .copied()
            .chain([node_name, absolute.as_str()]);

        for key in keys {
            if let Some(Value::Mapping(section)) = root.get(key) {
                if let Some(Value::Mapping(ros_params)) = section.get("ros__parameters") {
                    flatten_params("", ros_params, &mut params);
                }
            }
        }

        params
    }
}

/// Recursively flatten nested parameter maps into dotted names
fn flatten_params(prefix: &str, map: &Mapping, output: &mut Vec<(String, String)>) {
    for (key, value) in map.iter() {
        let Value::String(key_str) = key else {
            continue;
        };
        let full_key = if prefix.is_empty() {
            key_str.clone()
        } else {
            format!("{}.{}", prefix, key_str)
        };

        push_value(full_key, value, output);
    }
}

fn push_value(full_key: String, value: &Value, output: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(nested) => flatten_params(&full_key, nested, output),
        Value::String(s) => output.push((full_key, s.clone())),
        Value::Number(n) => output.push((full_key, n.to_string())),
        Value::Bool(b) => output.push((full_key, b.to_string())),
        Value::Sequence(seq) => {
            // Arrays are passed on as JSON
            let json = serde_json::to_string(seq).unwrap_or_else(|_| format!("{:?}", seq));
            output.push((full_key, json));
        }
        Value::Null => output.push((full_key, "null".to_string())),
        // Tags carry no meaning for ROS parameters
        Value::Tagged(tagged) => push_value(full_key, &tagged.value, output),
    }
}
