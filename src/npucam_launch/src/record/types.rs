//! record.json data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure for record.json
///
/// `container`, `load_node` and `lifecycle_node` are part of the format but
/// stay empty: this package starts plain nodes only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordJson {
    pub node: Vec<NodeRecord>,
    pub container: Vec<serde_json::Value>,
    pub load_node: Vec<serde_json::Value>,
    pub lifecycle_node: Vec<String>,
    /// Parameter file contents keyed by path
    pub file_data: BTreeMap<String, String>,
}

impl RecordJson {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One node process as the launcher will spawn it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub executable: String,
    pub package: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub exec_name: Option<String>,
    pub params: Vec<(String, String)>,
    pub params_files: Vec<String>,
    pub remaps: Vec<(String, String)>,
    pub ros_args: Option<Vec<String>>,
    pub args: Option<Vec<String>>,
    pub cmd: Vec<String>,
    pub env: Option<Vec<(String, String)>>,
    pub output: Option<String>,
    pub respawn: Option<bool>,
    pub respawn_delay: Option<f64>,
    pub global_params: Option<Vec<(String, String)>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeRecord {
        NodeRecord {
            executable: "img_pub".to_string(),
            package: Some("npu_camera".to_string()),
            name: Some("img_pub".to_string()),
            namespace: Some("/".to_string()),
            exec_name: Some("img_pub-1".to_string()),
            params: vec![("frame_rate".to_string(), "30".to_string())],
            params_files: vec!["/tmp/cam_param.yaml".to_string()],
            remaps: vec![],
            ros_args: None,
            args: None,
            cmd: vec!["/install/lib/npu_camera/img_pub".to_string()],
            env: None,
            output: Some("screen".to_string()),
            respawn: Some(false),
            respawn_delay: None,
            global_params: None,
        }
    }

    #[test]
    fn test_serialize_empty() {
        let json = RecordJson::default().to_json().unwrap();
        for key in ["node", "container", "load_node", "lifecycle_node", "file_data"] {
            assert!(json.contains(&format!("\"{}\"", key)));
        }
    }

    #[test]
    fn test_tuple_serialization() {
        let json = serde_json::to_string(&node()).unwrap();
        // Tuples serialize as two-element arrays
        assert!(json.contains("[\"frame_rate\",\"30\"]"));
        assert!(json.contains("\"output\":\"screen\""));
        assert!(json.contains("\"respawn_delay\":null"));
    }
}
