//! Command-line and record generation

use crate::{
    description::{LaunchDescription, ParameterSource, ProcessLaunchRequest},
    error::Result,
    package::{path_into_string, PackageResolver},
    params::ParamFile,
    record::types::{NodeRecord, RecordJson},
};
use std::collections::BTreeMap;

/// Translate a launch description into record.json form
pub fn generate_record(
    description: &LaunchDescription,
    resolver: &dyn PackageResolver,
) -> Result<RecordJson> {
    let mut record = RecordJson::default();
    let mut param_files: BTreeMap<String, Option<ParamFile>> = BTreeMap::new();

    for (index, node) in description.nodes().enumerate() {
        for source in &node.parameters {
            param_files
                .entry(source.as_str().to_string())
                .or_insert_with(|| load_param_file(source));
        }

        let exec_path =
            path_into_string(resolver.executable_path(&node.package, &node.executable)?)?;

        let params = node
            .parameters
            .iter()
            .filter_map(|source| param_files.get(source.as_str()).and_then(Option::as_ref))
            .flat_map(|file| file.node_parameters(&node.name))
            .collect();

        record.node.push(NodeRecord {
            executable: node.executable.clone(),
            package: Some(node.package.clone()),
            name: Some(node.name.clone()),
            namespace: Some("/".to_string()),
            // Process names are numbered across the whole launch
            exec_name: Some(format!("{}-{}", node.executable, index + 1)),
            params,
            params_files: node
                .parameters
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            remaps: Vec::new(),
            ros_args: None,
            args: None,
            cmd: generate_node_command(node, exec_path),
            env: None,
            output: Some(node.output_sink.to_string()),
            respawn: Some(false),
            respawn_delay: None,
            global_params: None,
        });
    }

    record.file_data = param_files
        .into_iter()
        .filter_map(|(path, file)| file.map(|f| (path, f.content().to_string())))
        .collect();

    log::info!(
        "Generated record: {} nodes, {} parameter files",
        record.node.len(),
        record.file_data.len()
    );
    Ok(record)
}

/// `<exe> --ros-args -r __node:=<name> -r __ns:=/ --params-file <path>...`
pub fn generate_node_command(node: &ProcessLaunchRequest, exec_path: String) -> Vec<String> {
    let mut cmd = vec![
        exec_path,
        "--ros-args".to_string(),
        "-r".to_string(),
        format!("__node:={}", node.name),
        "-r".to_string(),
        "__ns:=/".to_string(),
    ];

    for source in &node.parameters {
        cmd.push("--params-file".to_string());
        cmd.push(source.as_str().to_string());
    }

    cmd
}

fn load_param_file(source: &ParameterSource) -> Option<ParamFile> {
    match ParamFile::load(source.as_path()) {
        Ok(file) => Some(file),
        Err(e) => {
            log::warn!("Failed to load parameter file {}: {}", source, e);
            None
        }
    }
}
