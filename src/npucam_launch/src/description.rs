//! Launch description data structures

use crate::error::LaunchError;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

/// Declared launch argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchArgument {
    pub name: String,
    pub default_value: String,
    pub description: String,
}

/// Resolved parameter file handed to a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSource(String);

impl ParameterSource {
    pub(crate) fn new(path: String) -> Self {
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ParameterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a launched process writes its stdout/stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSink {
    #[default]
    Screen,
    Log,
    None,
}

impl OutputSink {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSink::Screen => "screen",
            OutputSink::Log => "log",
            OutputSink::None => "none",
        }
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the host's `output=` spelling. The builder always requests
/// [`OutputSink::Screen`]; this is for embedders that read sinks from their
/// own configuration.
impl FromStr for OutputSink {
    type Err = LaunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "screen" => Ok(OutputSink::Screen),
            "log" => Ok(OutputSink::Log),
            "none" => Ok(OutputSink::None),
            other => Err(LaunchError::InvalidOutputSink(other.to_string())),
        }
    }
}

/// Request for the host to start one node process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessLaunchRequest {
    pub package: String,
    pub executable: String,
    pub name: String,
    pub parameters: Vec<ParameterSource>,
    pub output_sink: OutputSink,
}

/// One entry of a launch description, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LaunchEntity {
    DeclareArgument(LaunchArgument),
    Node(ProcessLaunchRequest),
}

/// Ordered launch description handed to the host orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchDescription {
    pub entities: Vec<LaunchEntity>,
}

impl LaunchDescription {
    pub fn new(entities: Vec<LaunchEntity>) -> Self {
        Self { entities }
    }

    pub fn arguments(&self) -> impl Iterator<Item = &LaunchArgument> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::DeclareArgument(arg) => Some(arg),
            LaunchEntity::Node(_) => None,
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ProcessLaunchRequest> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::Node(node) => Some(node),
            LaunchEntity::DeclareArgument(_) => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
