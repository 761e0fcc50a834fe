//! Error types for npucam_launch

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Invalid value '{value}' for launch argument '{argument}': expected a non-empty path")]
    InvalidOverride { argument: String, value: String },

    #[error("Executable '{executable}' not found in package '{package}'")]
    ExecutableNotFound { package: String, executable: String },

    #[error("Invalid output sink '{0}' (expected one of: screen, log, none)")]
    InvalidOutputSink(String),

    #[error("Path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_not_found_message() {
        let err = LaunchError::PackageNotFound("npu_camera".to_string());
        assert!(err.to_string().contains("'npu_camera' not found"));
    }

    #[test]
    fn test_invalid_override_message() {
        let err = LaunchError::InvalidOverride {
            argument: "params".to_string(),
            value: "  ".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'params'"));
        assert!(msg.contains("non-empty path"));
    }
}
