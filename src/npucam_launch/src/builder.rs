//! Launch description builder for the npu_camera nodes

use crate::{
    description::{
        LaunchArgument, LaunchDescription, LaunchEntity, OutputSink, ParameterSource,
        ProcessLaunchRequest,
    },
    error::{LaunchError, Result},
    package::{path_into_string, PackageResolver},
};
use std::collections::HashMap;

/// Package providing the node executables and the default parameter file
pub const PACKAGE: &str = "npu_camera";

/// Name of the parameter file launch argument
pub const PARAMS_ARG: &str = "params";

/// Executables started by this description, in launch order
pub const NODE_EXECUTABLES: [&str; 2] = ["img_pub", "img_sub"];

const PARAMS_DESCRIPTION: &str = "Full path of parameter file";

/// Builds the npu_camera launch description against an injected resolver
pub struct LaunchDescriptorBuilder<'a> {
    resolver: &'a dyn PackageResolver,
}

impl<'a> LaunchDescriptorBuilder<'a> {
    pub fn new(resolver: &'a dyn PackageResolver) -> Self {
        Self { resolver }
    }

    /// Default parameter file: `<share>/param/cam_param.yaml`
    pub fn default_params_path(&self) -> Result<String> {
        let share = self.resolver.share_directory(PACKAGE)?;
        path_into_string(share.join("param").join("cam_param.yaml"))
    }

    /// Build the description, using `override_path` for the parameter file
    /// when given. The override is passed through verbatim.
    pub fn build(&self, override_path: Option<&str>) -> Result<LaunchDescription> {
        let default_value = self.default_params_path()?;

        let resolved = match override_path {
            Some(path) if path.trim().is_empty() => {
                return Err(LaunchError::InvalidOverride {
                    argument: PARAMS_ARG.to_string(),
                    value: path.to_string(),
                });
            }
            Some(path) => {
                log::debug!("Using parameter file override: {}", path);
                path.to_string()
            }
            None => default_value.clone(),
        };
        let params = ParameterSource::new(resolved);

        let mut entities = Vec::with_capacity(1 + NODE_EXECUTABLES.len());
        entities.push(LaunchEntity::DeclareArgument(LaunchArgument {
            name: PARAMS_ARG.to_string(),
            default_value,
            description: PARAMS_DESCRIPTION.to_string(),
        }));
        entities.extend(NODE_EXECUTABLES.iter().map(|exec| {
            LaunchEntity::Node(ProcessLaunchRequest {
                package: PACKAGE.to_string(),
                executable: exec.to_string(),
                name: exec.to_string(),
                parameters: vec![params.clone()],
                output_sink: OutputSink::Screen,
            })
        }));

        log::info!(
            "Built launch description: {} nodes with parameters {}",
            NODE_EXECUTABLES.len(),
            params
        );
        Ok(LaunchDescription::new(entities))
    }

    /// Build from host launch arguments (`params:=<path>`).
    /// Arguments this description does not declare are ignored.
    pub fn build_with_launch_args(
        &self,
        launch_args: &HashMap<String, String>,
    ) -> Result<LaunchDescription> {
        for key in launch_args.keys().filter(|k| k.as_str() != PARAMS_ARG) {
            log::warn!("Ignoring undeclared launch argument: {}", key);
        }
        self.build(launch_args.get(PARAMS_ARG).map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::StaticResolver;

    fn resolver() -> StaticResolver {
        StaticResolver::new().with_package(PACKAGE, "/opt/pkg/npu_camera/share")
    }

    #[test]
    fn test_default_params_path() {
        let resolver = resolver();
        let builder = LaunchDescriptorBuilder::new(&resolver);
        assert_eq!(
            builder.default_params_path().unwrap(),
            "/opt/pkg/npu_camera/share/param/cam_param.yaml"
        );
    }

    #[test]
    fn test_build_default() {
        let resolver = resolver();
        let desc = LaunchDescriptorBuilder::new(&resolver).build(None).unwrap();

        let args: Vec<_> = desc.arguments().collect();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "params");
        assert_eq!(args[0].description, "Full path of parameter file");

        let nodes: Vec<_> = desc.nodes().collect();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].executable, "img_pub");
        assert_eq!(nodes[1].executable, "img_sub");
        for node in nodes {
            assert_eq!(node.package, "npu_camera");
            assert_eq!(node.name, node.executable);
            assert_eq!(node.output_sink, OutputSink::Screen);
            assert_eq!(
                node.parameters[0].as_str(),
                "/opt/pkg/npu_camera/share/param/cam_param.yaml"
            );
        }
    }

    #[test]
    fn test_argument_declared_first() {
        let resolver = resolver();
        let desc = LaunchDescriptorBuilder::new(&resolver).build(None).unwrap();
        assert!(matches!(desc.entities[0], LaunchEntity::DeclareArgument(_)));
        assert!(matches!(desc.entities[1], LaunchEntity::Node(_)));
        assert!(matches!(desc.entities[2], LaunchEntity::Node(_)));
    }

    #[test]
    fn test_override_kept_verbatim() {
        let resolver = resolver();
        let builder = LaunchDescriptorBuilder::new(&resolver);
        let desc = builder.build(Some(" ./my params//cam.yaml ")).unwrap();

        for node in desc.nodes() {
            assert_eq!(node.parameters[0].as_str(), " ./my params//cam.yaml ");
        }
        // The declared default still points at the package file
        assert_eq!(
            desc.arguments().next().unwrap().default_value,
            "/opt/pkg/npu_camera/share/param/cam_param.yaml"
        );
    }

    #[test]
    fn test_empty_override_rejected() {
        let resolver = resolver();
        let builder = LaunchDescriptorBuilder::new(&resolver);
        for value in ["", "   ", "\t\n"] {
            let err = builder.build(Some(value)).unwrap_err();
            assert!(matches!(err, LaunchError::InvalidOverride { .. }));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_share_directory() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt, path::PathBuf};

        let share = OsStr::from_bytes(b"/opt/pkg/cam\xff/share");
        let resolver = StaticResolver::new().with_package(PACKAGE, share);
        let builder = LaunchDescriptorBuilder::new(&resolver);

        let err = builder.build(None).unwrap_err();
        assert!(matches!(
            err,
            LaunchError::InvalidPath(ref p)
                if p == &PathBuf::from(share).join("param/cam_param.yaml")
        ));
    }

    #[test]
    fn test_missing_package() {
        let resolver = StaticResolver::new();
        let builder = LaunchDescriptorBuilder::new(&resolver);
        assert!(matches!(
            builder.build(None),
            Err(LaunchError::PackageNotFound(ref p)) if p == "npu_camera"
        ));
        assert!(matches!(
            builder.build(Some("/tmp/cam.yaml")),
            Err(LaunchError::PackageNotFound(_))
        ));
    }

    #[test]
    fn test_build_with_launch_args() {
        let resolver = resolver();
        let builder = LaunchDescriptorBuilder::new(&resolver);

        let mut args = HashMap::new();
        args.insert("params".to_string(), "/etc/cam.yaml".to_string());
        args.insert("use_sim_time".to_string(), "true".to_string());

        assert_eq!(
            builder.build_with_launch_args(&args).unwrap(),
            builder.build(Some("/etc/cam.yaml")).unwrap()
        );
        assert_eq!(
            builder.build_with_launch_args(&HashMap::new()).unwrap(),
            builder.build(None).unwrap()
        );
    }
}
