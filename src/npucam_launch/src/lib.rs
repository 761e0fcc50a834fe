//! Launch description for the npu_camera image pipeline
//!
//! Declares the `params` launch argument (default:
//! `<share of npu_camera>/param/cam_param.yaml`) and requests the `img_pub`
//! and `img_sub` nodes with that parameter file and screen output.

pub mod builder;
pub mod description;
pub mod error;
pub mod package;
pub mod params;
pub mod record;

use builder::LaunchDescriptorBuilder;
use description::LaunchDescription;
use error::Result;
use package::PackageResolver;
use record::RecordJson;
use std::collections::HashMap;

/// Build the launch description from host launch arguments (`params:=<path>`)
pub fn generate_launch_description(
    resolver: &dyn PackageResolver,
    launch_args: &HashMap<String, String>,
) -> Result<LaunchDescription> {
    LaunchDescriptorBuilder::new(resolver).build_with_launch_args(launch_args)
}

/// Build the launch description and translate it to record.json form
pub fn generate_launch_record(
    resolver: &dyn PackageResolver,
    launch_args: &HashMap<String, String>,
) -> Result<RecordJson> {
    let description = generate_launch_description(resolver, launch_args)?;
    record::generate_record(&description, resolver)
}
