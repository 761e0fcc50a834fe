//! Package share-directory resolution
//!
//! The launch description never touches the ROS installation directly. Every
//! lookup goes through a [`PackageResolver`], so the builder stays a pure
//! function of its inputs and can be exercised without a sourced workspace.

use crate::error::{LaunchError, Result};
use dashmap::DashMap;
use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
};

/// Relative location of the ament resource index package markers
const AMENT_INDEX_PACKAGES: &str = "share/ament_index/resource_index/packages";

/// Distributions probed when neither AMENT_PREFIX_PATH nor ROS_DISTRO finds the package
const KNOWN_DISTROS: &[&str] = &["jazzy", "iron", "humble", "galactic", "foxy"];

/// Convert an installed path to a string without altering its bytes
pub(crate) fn path_into_string(path: PathBuf) -> Result<String> {
    path.into_os_string()
        .into_string()
        .map_err(|raw| LaunchError::InvalidPath(raw.into()))
}

/// Maps a package name to its installed directories.
pub trait PackageResolver: Send + Sync {
    /// Share directory of `package`, or [`LaunchError::PackageNotFound`].
    fn share_directory(&self, package: &str) -> Result<PathBuf>;

    /// Directory holding the package's executables, if known.
    fn lib_directory(&self, package: &str) -> Option<PathBuf>;

    fn executable_path(&self, package: &str, executable: &str) -> Result<PathBuf> {
        self.lib_directory(package)
            .map(|dir| dir.join(executable))
            .ok_or_else(|| LaunchError::ExecutableNotFound {
                package: package.to_string(),
                executable: executable.to_string(),
            })
    }
}

/// Resolver backed by the ament index of the sourced install prefixes
pub struct AmentIndexResolver {
    prefixes: Vec<PathBuf>,
    cache: DashMap<String, PathBuf>,
}

impl AmentIndexResolver {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::with_capacity(prefixes.len());
        for prefix in prefixes {
            if !prefix.as_os_str().is_empty() && !unique.contains(&prefix) {
                unique.push(prefix);
            }
        }

        Self {
            prefixes: unique,
            cache: DashMap::new(),
        }
    }

    /// Build the search path from AMENT_PREFIX_PATH, then ROS_DISTRO, then
    /// the well-known distribution prefixes under /opt/ros.
    pub fn from_env() -> Self {
        let mut prefixes = Vec::new();

        if let Some(prefix_path) = env::var_os("AMENT_PREFIX_PATH") {
            prefixes.extend(env::split_paths(&prefix_path));
        }

        if let Ok(distro) = env::var("ROS_DISTRO") {
            prefixes.push(Path::new("/opt/ros").join(distro));
        }

        prefixes.extend(KNOWN_DISTROS.iter().map(|d| Path::new("/opt/ros").join(d)));

        log::debug!("Package search prefixes: {:?}", prefixes);
        Self::new(prefixes)
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Install prefix that provides `package`
    pub fn find_prefix(&self, package: &str) -> Option<PathBuf> {
        if let Some(entry) = self.cache.get(package) {
            log::trace!("Package cache hit: {}", package);
            return Some(entry.value().clone());
        }

        let found = self.prefixes.iter().find(|prefix| {
            prefix.join(AMENT_INDEX_PACKAGES).join(package).is_file()
                || prefix.join("share").join(package).is_dir()
        })?;

        log::debug!("Found package {} in {}", package, found.display());
        self.cache.insert(package.to_string(), found.clone());
        Some(found.clone())
    }
}

impl PackageResolver for AmentIndexResolver {
    fn share_directory(&self, package: &str) -> Result<PathBuf> {
        self.find_prefix(package)
            .map(|prefix| prefix.join("share").join(package))
            .ok_or_else(|| LaunchError::PackageNotFound(package.to_string()))
    }

    fn lib_directory(&self, package: &str) -> Option<PathBuf> {
        self.find_prefix(package)
            .map(|prefix| prefix.join("lib").join(package))
    }
}

#[derive(Debug, Clone)]
struct StaticPackage {
    share: PathBuf,
    lib: Option<PathBuf>,
}

/// Fixed package table, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    packages: HashMap<String, StaticPackage>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package by its share directory only
    pub fn with_package(mut self, package: impl Into<String>, share: impl Into<PathBuf>) -> Self {
        self.packages.insert(
            package.into(),
            StaticPackage {
                share: share.into(),
                lib: None,
            },
        );
        self
    }

    /// Register a package installed under a standard prefix layout
    pub fn with_prefix(mut self, package: impl Into<String>, prefix: impl AsRef<Path>) -> Self {
        let package = package.into();
        let prefix = prefix.as_ref();
        let entry = StaticPackage {
            share: prefix.join("share").join(&package),
            lib: Some(prefix.join("lib").join(&package)),
        };
        self.packages.insert(package, entry);
        self
    }

    /// Set the executable directory of an already registered package
    pub fn with_lib_directory(mut self, package: &str, lib: impl Into<PathBuf>) -> Self {
        if let Some(entry) = self.packages.get_mut(package) {
            entry.lib = Some(lib.into());
        } else {
            log::warn!("Ignoring lib directory for unregistered package {}", package);
        }
        self
    }
}

impl PackageResolver for StaticResolver {
    fn share_directory(&self, package: &str) -> Result<PathBuf> {
        self.packages
            .get(package)
            .map(|entry| entry.share.clone())
            .ok_or_else(|| LaunchError::PackageNotFound(package.to_string()))
    }

    fn lib_directory(&self, package: &str) -> Option<PathBuf> {
        self.packages.get(package).and_then(|entry| entry.lib.clone())
    }
}
