//! Ambient device state, behind small injectable provider traits
//!
//! Probes never touch `std::fs`, `std::process` or `std::env` directly.
//! They go through these traits so that tests can simulate a rooted phone, an
//! emulator or a permission failure without real device state.
//!
//! - [`HostEnvironment`] reads the device the process is running on.
//! - [`FakeEnvironment`] is an in-memory device for tests and demos.

mod fake;
mod host;

pub use fake::FakeEnvironment;
pub use host::HostEnvironment;

use std::path::Path;

use crate::error::ProbeError;

/// Filesystem access used by marker and write-access probes
pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` with `contents`; fails if anything already exists there
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), ProbeError>;

    fn remove_file(&self, path: &Path) -> Result<(), ProbeError>;
}

/// Launches an external command and returns its standard output
///
/// Implementations bound the command's run time; a command that does not
/// finish in time yields [`ProbeError::Timeout`].
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ProbeError>;
}

/// OS-level global settings (Android `Settings.Global`)
pub trait SettingsStore {
    /// `Ok(None)` when the setting is not defined
    fn global_int(&self, name: &str) -> Result<Option<i64>, ProbeError>;
}

/// Build descriptors exposed by the OS image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildProperty {
    Fingerprint,
    Hardware,
    Product,
    Manufacturer,
    Model,
    Brand,
    Device,
    Tags,
}

impl BuildProperty {
    /// System property key backing this descriptor
    pub fn key(&self) -> &'static str {
        match self {
            BuildProperty::Fingerprint => "ro.build.fingerprint",
            BuildProperty::Hardware => "ro.hardware",
            BuildProperty::Product => "ro.product.name",
            BuildProperty::Manufacturer => "ro.product.manufacturer",
            BuildProperty::Model => "ro.product.model",
            BuildProperty::Brand => "ro.product.brand",
            BuildProperty::Device => "ro.product.device",
            BuildProperty::Tags => "ro.build.tags",
        }
    }
}

pub trait BuildProperties {
    /// `Ok(None)` when the descriptor is unset or empty
    fn property(&self, property: BuildProperty) -> Result<Option<String>, ProbeError>;
}

/// Names of the dynamic libraries/images mapped into the current process
pub trait LoadedImages {
    fn loaded_images(&self) -> Result<Vec<String>, ProbeError>;
}

/// Compile-time facts about the running binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    /// Built for a simulator target
    pub simulator: bool,
    /// `std::env::consts::ARCH` of the build
    pub arch: &'static str,
}

impl TargetInfo {
    pub fn current() -> Self {
        Self {
            simulator: cfg!(all(target_os = "ios", target_abi = "sim")),
            arch: std::env::consts::ARCH,
        }
    }

    pub fn is_x86(&self) -> bool {
        matches!(self.arch, "x86" | "x86_64")
    }
}

/// Process environment variables and build target
pub trait ProcessEnv {
    fn var(&self, name: &str) -> Option<String>;

    fn target(&self) -> TargetInfo;
}

/// Everything a platform probe set may read
pub trait DeviceEnvironment:
    Filesystem + CommandRunner + SettingsStore + BuildProperties + LoadedImages + ProcessEnv
{
}

impl<T> DeviceEnvironment for T where
    T: Filesystem + CommandRunner + SettingsStore + BuildProperties + LoadedImages + ProcessEnv
{
}
