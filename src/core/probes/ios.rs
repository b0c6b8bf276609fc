// src/core/probes/ios.rs
//
// iOS probe set: jailbreak files, sandbox escape and injected dyld images,
// plus simulator detection.

use log::debug;
use std::path::Path;

use super::markers::*;
use super::{contains_any, first_existing, restricted_write_succeeds, settle, IntegrityProbes};
use crate::core::environment::DeviceEnvironment;
use crate::detection::Platform;
use crate::error::ProbeError;

/// Probes for iOS devices
#[derive(Debug)]
pub struct IosProbes<E> {
    env: E,
}

impl<E: DeviceEnvironment> IosProbes<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    fn jailbreak_marker_present(&self) -> bool {
        match first_existing(&self.env, IOS_JAILBREAK_PATHS) {
            Some(path) => {
                debug!("jailbreak marker present: {}", path);
                true
            }
            None => false,
        }
    }

    fn sandbox_escaped(&self) -> bool {
        IOS_RESTRICTED_WRITE_PATHS
            .iter()
            .any(|path| restricted_write_succeeds(&self.env, Path::new(path)))
    }

    fn injected_image_loaded(&self) -> Result<bool, ProbeError> {
        let images = self.env.loaded_images()?;
        Ok(images
            .iter()
            .any(|image| contains_any(image, IOS_INJECTION_MARKERS)))
    }
}

impl<E: DeviceEnvironment> IntegrityProbes for IosProbes<E> {
    const PLATFORM: Platform = Platform::Ios;

    fn check_root_or_jailbreak(&self) -> bool {
        self.jailbreak_marker_present()
            || self.sandbox_escaped()
            || settle("loaded images", self.injected_image_loaded())
    }

    /// Always false. iOS 16+ has a Developer Mode switch, but its state is
    /// not exposed to sandboxed apps.
    fn check_developer_mode(&self) -> bool {
        false
    }

    /// iOS has no equivalent of Android's developer options; the evaluator
    /// never calls this.
    fn check_developer_options(&self) -> bool {
        false
    }

    fn check_emulator(&self) -> bool {
        let target = self.env.target();
        target.simulator
            || self.env.var(SIMULATOR_DEVICE_NAME_VAR).is_some()
            || target.is_x86()
    }
}
