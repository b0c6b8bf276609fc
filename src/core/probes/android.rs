// src/core/probes/android.rs
//
// Android probe set: su binaries and root managers, test-keys builds,
// global developer settings and emulator build descriptors.

use log::debug;
use std::path::Path;

use super::markers::*;
use super::{contains_any, first_existing, restricted_write_succeeds, settle, IntegrityProbes};
use crate::core::environment::{BuildProperty, DeviceEnvironment};
use crate::detection::Platform;
use crate::error::ProbeError;

/// Probes for Android devices
#[derive(Debug)]
pub struct AndroidProbes<E> {
    env: E,
}

impl<E: DeviceEnvironment> AndroidProbes<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    fn root_marker_present(&self) -> bool {
        match first_existing(&self.env, ANDROID_ROOT_PATHS) {
            Some(path) => {
                debug!("root marker present: {}", path);
                true
            }
            None => false,
        }
    }

    /// `which su` printed a non-empty first line; whitespace counts as output
    fn su_on_path(&self) -> Result<bool, ProbeError> {
        let output = self.env.run("which", &["su"])?;
        Ok(output.lines().next().map_or(false, |line| !line.is_empty()))
    }

    fn signed_with_test_keys(&self) -> Result<bool, ProbeError> {
        Ok(self
            .env
            .property(BuildProperty::Tags)?
            .map_or(false, |tags| tags.contains(TEST_KEYS_TAG)))
    }

    fn system_partition_writable(&self) -> bool {
        ANDROID_RESTRICTED_WRITE_PATHS
            .iter()
            .any(|path| restricted_write_succeeds(&self.env, Path::new(path)))
    }

    fn hooking_library_loaded(&self) -> Result<bool, ProbeError> {
        let images = self.env.loaded_images()?;
        Ok(images
            .iter()
            .any(|image| contains_any(&image.to_lowercase(), ANDROID_INJECTION_MARKERS)))
    }

    /// A `Settings.Global` flag equal to 1; unset means disabled
    fn global_flag(&self, name: &str) -> Result<bool, ProbeError> {
        Ok(self.env.global_int(name)? == Some(1))
    }

    /// Lower-cased descriptor value; unreadable descriptors are skipped
    fn descriptor(&self, property: BuildProperty) -> Option<String> {
        match self.env.property(property) {
            Ok(value) => value.map(|v| v.to_lowercase()),
            Err(err) => {
                debug!("build descriptor {}: {}", property.key(), err);
                None
            }
        }
    }

    fn descriptor_matches(&self, property: BuildProperty, markers: &[&str]) -> bool {
        self.descriptor(property)
            .map_or(false, |value| contains_any(&value, markers))
    }
}

impl<E: DeviceEnvironment> IntegrityProbes for AndroidProbes<E> {
    const PLATFORM: Platform = Platform::Android;

    fn check_root_or_jailbreak(&self) -> bool {
        self.root_marker_present()
            || settle("su lookup", self.su_on_path())
            || settle("test-keys build", self.signed_with_test_keys())
            || self.system_partition_writable()
            || settle("loaded libraries", self.hooking_library_loaded())
    }

    fn check_developer_mode(&self) -> bool {
        settle(
            DEVELOPMENT_SETTINGS_ENABLED,
            self.global_flag(DEVELOPMENT_SETTINGS_ENABLED),
        )
    }

    fn check_developer_options(&self) -> bool {
        settle(ADB_ENABLED, self.global_flag(ADB_ENABLED))
    }

    fn check_emulator(&self) -> bool {
        let by_descriptor = [
            (BuildProperty::Fingerprint, EMULATOR_FINGERPRINT_MARKERS),
            (BuildProperty::Hardware, EMULATOR_HARDWARE_MARKERS),
            (BuildProperty::Product, EMULATOR_PRODUCT_MARKERS),
            (BuildProperty::Manufacturer, EMULATOR_MANUFACTURER_MARKERS),
            (BuildProperty::Model, EMULATOR_MODEL_MARKERS),
        ]
        .into_iter()
        .any(|(property, markers)| self.descriptor_matches(property, markers));

        by_descriptor || self.generic_brand_and_device()
    }
}

impl<E: DeviceEnvironment> AndroidProbes<E> {
    fn generic_brand_and_device(&self) -> bool {
        let generic = |property| {
            self.descriptor(property)
                .map_or(false, |value| value.starts_with(GENERIC_PREFIX))
        };
        generic(BuildProperty::Brand) && generic(BuildProperty::Device)
    }
}
