//! Signal probes
//!
//! Each platform implements [`IntegrityProbes`] once. The implementation for
//! the build target is exported as [`NativeProbes`]; the other one stays
//! available for diagnostics and tests.
//!
//! Probe methods return plain `bool`. Provider faults are folded into "not
//! fired" by [`settle`] at the probe boundary, so a permission error can
//! only ever produce a false negative.

pub mod markers;

mod android;
mod ios;

pub use android::AndroidProbes;
pub use ios::IosProbes;

use log::{debug, trace};
use std::path::Path;

use crate::core::environment::Filesystem;
use crate::detection::{Platform, ProbeFamily};
use crate::error::ProbeError;

/// Probe set compiled for the current target
#[cfg(target_os = "ios")]
pub type NativeProbes<E> = IosProbes<E>;

/// Probe set compiled for the current target
#[cfg(not(target_os = "ios"))]
pub type NativeProbes<E> = AndroidProbes<E>;

/// The four probe families of one platform
pub trait IntegrityProbes {
    const PLATFORM: Platform;

    fn check_root_or_jailbreak(&self) -> bool;

    fn check_developer_mode(&self) -> bool;

    fn check_developer_options(&self) -> bool;

    fn check_emulator(&self) -> bool;

    /// Run the probe for `family`
    fn run(&self, family: ProbeFamily) -> bool {
        match family {
            ProbeFamily::RootOrJailbreak => self.check_root_or_jailbreak(),
            ProbeFamily::DeveloperMode => self.check_developer_mode(),
            ProbeFamily::DeveloperOptions => self.check_developer_options(),
            ProbeFamily::Emulator => self.check_emulator(),
        }
    }
}

/// Collapse a sub-check outcome to a signal; faults count as not fired
pub fn settle(check: &str, outcome: Result<bool, ProbeError>) -> bool {
    match outcome {
        Ok(fired) => {
            trace!("{}: {}", check, fired);
            fired
        }
        Err(err) => {
            debug!("{}: {}; treating as not fired", check, err);
            false
        }
    }
}

/// True if `haystack` contains any of `needles`
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// First path of `paths` that exists, stopping at the first hit
pub fn first_existing<'a, F: Filesystem + ?Sized>(fs: &F, paths: &[&'a str]) -> Option<&'a str> {
    paths.iter().copied().find(|path| fs.exists(Path::new(path)))
}

const PROBE_PAYLOAD: &[u8] = b"test";

/// Temporary file created by a write-access probe; removed on drop
struct ProbeArtifact<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    path: &'a Path,
}

impl<F: Filesystem + ?Sized> Drop for ProbeArtifact<'_, F> {
    fn drop(&mut self) {
        if !self.fs.exists(self.path) {
            return;
        }
        // A concurrent probe may have removed it first; the signal stands either way
        if let Err(err) = self.fs.remove_file(self.path) {
            debug!("could not remove probe artifact: {}", err);
        }
    }
}

/// Attempt to create `path` and report whether that succeeded
///
/// Only a file this call created is removed. An entry already present at
/// `path` makes the write fail and is left alone.
pub fn restricted_write_succeeds<F: Filesystem + ?Sized>(fs: &F, path: &Path) -> bool {
    match fs.write_file(path, PROBE_PAYLOAD) {
        Ok(()) => {
            let _artifact = ProbeArtifact { fs, path };
            settle("restricted write", Ok(true))
        }
        Err(err) => settle("restricted write", Err(err)),
    }
}
