// src/core/evaluator.rs
//
// Runs the probe families of one platform in their fixed order and assembles
// the detection report.

use log::{debug, error, info};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::environment::{DeviceEnvironment, HostEnvironment};
use super::probes::{IntegrityProbes, NativeProbes};
use crate::config::CheckConfig;
use crate::detection::{DetectionResult, Platform, ProbeFamily};
use crate::error::SecurityCheckError;

/// Orchestrates one platform's probe set
///
/// The evaluator holds no state between passes; every call to
/// [`evaluate`](Self::evaluate) builds a fresh report.
#[derive(Debug)]
pub struct Evaluator<P> {
    probes: P,
}

impl<P: IntegrityProbes> Evaluator<P> {
    pub fn new(probes: P) -> Self {
        Self { probes }
    }

    pub fn platform(&self) -> Platform {
        P::PLATFORM
    }

    pub fn probes(&self) -> &P {
        &self.probes
    }

    /// Run every applicable probe and build the report
    ///
    /// Probe faults never surface here. The only error is a panic escaping
    /// a probe, which aborts the whole pass; no partial report is returned.
    pub fn evaluate(&self) -> Result<DetectionResult, SecurityCheckError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.run_pass())).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            error!("{} security check aborted: {}", P::PLATFORM, message);
            SecurityCheckError::Aborted { message }
        })
    }

    fn run_pass(&self) -> DetectionResult {
        let platform = P::PLATFORM;
        let mut builder = DetectionResult::builder(platform);

        for family in ProbeFamily::ORDER {
            let fired = if platform.supports(family) {
                self.probes.run(family)
            } else {
                false
            };
            debug!("{} {}: {}", platform, family, fired);
            builder.record(family, fired);
        }

        let result = builder.build();
        info!(
            "{} security check complete: {} signal(s) fired",
            platform,
            result.failed_checks().len()
        );
        result
    }
}

impl<E: DeviceEnvironment> Evaluator<NativeProbes<E>> {
    /// Evaluator for the probe set compiled for this target
    pub fn native(env: E) -> Self {
        Self::new(NativeProbes::new(env))
    }
}

/// Check the device this process runs on with default settings
pub fn check_device_security() -> Result<DetectionResult, SecurityCheckError> {
    check_device_security_with(&CheckConfig::default())
}

/// Check the device this process runs on
pub fn check_device_security_with(
    config: &CheckConfig,
) -> Result<DetectionResult, SecurityCheckError> {
    Evaluator::native(HostEnvironment::new(config)).evaluate()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic origin".to_string()
    }
}
