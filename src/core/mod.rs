//! Core detection: ambient-state providers, signal probes and the evaluator

pub mod environment;
pub mod evaluator;
pub mod probes;

pub use environment::{DeviceEnvironment, FakeEnvironment, HostEnvironment};
pub use evaluator::{check_device_security, check_device_security_with, Evaluator};
pub use probes::{AndroidProbes, IntegrityProbes, IosProbes, NativeProbes};
